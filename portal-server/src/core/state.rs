use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::HrCreate;
use crate::db::repository::HrRepository;
use crate::services::MailerClient;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | mailer | Option<MailerClient> | 邮件微服务客户端 (测试时为 None) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 邮件微服务客户端
    pub mailer: Option<MailerClient>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/portal.db)
    /// 3. JWT 服务与邮件客户端
    /// 4. 首次启动时播种默认 HR 账户
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("portal.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let mailer = Some(MailerClient::new(config.mailer_url.clone()));

        let state = Self {
            config: config.clone(),
            db: db_service.db.clone(),
            jwt_service,
            mailer,
        };

        state.seed_default_hr(&db_service).await?;

        Ok(state)
    }

    /// 创建内存数据库状态 (测试用)
    pub async fn initialize_in_memory() -> Result<Self, AppError> {
        let db_service = DbService::memory().await?;
        let jwt_service = Arc::new(JwtService::with_config(crate::auth::JwtConfig {
            secret: "in-memory-test-secret-key-0123456789ab".to_string(),
            expiration_minutes: 60,
            issuer: "portal-server".to_string(),
            audience: "portal-clients".to_string(),
        }));

        Ok(Self {
            config: Config::with_overrides("", 0),
            db: db_service.db.clone(),
            jwt_service,
            mailer: None,
        })
    }

    /// 首次启动时创建默认 HR 账户
    ///
    /// 账户信息从 PORTAL_HR_NAME / PORTAL_HR_EMAIL / PORTAL_HR_PASSWORD /
    /// PORTAL_HR_DEPARTMENT 环境变量读取。已有任何 HR 账户时跳过。
    async fn seed_default_hr(&self, db: &DbService) -> Result<(), AppError> {
        let repo = HrRepository::new(db);
        if repo.count().await? > 0 {
            return Ok(());
        }

        let email = match std::env::var("PORTAL_HR_EMAIL") {
            Ok(v) if !v.is_empty() => v,
            _ => {
                tracing::warn!(
                    "No HR account exists and PORTAL_HR_EMAIL is not set; \
                     nobody will be able to log in"
                );
                return Ok(());
            }
        };
        let password = match std::env::var("PORTAL_HR_PASSWORD") {
            Ok(v) if !v.is_empty() => v,
            _ => {
                tracing::warn!("PORTAL_HR_PASSWORD is not set; skipping HR account seeding");
                return Ok(());
            }
        };
        let name = std::env::var("PORTAL_HR_NAME").unwrap_or_else(|_| "HR Admin".to_string());
        let department =
            std::env::var("PORTAL_HR_DEPARTMENT").unwrap_or_else(|_| "Human Resources".to_string());

        let hr = repo
            .create(&HrCreate {
                name,
                email,
                password,
                department,
            })
            .await?;
        tracing::info!(email = %hr.email, "Seeded default HR account");
        Ok(())
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取数据库服务
    pub fn db_service(&self) -> DbService {
        DbService {
            db: self.db.clone(),
        }
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
