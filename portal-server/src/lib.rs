//! HR Portal Server - 员工自助门户后端
//!
//! # 架构概述
//!
//! 本模块是门户后端的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **邮件客户端** (`services/mailer`): 欢迎邮件微服务客户端
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! portal-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色检查
//! ├── services/      # 邮件微服务客户端
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、校验、日志、时间
//! └── db/            # 数据库层 (模型 + 仓储)
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(Some(&log_level), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ______     ____             __        __
   / / / / __ \   / __ \____  _____/ /_____ _/ /
  / /_/ / /_/ /  / /_/ / __ \/ ___/ __/ __ `/ /
 / __  / _, _/  / ____/ /_/ / /  / /_/ /_/ / /
/_/ /_/_/ |_|  /_/    \____/_/   \__/\__,_/_/
    "#
    );
}
