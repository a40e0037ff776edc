//! 认证授权模块
//!
//! 提供 JWT 认证与角色检查：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_hr`] / [`require_employee`] - 角色检查中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, ROLE_EMPLOYEE, ROLE_HR};
pub use middleware::{require_auth, require_employee, require_hr};
