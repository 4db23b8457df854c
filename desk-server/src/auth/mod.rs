//! 认证模块
//!
//! - [`jwt`] - JWT 令牌生成与验证
//! - [`middleware`] - Bearer 认证中间件
//! - [`extractor`] - CurrentUser 提取器

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
