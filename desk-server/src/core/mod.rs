//! 核心模块 - 配置、状态、服务器
//!
//! - [`config`] - 环境变量驱动的配置
//! - [`events`] - 资源变更事件广播
//! - [`state`] - 服务器共享状态
//! - [`server`] - HTTP 服务器启动

pub mod config;
pub mod events;
pub mod server;
pub mod state;

pub use config::Config;
pub use events::{ChangeEvent, ChangeFeed};
pub use server::Server;
pub use state::ServerState;
