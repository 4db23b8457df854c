//! Desk Server - 酒店前台管理系统服务端
//!
//! # 架构概述
//!
//! 本模块是前台服务端的主入口，提供以下核心功能：
//!
//! - **预订生命周期** (`bookings`): 状态机校验 + 账务推导 + 按预订串行化
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! desk-server/src/
//! ├── core/          # 配置、状态、事件、服务器
//! ├── auth/          # JWT 认证
//! ├── api/           # HTTP 路由和处理器
//! ├── bookings/      # 预订状态机与账务
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod bookings;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use bookings::{BookingStatus, PaymentMethod, TransitionService};
pub use core::{ChangeEvent, ChangeFeed, Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  ___________ __ __
   / __ \/ ____/ ___// //_/
  / / / / __/  \__ \/ ,<
 / /_/ / /___ ___/ / /| |
/_____/_____//____/_/ |_|
   _____ __________ _    ________
  / ___// ____/ __ \ |  / / ____/
  \__ \/ __/ / /_/ / | / / __/
 ___/ / /___/ _, _/| |/ / /___
/____/_____/_/ |_| |___/_____/
    "#
    );
}
