use std::sync::Arc;

use chrono::NaiveDate;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::bookings::TransitionService;
use crate::core::events::ChangeFeed;
use crate::core::Config;
use crate::utils::time::today_in_tz;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是前台节点的核心数据结构。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | changes | Arc<ChangeFeed> | 资源变更事件广播 |
/// | transitions | Arc<TransitionService> | 预订状态转换服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 资源变更事件广播
    pub changes: Arc<ChangeFeed>,
    /// 预订状态转换服务 (按预订串行化)
    pub transitions: Arc<TransitionService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/frontdesk.db)
    /// 3. 各服务 (JWT, ChangeFeed, TransitionService)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("frontdesk.db");
        let db = crate::db::init_database(&db_path)
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db)
    }

    /// 使用已有数据库连接构造状态 (测试场景使用 kv-mem 引擎)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let changes = Arc::new(ChangeFeed::new());
        let transitions = Arc::new(TransitionService::new(db.clone(), changes.clone()));

        Self {
            config,
            db,
            jwt_service,
            changes,
            transitions,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 酒店业务时区的当前日期
    pub fn today(&self) -> NaiveDate {
        today_in_tz(self.config.timezone)
    }

    /// 发布资源变更事件
    ///
    /// 向进程内订阅者广播资源变更通知。
    /// 版本号由 ChangeFeed 自动递增管理。
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "room", "booking", "sale")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 资源 ID
    pub fn publish_change(&self, resource: &str, action: &str, id: &str) {
        self.changes.publish(resource, action, id);
    }
}
