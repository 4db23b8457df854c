//! 资源变更事件
//!
//! 成功的写操作发布 `{resource, action, id, version}` 事件到进程内
//! broadcast 通道，读方按需失效缓存，替代整表重拉。
//!
//! 每种资源类型维护独立的版本号，支持原子递增；
//! 客户端可通过版本号判断数据新旧。

use dashmap::DashMap;
use tokio::sync::broadcast;

/// A committed change to one entity
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// Resource type ("room", "booking", "sale", ...)
    pub resource: String,
    /// "created" | "updated" | "deleted"
    pub action: String,
    /// Record id ("table:id")
    pub id: String,
    /// Per-resource monotonically increasing version
    pub version: u64,
}

/// In-process change notification feed
#[derive(Debug)]
pub struct ChangeFeed {
    tx: broadcast::Sender<ChangeEvent>,
    versions: DashMap<String, u64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self {
            tx,
            versions: DashMap::new(),
        }
    }

    /// 递增资源版本号并广播变更事件
    ///
    /// 没有订阅者时事件被丢弃 (send 失败不是错误)。
    pub fn publish(&self, resource: &str, action: &str, id: &str) -> u64 {
        let version = {
            let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        let _ = self.tx.send(ChangeEvent {
            resource: resource.to_string(),
            action: action.to_string(),
            id: id.to_string(),
            version,
        });

        version
    }

    /// 订阅变更事件
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    /// 获取指定资源的当前版本号 (不存在返回 0)
    pub fn version(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_versions_increment_per_resource() {
        let feed = ChangeFeed::new();

        assert_eq!(feed.publish("room", "created", "room:1"), 1);
        assert_eq!(feed.publish("room", "updated", "room:1"), 2);
        assert_eq!(feed.publish("booking", "created", "booking:1"), 1);
        assert_eq!(feed.version("room"), 2);
        assert_eq!(feed.version("sale"), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish("booking", "updated", "booking:b1");

        let event = rx.recv().await.unwrap();
        assert_eq!(event.resource, "booking");
        assert_eq!(event.action, "updated");
        assert_eq!(event.id, "booking:b1");
        assert_eq!(event.version, 1);
    }
}
