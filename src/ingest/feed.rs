// ==========================================
// 生产准备与里程碑跟踪看板 - 数据源接口
// ==========================================
// 职责: 定义取数协作方的接口（远端表格由协作方负责拉取）
// 红线: 获取失败由 API 层降级为空数据集,本层只如实上报
// ==========================================

use crate::ingest::error::IngestResult;
use async_trait::async_trait;

/// 取数协作方接口
///
/// 协作方按自己的节奏（定时器/人工触发）拉取远端表格,
/// 每次交付一份完整的 CSV 文本;核心对单次交付整批重算。
#[async_trait]
pub trait TableFeed: Send + Sync {
    /// 拉取一次原始 CSV 文本
    async fn fetch_csv(&self) -> IngestResult<String>;
}

/// 静态数据源（演示与测试用）
pub struct StaticTableFeed {
    csv_text: String,
}

impl StaticTableFeed {
    pub fn new(csv_text: impl Into<String>) -> Self {
        Self {
            csv_text: csv_text.into(),
        }
    }
}

#[async_trait]
impl TableFeed for StaticTableFeed {
    async fn fetch_csv(&self) -> IngestResult<String> {
        Ok(self.csv_text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_feed_returns_text() {
        let feed = StaticTableFeed::new("a,b\n1,2\n");
        let text = feed.fetch_csv().await.unwrap();
        assert!(text.starts_with("a,b"));
    }
}
