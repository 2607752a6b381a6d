// ==========================================
// 生产准备与里程碑跟踪看板 - API层错误类型
// ==========================================
// 职责: 定义 API 层错误,转换取数层错误为用户可读的错误消息
// 红线: 刷新路径不报错（取数失败降级为空快照）,报错仅限显式文件加载
// ==========================================

use crate::ingest::error::IngestError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据读取失败: {0}")]
    Ingest(#[from] IngestError),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_error_conversion() {
        let ingest_err = IngestError::FileNotFound("data.csv".to_string());
        let api_err: ApiError = ingest_err.into();
        match api_err {
            ApiError::Ingest(inner) => {
                assert!(inner.to_string().contains("data.csv"));
            }
            _ => panic!("Expected Ingest"),
        }
    }
}
