// ==========================================
// 生产准备与里程碑跟踪看板 - API 层
// ==========================================
// 职责: 提供快照刷新与视图查询接口,供渲染协作方调用
// ==========================================

pub mod dashboard_api;
pub mod error;

// 重导出核心类型
pub use dashboard_api::{
    DashboardApi, MilestoneSnapshot, MilestoneView, ReadinessSnapshot, ReadinessView,
};
pub use error::{ApiError, ApiResult};
