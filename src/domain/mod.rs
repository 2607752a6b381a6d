// ==========================================
// 生产准备与里程碑跟踪看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、展示约定
// 红线: 不含取数逻辑,不含引擎逻辑
// ==========================================

pub mod row;
pub mod types;

// 重导出核心类型
pub use row::{ExportTable, MilestoneRow, RawTable, ReadinessRow, RoleMap, PLACEHOLDER};
pub use types::{
    ColumnRole, FilterSelection, MilestoneStatus, ReadinessStatus, StatusTone, ViewMode,
};
