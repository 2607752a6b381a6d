// ==========================================
// 生产准备与里程碑跟踪看板 - 核心库
// ==========================================
// 技术栈: Rust + chrono + serde
// 系统定位: 看板数据核心 (取数/分类/过滤)
// 红线: 核心不做网络请求,不渲染 UI,渲染与取数由外部协作方负责
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 关键字表与分类参数
pub mod config;

// 取数层 - 外部表格数据
pub mod ingest;

// 引擎层 - 列解析/日期归一化/状态分类/视图过滤
pub mod engine;

// API 层 - 快照与视图接口
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    ColumnRole, FilterSelection, MilestoneStatus, ReadinessStatus, StatusTone, ViewMode,
};

// 领域实体
pub use domain::row::{
    ExportTable, MilestoneRow, RawTable, ReadinessRow, RoleMap, PLACEHOLDER,
};

// 配置
pub use config::{ClassifierProfile, RoleKeywordTable, RoleKeywords, TrackerConfig};

// 引擎
pub use engine::{
    ColumnResolver, DateNormalizer, MilestoneClassifier, ReadinessClassifier, ViewFilter,
};

// 取数
pub use ingest::{
    CsvTableReader, ExcelTableReader, IngestError, IngestResult, StaticTableFeed, TableFeed,
    UniversalTableReader,
};

// API
pub use api::{
    DashboardApi, MilestoneSnapshot, MilestoneView, ReadinessSnapshot, ReadinessView,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产准备与里程碑跟踪看板";
