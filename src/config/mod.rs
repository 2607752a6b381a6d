// ==========================================
// 生产准备与里程碑跟踪看板 - 配置层
// ==========================================
// 职责: 看板可调参数的显式配置结构
// 存储: JSON 文件（可选）,缺省内置默认值
// ==========================================

pub mod tracker_config;

// 重导出核心配置类型
pub use tracker_config::{
    ClassifierProfile, ConfigError, RoleKeywordTable, RoleKeywords, TrackerConfig,
};

// TODO: 支持配置文件变更监听(notify),变更即触发下个刷新周期生效
