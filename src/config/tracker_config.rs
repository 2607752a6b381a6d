// ==========================================
// 生产准备与里程碑跟踪看板 - 看板配置
// ==========================================
// 职责: 关键字表、关闭同义词、日期解析参数、刷新间隔
// 红线: 角色关键字表是显式配置结构,不在调用点硬编码推断
// ==========================================

use crate::domain::types::ColumnRole;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 角色关键字表 (Role Keyword Table)
// ==========================================

/// 单个角色的有序关键字列表（中英文同义词混排）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleKeywords {
    pub role: ColumnRole,
    pub keywords: Vec<String>,
}

/// 优先级有序的 (角色 → 关键字列表) 表
///
/// 解析时按 entries 顺序逐角色匹配,同一角色内按列名顺序取首个命中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleKeywordTable {
    pub entries: Vec<RoleKeywords>,
}

fn keywords(role: ColumnRole, words: &[&str]) -> RoleKeywords {
    RoleKeywords {
        role,
        keywords: words.iter().map(|w| w.to_string()).collect(),
    }
}

impl Default for RoleKeywordTable {
    fn default() -> Self {
        Self {
            entries: vec![
                keywords(ColumnRole::Process, &["process", "线体"]),
                keywords(ColumnRole::Category, &["category", "类别", "4m"]),
                keywords(
                    ColumnRole::SubActivity,
                    &["sub", "activity", "milestone", "子活动", "任务"],
                ),
                keywords(ColumnRole::Owner, &["owner", "负责人", "person", "name"]),
                keywords(
                    ColumnRole::TargetDate,
                    &["target", "due", "计划", "日期", "date"],
                ),
                keywords(ColumnRole::Status, &["status", "状态"]),
                keywords(ColumnRole::Remark, &["remark", "备注", "comment", "说明"]),
            ],
        }
    }
}

// ==========================================
// 分类参数 (Classifier Profile)
// ==========================================

/// 状态分类的可配置参数
///
/// 关闭同义词是配置数据而非固定逻辑,可按现场口径扩充
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierProfile {
    /// 判定"已关闭"的状态文本同义词（匹配时忽略大小写与首尾空白）
    pub closed_synonyms: Vec<String>,
    /// 日期解析是否日在前（DD-MM 口径）
    pub day_first: bool,
}

impl Default for ClassifierProfile {
    fn default() -> Self {
        Self {
            closed_synonyms: ["closed", "close", "done", "yes", "ok", "完成"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            day_first: true,
        }
    }
}

// ==========================================
// TrackerConfig - 看板配置
// ==========================================

/// 看板全量配置,支持 JSON 文件覆写,缺省取默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub role_keywords: RoleKeywordTable,
    pub classifier: ClassifierProfile,
    /// 就绪看板刷新间隔（秒）,供外部调度协作方使用
    pub readiness_refresh_secs: u64,
    /// 里程碑看板刷新间隔（秒）
    pub milestone_refresh_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            role_keywords: RoleKeywordTable::default(),
            classifier: ClassifierProfile::default(),
            readiness_refresh_secs: 30,
            milestone_refresh_secs: 60,
        }
    }
}

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件解析失败: {path}: {message}")]
    ParseError { path: String, message: String },
}

impl TrackerConfig {
    /// 默认配置文件路径（用户配置目录下）
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("readiness-tracker").join("config.json"))
    }

    /// 从 JSON 文件加载配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 加载配置,任何失败降级为默认配置
    ///
    /// path 为 None 时尝试默认路径;文件不存在不算异常,只记 debug
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_config_path(),
        };

        match candidate {
            Some(p) if p.exists() => match Self::load(&p) {
                Ok(config) => {
                    tracing::info!("已加载配置: {}", p.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("配置加载失败,使用默认配置: {}", e);
                    Self::default()
                }
            },
            _ => {
                tracing::debug!("未找到配置文件,使用默认配置");
                Self::default()
            }
        }
    }
}
