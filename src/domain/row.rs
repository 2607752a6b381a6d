// ==========================================
// 生产准备与里程碑跟踪看板 - 行实体定义
// ==========================================
// 职责: 原始表格、角色映射、分类行、导出表
// 红线: 分类行在一个刷新周期内不可变,每周期整批重算
// ==========================================

use crate::domain::types::{ColumnRole, MilestoneStatus, ReadinessStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 空白单元格的显式占位符,与空串区分
pub const PLACEHOLDER: &str = "—";

// ==========================================
// 原始表格 (Raw Table)
// ==========================================

/// 取数层产出的原始表格
///
/// - columns: 去重后的有序列名（同名列仅保留首次出现）
/// - rows: 每行为 列名 → 原始文本 的映射,空白已填充占位符
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    /// 空表格（取数失败降级的终态）
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// 读取单元格的可用值: 缺失、空白、占位符均视为无值
pub fn cell_value(row: &HashMap<String, String>, column: &str) -> Option<String> {
    row.get(column).and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

// ==========================================
// 角色映射 (Role Map)
// ==========================================

/// 角色解析结果: 每个角色至多对应一个列名
///
/// 角色缺失是合法状态,下游必须走显式的缺失分支
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    pub owner: Option<String>,
    pub process: Option<String>,
    pub category: Option<String>,
    pub sub_activity: Option<String>,
    pub target_date: Option<String>,
    pub status: Option<String>,
    pub remark: Option<String>,
    pub task: Option<String>,
    pub milestone_type: Option<String>,
    pub plan_date: Option<String>,
    pub actual_date: Option<String>,
}

impl RoleMap {
    /// 按角色取已解析的列名
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        let slot = match role {
            ColumnRole::Owner => &self.owner,
            ColumnRole::Process => &self.process,
            ColumnRole::Category => &self.category,
            ColumnRole::SubActivity => &self.sub_activity,
            ColumnRole::TargetDate => &self.target_date,
            ColumnRole::Status => &self.status,
            ColumnRole::Remark => &self.remark,
            ColumnRole::Task => &self.task,
            ColumnRole::MilestoneType => &self.milestone_type,
            ColumnRole::PlanDate => &self.plan_date,
            ColumnRole::ActualDate => &self.actual_date,
        };
        slot.as_deref()
    }

    /// 设置角色对应的列名
    pub fn set(&mut self, role: ColumnRole, column: String) {
        let slot = match role {
            ColumnRole::Owner => &mut self.owner,
            ColumnRole::Process => &mut self.process,
            ColumnRole::Category => &mut self.category,
            ColumnRole::SubActivity => &mut self.sub_activity,
            ColumnRole::TargetDate => &mut self.target_date,
            ColumnRole::Status => &mut self.status,
            ColumnRole::Remark => &mut self.remark,
            ColumnRole::Task => &mut self.task,
            ColumnRole::MilestoneType => &mut self.milestone_type,
            ColumnRole::PlanDate => &mut self.plan_date,
            ColumnRole::ActualDate => &mut self.actual_date,
        };
        *slot = Some(column);
    }
}

// ==========================================
// 分类行 (Classified Rows)
// ==========================================

/// 就绪数据集的分类行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessRow {
    pub process: Option<String>,
    pub category: Option<String>,
    pub sub_activity: Option<String>,
    pub owner: Option<String>,
    /// 归一化后的目标日期,解析失败即缺失
    pub target_date: Option<NaiveDate>,
    pub status_text: Option<String>,
    pub remark: Option<String>,
    /// 本周期判定的最终状态
    pub status: ReadinessStatus,
}

/// 里程碑数据集的分类行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneRow {
    pub task: String,
    pub milestone_type: String,
    pub plan_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub status: MilestoneStatus,
}

// ==========================================
// 导出表 (Export Table)
// ==========================================

/// 扁平化的文本导出表: 表头 + 展示值
///
/// 分组键列已做连续重复折叠,底层数据值不受影响
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
