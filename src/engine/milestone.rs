// ==========================================
// 生产准备与里程碑跟踪看板 - 里程碑状态引擎
// ==========================================
// 职责: 从原始表格派生里程碑分类行（无表头数据集,固定位置列）
// 红线: 行内判定,无跨行状态;每周期以当日整批重算
// ==========================================

use crate::domain::row::{cell_value, MilestoneRow, RawTable, RoleMap, PLACEHOLDER};
use crate::domain::types::{ColumnRole, MilestoneStatus};
use crate::engine::date_normalizer::DateNormalizer;
use chrono::NaiveDate;
use tracing::instrument;

// 无表头数据集的固定位置列名
pub const COL_TASK: &str = "Task";
pub const COL_MILESTONE_TYPE: &str = "Milestone Type";
pub const COL_PLAN_DATE: &str = "Plan Date";
pub const COL_ACTUAL_DATE: &str = "Actual Date";

/// 固定位置列名,按原始表格的列顺序
pub const MILESTONE_COLUMNS: [&str; 4] = [COL_TASK, COL_MILESTONE_TYPE, COL_PLAN_DATE, COL_ACTUAL_DATE];

// ==========================================
// MilestoneClassifier - 里程碑状态分类器
// ==========================================
pub struct MilestoneClassifier;

impl MilestoneClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 无表头变体的固定角色映射
    pub fn positional_roles() -> RoleMap {
        let mut roles = RoleMap::default();
        roles.set(ColumnRole::Task, COL_TASK.to_string());
        roles.set(ColumnRole::MilestoneType, COL_MILESTONE_TYPE.to_string());
        roles.set(ColumnRole::PlanDate, COL_PLAN_DATE.to_string());
        roles.set(ColumnRole::ActualDate, COL_ACTUAL_DATE.to_string());
        roles
    }

    /// 判定单个里程碑状态（纯函数）
    ///
    /// # 规则（命中即返回）
    /// 1) 有实际 且 有计划 且 实际 ≤ 计划 → 按期完成
    /// 2) 有实际 且 (无计划 或 实际 > 计划) → 延期
    /// 3) 无实际 且 有计划 且 计划 < 当日 → 逾期未完成
    /// 4) 其他 → 待办
    pub fn classify(
        &self,
        plan: Option<NaiveDate>,
        actual: Option<NaiveDate>,
        today: NaiveDate,
    ) -> MilestoneStatus {
        match (actual, plan) {
            (Some(a), Some(p)) if a <= p => MilestoneStatus::CompletedOnTime,
            (Some(_), _) => MilestoneStatus::Delayed,
            (None, Some(p)) if p < today => MilestoneStatus::OverdueNoActual,
            _ => MilestoneStatus::Pending,
        }
    }

    /// 整批派生分类行
    #[instrument(skip(self, table, normalizer), fields(rows = table.rows.len()))]
    pub fn derive_rows(
        &self,
        table: &RawTable,
        normalizer: &DateNormalizer,
        today: NaiveDate,
    ) -> Vec<MilestoneRow> {
        table
            .rows
            .iter()
            .map(|row| {
                // 步骤 1: 取任务与类型（展示保留占位符原文）
                let task = row
                    .get(COL_TASK)
                    .cloned()
                    .unwrap_or_else(|| PLACEHOLDER.to_string());
                let milestone_type = row
                    .get(COL_MILESTONE_TYPE)
                    .cloned()
                    .unwrap_or_else(|| PLACEHOLDER.to_string());

                // 步骤 2: 归一化计划/实际日期
                let plan_date =
                    cell_value(row, COL_PLAN_DATE).and_then(|raw| normalizer.normalize(&raw));
                let actual_date =
                    cell_value(row, COL_ACTUAL_DATE).and_then(|raw| normalizer.normalize(&raw));

                // 步骤 3: 判定状态
                let status = self.classify(plan_date, actual_date, today);

                MilestoneRow {
                    task,
                    milestone_type,
                    plan_date,
                    actual_date,
                    status,
                }
            })
            .collect()
    }
}

impl Default for MilestoneClassifier {
    fn default() -> Self {
        Self::new()
    }
}
