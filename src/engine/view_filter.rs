// ==========================================
// 生产准备与里程碑跟踪看板 - 视图过滤器
// ==========================================
// 职责: 过滤分类行 + 分组键列的连续重复折叠
// 红线: 视角匹配基于状态枚举成员关系;折叠累积器每次调用复位
// ==========================================

use crate::domain::row::{MilestoneRow, ReadinessRow};
use crate::domain::types::{FilterSelection, ViewMode};

// ==========================================
// ViewFilter - 视图过滤器
// ==========================================
pub struct ViewFilter;

impl ViewFilter {
    /// 过滤就绪分类行,保持原始相对顺序
    ///
    /// - 负责人/线体过滤: 精确相等,未选择则跳过;字段缺失的行不命中等值过滤
    /// - 视角过滤: 按状态枚举的集合成员关系
    pub fn filter_readiness<'a>(
        rows: &'a [ReadinessRow],
        selection: &FilterSelection,
    ) -> Vec<&'a ReadinessRow> {
        rows.iter()
            .filter(|row| {
                let owner_ok = match selection.owner.as_deref() {
                    Some(owner) => row.owner.as_deref() == Some(owner),
                    None => true,
                };
                let group_ok = match selection.group.as_deref() {
                    Some(group) => row.process.as_deref() == Some(group),
                    None => true,
                };
                owner_ok && group_ok && Self::readiness_visible(row, selection.view)
            })
            .collect()
    }

    fn readiness_visible(row: &ReadinessRow, view: ViewMode) -> bool {
        match view {
            ViewMode::All => true,
            ViewMode::OnlyDelayed => row.status.is_delayed(),
            ViewMode::OnlyOpen => row.status.is_open(),
            ViewMode::OnlyClosed => row.status.is_closed(),
        }
    }

    /// 过滤里程碑分类行,保持原始相对顺序
    ///
    /// 里程碑数据集无负责人角色,负责人过滤走显式缺失分支（跳过）
    pub fn filter_milestone<'a>(
        rows: &'a [MilestoneRow],
        selection: &FilterSelection,
    ) -> Vec<&'a MilestoneRow> {
        rows.iter()
            .filter(|row| {
                let group_ok = match selection.group.as_deref() {
                    Some(group) => row.milestone_type == group,
                    None => true,
                };
                group_ok && Self::milestone_visible(row, selection.view)
            })
            .collect()
    }

    fn milestone_visible(row: &MilestoneRow, view: ViewMode) -> bool {
        match view {
            ViewMode::All => true,
            ViewMode::OnlyDelayed => row.status.is_delayed(),
            ViewMode::OnlyOpen => row.status.is_pending(),
            ViewMode::OnlyClosed => row.status.is_completed(),
        }
    }

    /// 连续重复折叠: 与过滤后序列中前一行相同的值展示为空串
    ///
    /// 折叠状态只在本次调用内存续,换一次过滤就从首行重新累计;
    /// 底层数据值不受影响,只改展示值。
    pub fn collapse_consecutive(values: &[String]) -> Vec<String> {
        let mut display = Vec::with_capacity(values.len());
        let mut prev: Option<&str> = None;
        for value in values {
            if prev == Some(value.as_str()) {
                display.push(String::new());
            } else {
                display.push(value.clone());
            }
            prev = Some(value.as_str());
        }
        display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{MilestoneStatus, ReadinessStatus};
    use chrono::NaiveDate;

    fn readiness_row(owner: &str, process: &str, status: ReadinessStatus) -> ReadinessRow {
        ReadinessRow {
            process: Some(process.to_string()),
            category: None,
            sub_activity: None,
            owner: Some(owner.to_string()),
            target_date: None,
            status_text: None,
            remark: None,
            status,
        }
    }

    fn milestone_row(task: &str, milestone_type: &str, status: MilestoneStatus) -> MilestoneRow {
        MilestoneRow {
            task: task.to_string(),
            milestone_type: milestone_type.to_string(),
            plan_date: NaiveDate::from_ymd_opt(2024, 11, 1),
            actual_date: None,
            status,
        }
    }

    #[test]
    fn test_collapse_consecutive_duplicates() {
        let values: Vec<String> = ["A", "A", "B", "A"].iter().map(|s| s.to_string()).collect();
        let display = ViewFilter::collapse_consecutive(&values);
        assert_eq!(display, vec!["A", "", "B", "A"]);
    }

    #[test]
    fn test_collapse_resets_per_invocation() {
        let values: Vec<String> = ["A"].iter().map(|s| s.to_string()).collect();
        // 前一次调用的末值不得影响下一次调用
        let first = ViewFilter::collapse_consecutive(&values);
        let second = ViewFilter::collapse_consecutive(&values);
        assert_eq!(first, vec!["A"]);
        assert_eq!(second, vec!["A"]);
    }

    #[test]
    fn test_only_delayed_exact_subsequence() {
        let rows = vec![
            readiness_row("张三", "SMT", ReadinessStatus::Open),
            readiness_row("李四", "SMT", ReadinessStatus::NotClosedDelayed),
            readiness_row("张三", "组装", ReadinessStatus::ClosedLate),
            readiness_row("王五", "组装", ReadinessStatus::NotClosedDelayed),
        ];
        let selection = FilterSelection::with_view(ViewMode::OnlyDelayed);

        let visible = ViewFilter::filter_readiness(&rows, &selection);
        // 只含延期行;逾期关闭不算延期视角;相对顺序保持
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].owner.as_deref(), Some("李四"));
        assert_eq!(visible[1].owner.as_deref(), Some("王五"));
    }

    #[test]
    fn test_only_closed_includes_closed_late() {
        let rows = vec![
            readiness_row("张三", "SMT", ReadinessStatus::ClosedOnTime),
            readiness_row("李四", "SMT", ReadinessStatus::ClosedLate),
            readiness_row("王五", "SMT", ReadinessStatus::Open),
        ];
        let selection = FilterSelection::with_view(ViewMode::OnlyClosed);

        let visible = ViewFilter::filter_readiness(&rows, &selection);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_owner_and_group_equality_filters() {
        let rows = vec![
            readiness_row("张三", "SMT", ReadinessStatus::Open),
            readiness_row("张三", "组装", ReadinessStatus::Open),
            readiness_row("李四", "SMT", ReadinessStatus::Open),
        ];
        let selection = FilterSelection {
            owner: Some("张三".to_string()),
            group: Some("SMT".to_string()),
            view: ViewMode::All,
        };

        let visible = ViewFilter::filter_readiness(&rows, &selection);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].process.as_deref(), Some("SMT"));
    }

    #[test]
    fn test_owner_filter_skips_rows_with_absent_owner() {
        let mut anonymous = readiness_row("张三", "SMT", ReadinessStatus::Open);
        anonymous.owner = None;
        let rows = vec![anonymous, readiness_row("张三", "SMT", ReadinessStatus::Open)];
        let selection = FilterSelection {
            owner: Some("张三".to_string()),
            group: None,
            view: ViewMode::All,
        };

        let visible = ViewFilter::filter_readiness(&rows, &selection);
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn test_milestone_type_filter_and_views() {
        let rows = vec![
            milestone_row("PCBA", "WBS", MilestoneStatus::OverdueNoActual),
            milestone_row("整机", "Sub Milestone", MilestoneStatus::Pending),
            milestone_row("试产", "WBS", MilestoneStatus::CompletedOnTime),
        ];

        let selection = FilterSelection {
            owner: None,
            group: Some("WBS".to_string()),
            view: ViewMode::All,
        };
        assert_eq!(ViewFilter::filter_milestone(&rows, &selection).len(), 2);

        let delayed = FilterSelection::with_view(ViewMode::OnlyDelayed);
        let visible = ViewFilter::filter_milestone(&rows, &delayed);
        // 逾期未完成计入延期视角
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].task, "PCBA");
    }
}
