// ==========================================
// 生产准备与里程碑跟踪看板 - 就绪状态引擎
// ==========================================
// 职责: 从原始表格派生就绪分类行（带表头数据集）
// 红线: 行内判定,无跨行状态;状态是时间的函数,每周期以当日重算
// ==========================================

use crate::config::ClassifierProfile;
use crate::domain::row::{cell_value, RawTable, ReadinessRow, RoleMap};
use crate::domain::types::{ColumnRole, ReadinessStatus};
use crate::engine::date_normalizer::DateNormalizer;
use chrono::NaiveDate;
use tracing::instrument;

// ==========================================
// ReadinessClassifier - 就绪状态分类器
// ==========================================
pub struct ReadinessClassifier {
    // 已小写化的关闭同义词,匹配时免重复转换
    closed_synonyms: Vec<String>,
}

impl ReadinessClassifier {
    /// 创建分类器（同义词来自配置层）
    pub fn new(profile: &ClassifierProfile) -> Self {
        Self {
            closed_synonyms: profile
                .closed_synonyms
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        }
    }

    /// 使用内置默认参数
    pub fn with_defaults() -> Self {
        Self::new(&ClassifierProfile::default())
    }

    /// 判定单行状态（纯函数）
    ///
    /// # 参数
    /// - status_text: 状态列原文,缺失视为未关闭
    /// - target: 归一化后的目标日期
    /// - today: 当日（已归零到零点粒度的日历日）
    ///
    /// # 规则（命中即返回）
    /// 1) 已关闭 且 未逾期 → 按期关闭
    /// 2) 已关闭 且 已逾期 → 逾期关闭
    /// 3) 未关闭 且 已逾期 → 延期
    /// 4) 其他 → 未关闭
    pub fn classify(
        &self,
        status_text: Option<&str>,
        target: Option<NaiveDate>,
        today: NaiveDate,
    ) -> ReadinessStatus {
        let closed = match status_text {
            Some(text) => {
                let normalized = text.trim().to_lowercase();
                self.closed_synonyms.contains(&normalized)
            }
            None => false,
        };
        let overdue = match target {
            Some(t) => t < today,
            None => false,
        };

        match (closed, overdue) {
            (true, false) => ReadinessStatus::ClosedOnTime,
            (true, true) => ReadinessStatus::ClosedLate,
            (false, true) => ReadinessStatus::NotClosedDelayed,
            (false, false) => ReadinessStatus::Open,
        }
    }

    /// 整批派生分类行（每个刷新周期全量重算）
    ///
    /// 角色缺失的字段保持缺失,不影响其余字段与判定
    #[instrument(skip(self, table, roles, normalizer), fields(rows = table.rows.len()))]
    pub fn derive_rows(
        &self,
        table: &RawTable,
        roles: &RoleMap,
        normalizer: &DateNormalizer,
        today: NaiveDate,
    ) -> Vec<ReadinessRow> {
        table
            .rows
            .iter()
            .map(|row| {
                // 步骤 1: 按角色取值（缺失角色 → 缺失值）
                let field = |role: ColumnRole| roles.get(role).and_then(|col| cell_value(row, col));
                let process = field(ColumnRole::Process);
                let category = field(ColumnRole::Category);
                let sub_activity = field(ColumnRole::SubActivity);
                let owner = field(ColumnRole::Owner);
                let status_text = field(ColumnRole::Status);
                let remark = field(ColumnRole::Remark);

                // 步骤 2: 归一化目标日期（单格解析失败只影响该格）
                let target_date = field(ColumnRole::TargetDate)
                    .and_then(|raw| normalizer.normalize(&raw));

                // 步骤 3: 判定状态
                let status = self.classify(status_text.as_deref(), target_date, today);

                ReadinessRow {
                    process,
                    category,
                    sub_activity,
                    owner,
                    target_date,
                    status_text,
                    remark,
                    status,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_closed_past_target_is_closed_late() {
        let classifier = ReadinessClassifier::with_defaults();
        let status = classifier.classify(
            Some("Closed"),
            Some(date(2024, 1, 1)),
            date(2024, 6, 1),
        );
        assert_eq!(status, ReadinessStatus::ClosedLate);
    }

    #[test]
    fn test_open_past_target_is_delayed() {
        let classifier = ReadinessClassifier::with_defaults();
        let status = classifier.classify(None, Some(date(2024, 1, 1)), date(2024, 6, 1));
        assert_eq!(status, ReadinessStatus::NotClosedDelayed);
    }

    #[test]
    fn test_closed_without_target_is_on_time() {
        let classifier = ReadinessClassifier::with_defaults();
        let status = classifier.classify(Some("Closed"), None, date(2024, 6, 1));
        assert_eq!(status, ReadinessStatus::ClosedOnTime);
    }

    #[test]
    fn test_closed_synonyms_case_and_whitespace() {
        let classifier = ReadinessClassifier::with_defaults();
        let today = date(2024, 6, 1);
        for text in ["closed", "CLOSE", "  Done ", "YES", "ok", "完成"] {
            assert_eq!(
                classifier.classify(Some(text), None, today),
                ReadinessStatus::ClosedOnTime,
                "应判定为已关闭: {:?}",
                text
            );
        }
        // 非同义词不算关闭
        assert_eq!(
            classifier.classify(Some("closing"), None, today),
            ReadinessStatus::Open
        );
    }

    #[test]
    fn test_target_today_is_not_overdue() {
        // 目标日等于当日不算逾期
        let classifier = ReadinessClassifier::with_defaults();
        let status = classifier.classify(None, Some(date(2024, 6, 1)), date(2024, 6, 1));
        assert_eq!(status, ReadinessStatus::Open);
    }

    #[test]
    fn test_classification_idempotent() {
        let classifier = ReadinessClassifier::with_defaults();
        let today = date(2024, 6, 1);
        let first = classifier.classify(Some("Closed"), Some(date(2024, 1, 1)), today);
        let second = classifier.classify(Some("Closed"), Some(date(2024, 1, 1)), today);
        assert_eq!(first, second);
    }

    #[test]
    fn test_advancing_today_flips_exactly_once() {
        // 目标日固定,推进当日仅发生一次 未关闭 → 延期 翻转,且不回翻
        let classifier = ReadinessClassifier::with_defaults();
        let target = date(2024, 5, 1);

        let mut flips = 0;
        let mut prev = classifier.classify(None, Some(target), date(2024, 4, 25));
        for offset in 1..20 {
            let today = date(2024, 4, 25) + chrono::Duration::days(offset);
            let current = classifier.classify(None, Some(target), today);
            if current != prev {
                flips += 1;
                assert_eq!(current, ReadinessStatus::NotClosedDelayed);
            }
            prev = current;
        }
        assert_eq!(flips, 1);
    }

    #[test]
    fn test_derive_rows_with_missing_roles() {
        use std::collections::HashMap;

        let classifier = ReadinessClassifier::with_defaults();
        let normalizer = DateNormalizer::new(2024, true);

        let mut row = HashMap::new();
        row.insert("状态".to_string(), "Closed".to_string());
        let table = RawTable {
            columns: vec!["状态".to_string()],
            rows: vec![row],
        };
        let mut roles = RoleMap::default();
        roles.set(ColumnRole::Status, "状态".to_string());

        let rows = classifier.derive_rows(&table, &roles, &normalizer, date(2024, 6, 1));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, ReadinessStatus::ClosedOnTime);
        assert_eq!(rows[0].owner, None);
        assert_eq!(rows[0].target_date, None);
    }

    #[test]
    fn test_derive_rows_bad_date_cell_only_degrades_itself() {
        use std::collections::HashMap;

        let classifier = ReadinessClassifier::with_defaults();
        let normalizer = DateNormalizer::new(2024, true);

        let mut row = HashMap::new();
        row.insert("计划日期".to_string(), "TBD".to_string());
        row.insert("状态".to_string(), "Open".to_string());
        let table = RawTable {
            columns: vec!["计划日期".to_string(), "状态".to_string()],
            rows: vec![row],
        };
        let mut roles = RoleMap::default();
        roles.set(ColumnRole::TargetDate, "计划日期".to_string());
        roles.set(ColumnRole::Status, "状态".to_string());

        let rows = classifier.derive_rows(&table, &roles, &normalizer, date(2024, 6, 1));
        assert_eq!(rows[0].target_date, None);
        // 日期缺失时不可能逾期
        assert_eq!(rows[0].status, ReadinessStatus::Open);
    }
}
