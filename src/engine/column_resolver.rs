// ==========================================
// 生产准备与里程碑跟踪看板 - 列角色解析器
// ==========================================
// 职责: 表头列名 → 语义角色映射（关键字包含式匹配）
// 红线: 同一列名列表必得同一映射（确定性）,不修改输入
// ==========================================

use crate::config::RoleKeywordTable;
use crate::domain::row::RoleMap;
use crate::domain::types::ColumnRole;

// ==========================================
// ColumnResolver - 列角色解析器
// ==========================================
pub struct ColumnResolver {
    table: RoleKeywordTable,
}

impl ColumnResolver {
    /// 创建解析器（关键字表来自配置层）
    pub fn new(table: RoleKeywordTable) -> Self {
        Self { table }
    }

    /// 使用内置默认关键字表
    pub fn with_defaults() -> Self {
        Self::new(RoleKeywordTable::default())
    }

    /// 解析列角色
    ///
    /// # 参数
    /// - columns: 去重后的有序列名列表（同名列已只保留首次出现）
    ///
    /// # 规则
    /// - 按关键字表顺序逐角色匹配,角色内按列名顺序取首个命中
    /// - 匹配为小写包含式,支持中英文同义词
    /// - 无命中的角色保持缺失;主类别角色（线体）兜底取第一列
    pub fn resolve(&self, columns: &[String]) -> RoleMap {
        let lowered: Vec<String> = columns.iter().map(|c| c.to_lowercase()).collect();

        let mut roles = RoleMap::default();
        for entry in &self.table.entries {
            let hit = lowered.iter().position(|name| {
                entry
                    .keywords
                    .iter()
                    .any(|kw| name.contains(&kw.to_lowercase()))
            });
            if let Some(idx) = hit {
                roles.set(entry.role, columns[idx].clone());
            }
        }

        // 主类别兜底: 无关键字命中时取第一列
        if roles.get(ColumnRole::Process).is_none() {
            if let Some(first) = columns.first() {
                roles.set(ColumnRole::Process, first.clone());
            }
        }

        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_resolve_english_headers() {
        let resolver = ColumnResolver::with_defaults();
        let columns = cols(&[
            "Process",
            "Category",
            "Sub Activity",
            "Owner",
            "Target Date",
            "Status",
            "Remark",
        ]);

        let roles = resolver.resolve(&columns);
        assert_eq!(roles.get(ColumnRole::Process), Some("Process"));
        assert_eq!(roles.get(ColumnRole::Category), Some("Category"));
        assert_eq!(roles.get(ColumnRole::SubActivity), Some("Sub Activity"));
        assert_eq!(roles.get(ColumnRole::Owner), Some("Owner"));
        assert_eq!(roles.get(ColumnRole::TargetDate), Some("Target Date"));
        assert_eq!(roles.get(ColumnRole::Status), Some("Status"));
        assert_eq!(roles.get(ColumnRole::Remark), Some("Remark"));
    }

    #[test]
    fn test_resolve_chinese_headers() {
        let resolver = ColumnResolver::with_defaults();
        let columns = cols(&["线体", "4M类别", "子活动", "负责人", "计划日期", "状态", "备注"]);

        let roles = resolver.resolve(&columns);
        assert_eq!(roles.get(ColumnRole::Process), Some("线体"));
        assert_eq!(roles.get(ColumnRole::Category), Some("4M类别"));
        assert_eq!(roles.get(ColumnRole::SubActivity), Some("子活动"));
        assert_eq!(roles.get(ColumnRole::Owner), Some("负责人"));
        assert_eq!(roles.get(ColumnRole::TargetDate), Some("计划日期"));
        assert_eq!(roles.get(ColumnRole::Status), Some("状态"));
        assert_eq!(roles.get(ColumnRole::Remark), Some("备注"));
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let resolver = ColumnResolver::with_defaults();
        // "Target Date" 与 "Due Date" 都命中目标日期关键字,取靠前者
        let columns = cols(&["Target Date", "Due Date", "Status"]);

        let roles = resolver.resolve(&columns);
        assert_eq!(roles.get(ColumnRole::TargetDate), Some("Target Date"));
    }

    #[test]
    fn test_resolve_case_insensitive_substring() {
        let resolver = ColumnResolver::with_defaults();
        let columns = cols(&["ITEM STATUS", "Person in charge"]);

        let roles = resolver.resolve(&columns);
        assert_eq!(roles.get(ColumnRole::Status), Some("ITEM STATUS"));
        assert_eq!(roles.get(ColumnRole::Owner), Some("Person in charge"));
    }

    #[test]
    fn test_resolve_missing_role_is_absent() {
        let resolver = ColumnResolver::with_defaults();
        let columns = cols(&["Status", "Owner"]);

        let roles = resolver.resolve(&columns);
        assert_eq!(roles.get(ColumnRole::Remark), None);
        assert_eq!(roles.get(ColumnRole::TargetDate), None);
    }

    #[test]
    fn test_resolve_process_defaults_to_first_column() {
        let resolver = ColumnResolver::with_defaults();
        let columns = cols(&["工位", "Status"]);

        let roles = resolver.resolve(&columns);
        // 无线体关键字命中时兜底取第一列
        assert_eq!(roles.get(ColumnRole::Process), Some("工位"));
    }

    #[test]
    fn test_resolve_empty_columns() {
        let resolver = ColumnResolver::with_defaults();
        let roles = resolver.resolve(&[]);
        assert_eq!(roles, RoleMap::default());
    }

    #[test]
    fn test_resolve_deterministic() {
        let resolver = ColumnResolver::with_defaults();
        let columns = cols(&["线体", "状态", "负责人", "计划日期"]);

        let first = resolver.resolve(&columns);
        let second = resolver.resolve(&columns);
        assert_eq!(first, second);
        // 输入不被修改
        assert_eq!(columns, cols(&["线体", "状态", "负责人", "计划日期"]));
    }
}
