// ==========================================
// 生产准备与里程碑跟踪看板 - 日期归一化器
// ==========================================
// 职责: 异构日期文本 → 日历日期或显式缺失
// 红线: 纯函数且全域——任何输入只得日期或缺失,绝不报错
// ==========================================

use crate::domain::row::PLACEHOLDER;
use chrono::{Datelike, NaiveDate};

// 日在前口径的候选格式,按序尝试
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d/%b/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%b-%d-%Y",
];

// 月在前口径的候选格式
const MONTH_FIRST_FORMATS: &[&str] = &[
    "%b-%d-%Y",
    "%B-%d-%Y",
    "%m-%d-%Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%b/%d/%Y",
    "%Y/%m/%d",
    "%m.%d.%Y",
    "%d-%b-%Y",
];

// ==========================================
// DateNormalizer - 日期归一化器
// ==========================================
pub struct DateNormalizer {
    reference_year: i32,
    day_first: bool,
}

impl DateNormalizer {
    /// 创建归一化器
    ///
    /// # 参数
    /// - reference_year: 无年份文本的补全年份
    /// - day_first: 歧义日月顺序按日在前解释
    pub fn new(reference_year: i32, day_first: bool) -> Self {
        Self {
            reference_year,
            day_first,
        }
    }

    /// 以"今天"所在年份为参考年
    pub fn for_today(today: NaiveDate, day_first: bool) -> Self {
        Self::new(today.year(), day_first)
    }

    /// 归一化日期文本
    ///
    /// # 规则
    /// - 占位符或空白 → 缺失
    /// - 恰好一个 '-' 分出两段（日-月缩写,无年份）→ 追加参考年后解析
    /// - 其他文本 → 直接按日月口径解析
    /// - 解析失败 → 缺失
    pub fn normalize(&self, raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        if s.is_empty() || s == PLACEHOLDER {
            return None;
        }

        // 年份补全
        if s.matches('-').count() == 1 {
            return self.parse_with_formats(&format!("{}-{}", s, self.reference_year));
        }

        self.parse_with_formats(s)
    }

    fn parse_with_formats(&self, s: &str) -> Option<NaiveDate> {
        let formats = if self.day_first {
            DAY_FIRST_FORMATS
        } else {
            MONTH_FIRST_FORMATS
        };
        formats
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    }
}
