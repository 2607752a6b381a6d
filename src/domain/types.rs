// ==========================================
// 生产准备与里程碑跟踪看板 - 领域类型定义
// ==========================================
// 职责: 列角色、状态标签、视角模式的闭集定义
// 红线: 视角过滤基于枚举成员关系,不做展示文本匹配
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 列角色 (Column Role)
// ==========================================
// 列所承担的语义角色,独立于表头的字面文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnRole {
    Owner,         // 负责人
    Process,       // 线体/工序 (主类别)
    Category,      // 类别
    SubActivity,   // 子活动/任务
    TargetDate,    // 目标日期
    Status,        // 状态文本
    Remark,        // 备注
    Task,          // 任务 (里程碑数据集)
    MilestoneType, // 里程碑类型
    PlanDate,      // 计划日期
    ActualDate,    // 实际日期
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Owner => write!(f, "OWNER"),
            ColumnRole::Process => write!(f, "PROCESS"),
            ColumnRole::Category => write!(f, "CATEGORY"),
            ColumnRole::SubActivity => write!(f, "SUB_ACTIVITY"),
            ColumnRole::TargetDate => write!(f, "TARGET_DATE"),
            ColumnRole::Status => write!(f, "STATUS"),
            ColumnRole::Remark => write!(f, "REMARK"),
            ColumnRole::Task => write!(f, "TASK"),
            ColumnRole::MilestoneType => write!(f, "MILESTONE_TYPE"),
            ColumnRole::PlanDate => write!(f, "PLAN_DATE"),
            ColumnRole::ActualDate => write!(f, "ACTUAL_DATE"),
        }
    }
}

// ==========================================
// 就绪状态 (Readiness Status)
// ==========================================
// 就绪数据集的状态闭集,每行必定归入其一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessStatus {
    Open,             // 未关闭,未逾期
    ClosedOnTime,     // 按期关闭
    ClosedLate,       // 逾期后关闭
    NotClosedDelayed, // 未关闭且已逾期
}

impl ReadinessStatus {
    /// 展示标签（渲染协作方的固定文案）
    pub fn label(&self) -> &'static str {
        match self {
            ReadinessStatus::Open => "Open",
            ReadinessStatus::ClosedOnTime => "Closed On Time",
            ReadinessStatus::ClosedLate => "Closed (Late)",
            ReadinessStatus::NotClosedDelayed => "NOT CLOSED – DELAYED!",
        }
    }

    /// 是否计入"仅看延期"视角
    pub fn is_delayed(&self) -> bool {
        matches!(self, ReadinessStatus::NotClosedDelayed)
    }

    /// 是否计入"仅看未关闭"视角
    pub fn is_open(&self) -> bool {
        matches!(self, ReadinessStatus::Open)
    }

    /// 是否计入"仅看已关闭"视角
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            ReadinessStatus::ClosedOnTime | ReadinessStatus::ClosedLate
        )
    }

    /// 状态色调（渲染协作方据此着色,核心不输出颜色值）
    pub fn tone(&self) -> StatusTone {
        match self {
            ReadinessStatus::NotClosedDelayed => StatusTone::Critical,
            ReadinessStatus::ClosedOnTime => StatusTone::Good,
            ReadinessStatus::Open => StatusTone::Attention,
            ReadinessStatus::ClosedLate => StatusTone::Neutral,
        }
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 里程碑状态 (Milestone Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneStatus {
    Pending,         // 未到期,无实际完成
    CompletedOnTime, // 按期完成
    Delayed,         // 完成晚于计划(或无计划)
    OverdueNoActual, // 计划已过期且无实际完成
}

impl MilestoneStatus {
    /// 展示标签
    pub fn label(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "Pending",
            MilestoneStatus::CompletedOnTime => "Completed On Time",
            MilestoneStatus::Delayed => "Delayed",
            MilestoneStatus::OverdueNoActual => "Overdue (No Actual)",
        }
    }

    /// 是否计入"仅看延期"视角（含逾期未完成）
    pub fn is_delayed(&self) -> bool {
        matches!(
            self,
            MilestoneStatus::Delayed | MilestoneStatus::OverdueNoActual
        )
    }

    /// 是否计入"仅看待办"视角
    pub fn is_pending(&self) -> bool {
        matches!(self, MilestoneStatus::Pending)
    }

    /// 是否计入"仅看已完成"视角
    pub fn is_completed(&self) -> bool {
        matches!(self, MilestoneStatus::CompletedOnTime)
    }

    /// 状态色调
    pub fn tone(&self) -> StatusTone {
        match self {
            MilestoneStatus::Delayed | MilestoneStatus::OverdueNoActual => StatusTone::Critical,
            MilestoneStatus::CompletedOnTime => StatusTone::Good,
            MilestoneStatus::Pending => StatusTone::Attention,
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 状态色调 (Status Tone)
// ==========================================
// 渲染协作方的着色依据,核心只给语义不给颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTone {
    Critical,  // 延期/逾期
    Good,      // 按期完成
    Attention, // 待办/未关闭
    Neutral,   // 其他
}

impl fmt::Display for StatusTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusTone::Critical => write!(f, "CRITICAL"),
            StatusTone::Good => write!(f, "GOOD"),
            StatusTone::Attention => write!(f, "ATTENTION"),
            StatusTone::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

// ==========================================
// 视角模式 (View Mode)
// ==========================================
// 用户选择的粗粒度状态过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewMode {
    #[default]
    All,         // 全部
    OnlyDelayed, // 仅延期/逾期
    OnlyOpen,    // 仅未关闭/待办
    OnlyClosed,  // 仅已关闭/已完成
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::All => write!(f, "ALL"),
            ViewMode::OnlyDelayed => write!(f, "ONLY_DELAYED"),
            ViewMode::OnlyOpen => write!(f, "ONLY_OPEN"),
            ViewMode::OnlyClosed => write!(f, "ONLY_CLOSED"),
        }
    }
}

// ==========================================
// 过滤选择 (Filter Selection)
// ==========================================
// 用户当前的过滤三元组,对核心是只读输入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// 负责人过滤,None = 全部
    pub owner: Option<String>,
    /// 分组过滤(就绪: 线体; 里程碑: 里程碑类型),None = 全部
    pub group: Option<String>,
    /// 视角模式
    pub view: ViewMode,
}

impl FilterSelection {
    /// 仅指定视角模式的过滤选择
    pub fn with_view(view: ViewMode) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_labels() {
        assert_eq!(ReadinessStatus::Open.label(), "Open");
        assert_eq!(ReadinessStatus::ClosedOnTime.label(), "Closed On Time");
        assert_eq!(ReadinessStatus::ClosedLate.label(), "Closed (Late)");
        assert_eq!(
            ReadinessStatus::NotClosedDelayed.label(),
            "NOT CLOSED – DELAYED!"
        );
    }

    #[test]
    fn test_readiness_view_sets_partition() {
        // 每个状态必属于 延期/未关闭/已关闭 三集合之一
        for status in [
            ReadinessStatus::Open,
            ReadinessStatus::ClosedOnTime,
            ReadinessStatus::ClosedLate,
            ReadinessStatus::NotClosedDelayed,
        ] {
            let memberships = [status.is_delayed(), status.is_open(), status.is_closed()];
            assert_eq!(memberships.iter().filter(|m| **m).count(), 1);
        }
    }

    #[test]
    fn test_milestone_view_sets_partition() {
        for status in [
            MilestoneStatus::Pending,
            MilestoneStatus::CompletedOnTime,
            MilestoneStatus::Delayed,
            MilestoneStatus::OverdueNoActual,
        ] {
            let memberships = [
                status.is_delayed(),
                status.is_pending(),
                status.is_completed(),
            ];
            assert_eq!(memberships.iter().filter(|m| **m).count(), 1);
        }
    }

    #[test]
    fn test_closed_late_tone_neutral() {
        // 逾期关闭不标红也不标绿
        assert_eq!(ReadinessStatus::ClosedLate.tone(), StatusTone::Neutral);
        assert_eq!(
            MilestoneStatus::OverdueNoActual.tone(),
            StatusTone::Critical
        );
    }

    #[test]
    fn test_default_filter_is_all() {
        let sel = FilterSelection::default();
        assert_eq!(sel.owner, None);
        assert_eq!(sel.group, None);
        assert_eq!(sel.view, ViewMode::All);
    }
}
