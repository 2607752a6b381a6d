// ==========================================
// 生产准备与里程碑跟踪看板 - 看板 API
// ==========================================
// 职责: 封装引擎层,提供整周期刷新与视图查询
// 架构: API 层 → 引擎层 (解析/归一化/分类/过滤)
// 红线: 每次刷新产出不可变快照;取数失败降级为空快照,不传播异常
// ==========================================

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::config::TrackerConfig;
use crate::domain::row::{ExportTable, MilestoneRow, RawTable, ReadinessRow, RoleMap, PLACEHOLDER};
use crate::domain::types::{ColumnRole, FilterSelection, StatusTone};
use crate::engine::{
    ColumnResolver, DateNormalizer, MilestoneClassifier, ReadinessClassifier, ViewFilter,
    MILESTONE_COLUMNS,
};
use crate::i18n;
use crate::ingest::{CsvTableReader, TableFeed, UniversalTableReader};

// 就绪导出表的固定列顺序与分组键标记
const READINESS_DISPLAY_ORDER: [(ColumnRole, bool); 7] = [
    (ColumnRole::Process, true),
    (ColumnRole::Category, true),
    (ColumnRole::SubActivity, false),
    (ColumnRole::Owner, false),
    (ColumnRole::TargetDate, false),
    (ColumnRole::Status, false),
    (ColumnRole::Remark, false),
];

// 分类结果列的表头
const FINAL_STATUS_HEADER: &str = "Final Status";

// ==========================================
// 快照与视图 DTO
// ==========================================

/// 就绪看板快照（一个刷新周期的全量分类结果,不可变）
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessSnapshot {
    pub snapshot_id: Uuid,
    /// 本周期判定所用的当日
    pub today: NaiveDate,
    /// 列角色解析结果
    pub roles: RoleMap,
    pub rows: Vec<ReadinessRow>,
}

/// 里程碑看板快照
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneSnapshot {
    pub snapshot_id: Uuid,
    pub today: NaiveDate,
    pub roles: RoleMap,
    pub rows: Vec<MilestoneRow>,
}

/// 就绪看板的过滤后视图
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessView {
    /// 可见行,保持快照内相对顺序,数据值未改动
    pub rows: Vec<ReadinessRow>,
    /// 可见行中延期行数,供预警
    pub delayed_count: usize,
    /// 扁平化导出表（分组键列已做连续重复折叠）
    pub export: ExportTable,
}

/// 里程碑看板的过滤后视图
#[derive(Debug, Clone, Serialize)]
pub struct MilestoneView {
    pub rows: Vec<MilestoneRow>,
    pub delayed_count: usize,
    pub export: ExportTable,
}

impl ReadinessView {
    /// 预警消息（本地化）
    pub fn alert_message(&self) -> String {
        alert_message(self.delayed_count)
    }

    /// 与 rows 平行的状态色调序列,供渲染协作方着色
    pub fn tones(&self) -> Vec<StatusTone> {
        self.rows.iter().map(|r| r.status.tone()).collect()
    }
}

impl MilestoneView {
    /// 预警消息（本地化）
    pub fn alert_message(&self) -> String {
        alert_message(self.delayed_count)
    }

    /// 与 rows 平行的状态色调序列
    pub fn tones(&self) -> Vec<StatusTone> {
        self.rows.iter().map(|r| r.status.tone()).collect()
    }
}

fn alert_message(delayed_count: usize) -> String {
    if delayed_count > 0 {
        i18n::t_with_args("dashboard.urgent_alert", &[("count", &delayed_count.to_string())])
    } else {
        i18n::t("dashboard.all_on_track")
    }
}

impl ReadinessSnapshot {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 应用过滤选择,产出渲染协作方所需的视图
    ///
    /// 每次调用独立重算展示值,上一视图的折叠状态不会残留
    pub fn view(&self, selection: &FilterSelection) -> ReadinessView {
        let visible = ViewFilter::filter_readiness(&self.rows, selection);
        let delayed_count = visible.iter().filter(|r| r.status.is_delayed()).count();
        let export = readiness_export(&self.roles, &visible);

        ReadinessView {
            rows: visible.into_iter().cloned().collect(),
            delayed_count,
            export,
        }
    }
}

impl MilestoneSnapshot {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 应用过滤选择,产出视图
    pub fn view(&self, selection: &FilterSelection) -> MilestoneView {
        let visible = ViewFilter::filter_milestone(&self.rows, selection);
        let delayed_count = visible.iter().filter(|r| r.status.is_delayed()).count();
        let export = milestone_export(&visible);

        MilestoneView {
            rows: visible.into_iter().cloned().collect(),
            delayed_count,
            export,
        }
    }
}

// ==========================================
// 导出表构建
// ==========================================

fn readiness_cell(row: &ReadinessRow, role: ColumnRole) -> String {
    let text = match role {
        ColumnRole::Process => row.process.clone(),
        ColumnRole::Category => row.category.clone(),
        ColumnRole::SubActivity => row.sub_activity.clone(),
        ColumnRole::Owner => row.owner.clone(),
        ColumnRole::TargetDate => row.target_date.map(|d| d.format("%Y-%m-%d").to_string()),
        ColumnRole::Status => row.status_text.clone(),
        ColumnRole::Remark => row.remark.clone(),
        _ => None,
    };
    text.unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// 就绪导出表: 固定列顺序,仅含已解析角色的列,末列为判定状态
fn readiness_export(roles: &RoleMap, visible: &[&ReadinessRow]) -> ExportTable {
    let mut headers = Vec::new();
    let mut columns: Vec<Vec<String>> = Vec::new();

    for (role, group_key) in READINESS_DISPLAY_ORDER {
        let Some(name) = roles.get(role) else {
            // 角色缺失 → 该列整体不出现
            continue;
        };
        let mut values: Vec<String> = visible.iter().map(|r| readiness_cell(r, role)).collect();
        if group_key {
            values = ViewFilter::collapse_consecutive(&values);
        }
        headers.push(name.to_string());
        columns.push(values);
    }

    headers.push(FINAL_STATUS_HEADER.to_string());
    columns.push(visible.iter().map(|r| r.status.to_string()).collect());

    zip_columns(headers, columns, visible.len())
}

/// 里程碑导出表: 固定四列 + 状态,任务列做连续重复折叠,日期按 日-月缩写 展示
fn milestone_export(visible: &[&MilestoneRow]) -> ExportTable {
    let format_date =
        |d: Option<NaiveDate>| d.map(|d| d.format("%d-%b").to_string()).unwrap_or_else(|| PLACEHOLDER.to_string());

    let task_values: Vec<String> = visible.iter().map(|r| r.task.clone()).collect();
    let columns = vec![
        ViewFilter::collapse_consecutive(&task_values),
        visible.iter().map(|r| r.milestone_type.clone()).collect(),
        visible.iter().map(|r| format_date(r.plan_date)).collect(),
        visible.iter().map(|r| format_date(r.actual_date)).collect(),
        visible.iter().map(|r| r.status.to_string()).collect(),
    ];

    let mut headers: Vec<String> = MILESTONE_COLUMNS.iter().map(|c| c.to_string()).collect();
    headers.push("Status".to_string());

    zip_columns(headers, columns, visible.len())
}

/// 列式数据转行式导出表
fn zip_columns(headers: Vec<String>, columns: Vec<Vec<String>>, row_count: usize) -> ExportTable {
    let rows = (0..row_count)
        .map(|i| columns.iter().map(|col| col[i].clone()).collect())
        .collect();
    ExportTable { headers, rows }
}

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 职责:
/// 1. 整周期刷新: 原始表格 → 解析列角色 → 归一化日期 → 分类 → 快照
/// 2. 从取数协作方拉取并刷新（失败降级为空快照）
/// 3. 文件加载入口（演示/离线数据）
pub struct DashboardApi {
    config: TrackerConfig,
    resolver: ColumnResolver,
    readiness: ReadinessClassifier,
    milestone: MilestoneClassifier,
}

impl DashboardApi {
    /// 创建看板API实例
    pub fn new(config: TrackerConfig) -> Self {
        let resolver = ColumnResolver::new(config.role_keywords.clone());
        let readiness = ReadinessClassifier::new(&config.classifier);
        Self {
            config,
            resolver,
            readiness,
            milestone: MilestoneClassifier::new(),
        }
    }

    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self::new(TrackerConfig::default())
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// 就绪看板刷新（带表头数据集）
    ///
    /// 整批重解析、重归一化、重分类;零行表格产出合法的空快照
    #[instrument(skip(self, table), fields(rows = table.rows.len()))]
    pub fn refresh_readiness(&self, table: &RawTable, today: NaiveDate) -> ReadinessSnapshot {
        let roles = self.resolver.resolve(&table.columns);
        let normalizer = DateNormalizer::for_today(today, self.config.classifier.day_first);
        let rows = self.readiness.derive_rows(table, &roles, &normalizer, today);

        ReadinessSnapshot {
            snapshot_id: Uuid::new_v4(),
            today,
            roles,
            rows,
        }
    }

    /// 里程碑看板刷新（无表头数据集,固定位置列）
    #[instrument(skip(self, table), fields(rows = table.rows.len()))]
    pub fn refresh_milestone(&self, table: &RawTable, today: NaiveDate) -> MilestoneSnapshot {
        let normalizer = DateNormalizer::for_today(today, self.config.classifier.day_first);
        let rows = self.milestone.derive_rows(table, &normalizer, today);

        MilestoneSnapshot {
            snapshot_id: Uuid::new_v4(),
            today,
            roles: MilestoneClassifier::positional_roles(),
            rows,
        }
    }

    /// 从取数协作方拉取并刷新就绪看板
    ///
    /// 获取或解析失败 → 空数据集（本周期合法终态）,只记日志
    pub async fn refresh_readiness_from_feed(
        &self,
        feed: &dyn TableFeed,
        today: NaiveDate,
    ) -> ReadinessSnapshot {
        let table = match feed.fetch_csv().await {
            Ok(text) => match CsvTableReader.read_text(&text) {
                Ok(table) => table,
                Err(e) => {
                    warn!("数据解析失败,降级为空数据集: {}", e);
                    RawTable::empty()
                }
            },
            Err(e) => {
                warn!("数据源获取失败,降级为空数据集: {}", e);
                RawTable::empty()
            }
        };
        self.refresh_readiness(&table, today)
    }

    /// 从取数协作方拉取并刷新里程碑看板
    ///
    /// 原始文本无表头,跳过首行标题,按固定位置取前四列
    pub async fn refresh_milestone_from_feed(
        &self,
        feed: &dyn TableFeed,
        today: NaiveDate,
    ) -> MilestoneSnapshot {
        let table = match feed.fetch_csv().await {
            Ok(text) => match CsvTableReader.read_headerless_text(&text, &MILESTONE_COLUMNS, 1) {
                Ok(table) => table,
                Err(e) => {
                    warn!("数据解析失败,降级为空数据集: {}", e);
                    RawTable::empty()
                }
            },
            Err(e) => {
                warn!("数据源获取失败,降级为空数据集: {}", e);
                RawTable::empty()
            }
        };
        self.refresh_milestone(&table, today)
    }

    /// 加载带表头的本地表格文件（CSV/Excel）
    pub fn load_table_from_file(&self, path: &Path) -> ApiResult<RawTable> {
        Ok(UniversalTableReader.read_file(path)?)
    }

    /// 加载无表头的本地里程碑 CSV 文件
    pub fn load_milestone_file(&self, path: &Path) -> ApiResult<RawTable> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| crate::ingest::IngestError::FileReadError(e.to_string()))?;
        Ok(CsvTableReader.read_headerless_text(&text, &MILESTONE_COLUMNS, 1)?)
    }
}
