// ==========================================
// 生产准备与里程碑跟踪看板 - 命令行入口
// ==========================================
// 职责: 离线加载本地表格文件,刷新一个周期并打印视图
// 说明: 远端取数与定时刷新由外部协作方承担,此入口仅做演示与排查
// ==========================================

use std::path::Path;
use std::process;

use readiness_tracker::{
    DashboardApi, ExportTable, FilterSelection, TrackerConfig, APP_NAME, VERSION,
};

fn main() {
    // 初始化日志系统
    readiness_tracker::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("用法: readiness-tracker <readiness|milestone> <表格文件>");
        process::exit(2);
    }
    let mode = args[1].as_str();
    let path = Path::new(&args[2]);

    let config = TrackerConfig::load_or_default(None);
    let api = DashboardApi::new(config);
    let today = chrono::Local::now().date_naive();
    let selection = FilterSelection::default();

    match mode {
        "readiness" => {
            let table = match api.load_table_from_file(path) {
                Ok(table) => table,
                Err(e) => {
                    tracing::error!("表格加载失败: {}", e);
                    process::exit(1);
                }
            };
            let snapshot = api.refresh_readiness(&table, today);
            if snapshot.is_empty() {
                tracing::warn!("{}", readiness_tracker::i18n::t("dashboard.no_data"));
            }
            let view = snapshot.view(&selection);
            println!("{}", view.alert_message());
            print_table(&view.export);
        }
        "milestone" => {
            let table = match api.load_milestone_file(path) {
                Ok(table) => table,
                Err(e) => {
                    tracing::error!("表格加载失败: {}", e);
                    process::exit(1);
                }
            };
            let snapshot = api.refresh_milestone(&table, today);
            if snapshot.is_empty() {
                tracing::warn!("{}", readiness_tracker::i18n::t("dashboard.no_data"));
            }
            let view = snapshot.view(&selection);
            println!("{}", view.alert_message());
            print_table(&view.export);
        }
        other => {
            eprintln!("未知看板类型: {}（可选: readiness / milestone）", other);
            process::exit(2);
        }
    }
}

/// 按列宽对齐打印导出表
fn print_table(table: &ExportTable) {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let print_row = |cells: &[String]| {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:width$}", cell, width = *w))
            .collect();
        println!("| {} |", line.join(" | "));
    };

    print_row(&table.headers);
    println!(
        "|{}|",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("|")
    );
    for row in &table.rows {
        print_row(row);
    }
}
