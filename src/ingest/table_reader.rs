// ==========================================
// 生产准备与里程碑跟踪看板 - 表格读取器
// ==========================================
// 支持: CSV 文本/文件、Excel (.xlsx/.xls)、无表头定长列
// 职责: 原始文本 → RawTable（去重表头/去全空行/占位符填充）
// ==========================================

use crate::domain::row::{RawTable, PLACEHOLDER};
use crate::ingest::error::{IngestError, IngestResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ==========================================
// 表格组装（各读取器共用）
// ==========================================

/// 表头去重: 保留首次出现的列名,后续同名列整列丢弃
///
/// 返回 (去重后的列名, 每个保留列对应的原始列下标)
fn dedup_headers(headers: &[String]) -> (Vec<String>, Vec<usize>) {
    let mut columns = Vec::new();
    let mut kept_indices = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if !columns.contains(name) {
            columns.push(name.clone());
            kept_indices.push(idx);
        }
    }
    (columns, kept_indices)
}

/// 由表头与数据行组装 RawTable
///
/// - 全空行删除
/// - 空白单元格填充占位符
fn assemble_table(headers: Vec<String>, data_rows: Vec<Vec<String>>) -> RawTable {
    let (columns, kept_indices) = dedup_headers(&headers);

    let mut rows = Vec::new();
    for cells in data_rows {
        // 仅看保留列判断是否全空
        let all_empty = kept_indices
            .iter()
            .all(|&idx| cells.get(idx).map(|c| c.trim().is_empty()).unwrap_or(true));
        if all_empty {
            continue;
        }

        let mut row_map = HashMap::new();
        for (col_pos, &src_idx) in kept_indices.iter().enumerate() {
            let raw = cells.get(src_idx).map(|c| c.trim()).unwrap_or("");
            let value = if raw.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                raw.to_string()
            };
            row_map.insert(columns[col_pos].clone(), value);
        }
        rows.push(row_map);
    }

    RawTable { columns, rows }
}

// ==========================================
// CSV 读取器
// ==========================================
pub struct CsvTableReader;

impl CsvTableReader {
    /// 解析带表头的 CSV 文本（数据源协作方交付的原始文本）
    pub fn read_text(&self, text: &str) -> IngestResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut data_rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            data_rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(assemble_table(headers, data_rows))
    }

    /// 解析无表头的 CSV 文本,按固定位置赋予列名
    ///
    /// # 参数
    /// - column_names: 固定位置列名,多余的原始列丢弃
    /// - skip_rows: 跳过开头的标题行数
    pub fn read_headerless_text(
        &self,
        text: &str,
        column_names: &[&str],
        skip_rows: usize,
    ) -> IngestResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = column_names.iter().map(|n| n.to_string()).collect();

        let mut data_rows = Vec::new();
        for result in reader.records().skip(skip_rows) {
            let record = result?;
            // 仅取前 N 列,行短缺的单元格组装时补占位符
            let cells: Vec<String> = record
                .iter()
                .take(column_names.len())
                .map(|v| v.to_string())
                .collect();
            data_rows.push(cells);
        }

        Ok(assemble_table(headers, data_rows))
    }

    /// 读取 CSV 文件
    pub fn read_file(&self, path: &Path) -> IngestResult<RawTable> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(IngestError::UnsupportedFormat(ext));
        }

        let text = fs::read_to_string(path)?;
        self.read_text(&text)
    }
}

// ==========================================
// Excel 读取器
// ==========================================
pub struct ExcelTableReader;

impl ExcelTableReader {
    /// 读取 Excel 文件的第一个工作表（首行为表头）
    pub fn read_file(&self, path: &Path) -> IngestResult<RawTable> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(IngestError::UnsupportedFormat(ext));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| IngestError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(IngestError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IngestError::ExcelParseError(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| IngestError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let data_rows: Vec<Vec<String>> = sheet_rows
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Ok(assemble_table(headers, data_rows))
    }
}

// ==========================================
// 通用读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalTableReader;

impl UniversalTableReader {
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> IngestResult<RawTable> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvTableReader.read_file(path),
            "xlsx" | "xls" => ExcelTableReader.read_file(path),
            _ => Err(IngestError::UnsupportedFormat(ext)),
        }
    }
}
