// ==========================================
// 生产准备与里程碑跟踪看板 - 取数层
// ==========================================
// 职责: 外部表格数据 → RawTable
// 支持: CSV 文本/文件、Excel、无表头定长列
// ==========================================

// 模块声明
pub mod error;
pub mod feed;
pub mod table_reader;

// 重导出核心类型
pub use error::{IngestError, IngestResult};
pub use feed::{StaticTableFeed, TableFeed};
pub use table_reader::{CsvTableReader, ExcelTableReader, UniversalTableReader};
