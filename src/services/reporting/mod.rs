// レポート出力機能
// インデックス順に確定した結果の集計と出力

pub mod composite;
pub mod console;
pub mod json;
pub mod memory;

// 公開API
pub use composite::CompositeReportSink;
pub use console::{render_report, ConsoleReportSink};
pub use json::{JsonReportSink, OutcomeRecord, ReportDocument};
pub use memory::MemoryReportSink;
