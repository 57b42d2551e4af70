// サービス層 - 機能別の実装
// 各サービスは特定の責任を持ち、コアのトレイトを通じて疎結合で利用される

pub mod config;
pub mod executor;
pub mod monitoring;
pub mod reporting;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{DefaultFanoutConfig, FanoutSettings, DEFAULT_TARGETS};
pub use executor::{ScriptedExecutor, SimulatedExecutor, SimulationSettings};
pub use monitoring::{ConsoleOutcomeObserver, NoOpOutcomeObserver};
pub use reporting::{
    CompositeReportSink, ConsoleReportSink, JsonReportSink, MemoryReportSink, OutcomeRecord,
    ReportDocument,
};
