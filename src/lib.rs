// ordered_fanout - 並行ディスパッチと順序復元
//
// レイヤー構成:
// - core: 型、トレイト、エラー、レポート
// - engine: ディスパッチャ、完了ゲート、順序復元、パイプライン
// - services: Executor、到着表示、レポート出力、設定
// - cli: コマンドライン

pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

pub use crate::core::{
    ExecutionFailure, Executor, FanoutConfig, FanoutError, FanoutResult, Outcome, OutcomeObserver,
    ReportSink, RunReport, RunSummary, WorkItem,
};
pub use crate::engine::{
    DispatchPhase, Dispatcher, FanoutEngine, FanoutPipeline, Reassembler, CANCELLED_REASON,
};
pub use crate::services::{
    ConsoleOutcomeObserver, ConsoleReportSink, DefaultFanoutConfig, FanoutSettings,
    JsonReportSink, MemoryReportSink, NoOpOutcomeObserver, ScriptedExecutor, SimulatedExecutor,
    SimulationSettings,
};
