// 実行サービス - WorkItem 1件を処理するExecutor実装

pub mod scripted;
pub mod simulated;

// 公開API
pub use scripted::ScriptedExecutor;
pub use simulated::{SimulatedExecutor, SimulationSettings};
