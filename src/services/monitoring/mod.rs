// 到着状況監視機能
// 到着順のライブ表示とインデックス順の解放通知

pub mod implementations;

// 公開API
pub use implementations::{ConsoleOutcomeObserver, NoOpOutcomeObserver};
