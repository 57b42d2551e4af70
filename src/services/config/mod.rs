// 設定管理機能
// ディスパッチ設定と設定ファイルの読み込み

pub mod implementations;

// 公開API
pub use implementations::{DefaultFanoutConfig, FanoutSettings, DEFAULT_TARGETS};
