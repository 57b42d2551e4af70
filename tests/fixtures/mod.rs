// テストユーティリティとモック実装
// 統合テスト共通の記録用Observerとヘルパー

pub mod mocks;

// 公開API
pub use mocks::*;
