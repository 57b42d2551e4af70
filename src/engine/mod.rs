// エンジン層 - Fan-out 実行と順序復元のオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod collector;
pub mod dispatcher;
pub mod fanout_engine;
pub mod gate;
mod pipeline;
pub mod reassembler;

// 公開API - 主要エンジンクラス
pub use collector::spawn_reassembler;
pub use dispatcher::{
    DispatchCompletion, DispatchHandle, DispatchPhase, Dispatcher, CANCELLED_REASON,
};
pub use fanout_engine::FanoutEngine;
pub use gate::{Arrival, CompletionGate};
pub use pipeline::FanoutPipeline;
pub use reassembler::Reassembler;
