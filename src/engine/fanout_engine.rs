// FanoutEngine - 依存性注入によるFan-out実行エンジン
// Executor、設定、Observer、ReportSink をコンストラクタで注入する

use super::pipeline::FanoutPipeline;
use crate::core::{
    Executor, FanoutConfig, FanoutResult, OutcomeObserver, ReportSink, RunReport, WorkItem,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// 依存性注入によるFan-out実行エンジン
///
/// 並列実行で共有される依存関係はArcで保持する。
/// `cancellation_token()` で実行中の run をキャンセルできる。
pub struct FanoutEngine<E, C, O, S> {
    executor: Arc<E>,
    config: Arc<C>,
    observer: Arc<O>,
    sink: Arc<S>,
    cancel: CancellationToken,
}

impl<E, C, O, S> FanoutEngine<E, C, O, S>
where
    E: Executor + 'static,
    C: FanoutConfig,
    O: OutcomeObserver + 'static,
    S: ReportSink + 'static,
{
    pub fn new(executor: E, config: C, observer: O, sink: S) -> Self {
        Self {
            executor: Arc::new(executor),
            config: Arc::new(config),
            observer: Arc::new(observer),
            sink: Arc::new(sink),
            cancel: CancellationToken::new(),
        }
    }

    /// ペイロード列を 0..N-1 の連番で実行
    pub async fn run<I, P>(&self, payloads: I) -> FanoutResult<RunReport>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.run_items(WorkItem::batch(payloads)).await
    }

    /// 作成済みのWorkItem列を実行
    pub async fn run_items(&self, items: Vec<WorkItem>) -> FanoutResult<RunReport> {
        let pipeline = FanoutPipeline::new(Arc::clone(&self.executor));
        // タイムアウトは子トークンだけをキャンセルし、エンジンのトークンは残す
        let run_cancel = self.cancel.child_token();

        pipeline
            .execute(
                items,
                self.config.as_ref(),
                Arc::clone(&self.observer),
                Arc::clone(&self.sink),
                run_cancel,
            )
            .await
    }

    /// 実行中のrunをキャンセルするためのトークン
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
