// Pipeline - Fan-out / Fan-in パイプライン
// ディスパッチ、順序復元、レポート出力のオーケストレーション

use super::{collector::spawn_reassembler, dispatcher::Dispatcher};
use crate::{
    core::{
        Executor, FanoutConfig, FanoutError, FanoutResult, OutcomeObserver, ReportSink, RunReport,
        WorkItem,
    },
    services::NoOpOutcomeObserver,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// ディスパッチャとCollectorを束ねるパイプライン
pub struct FanoutPipeline<E> {
    executor: Arc<E>,
}

impl<E> FanoutPipeline<E>
where
    E: Executor + 'static,
{
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// WorkItem列を全件実行し、インデックス順のレポートを返す
    pub async fn execute<C, O, S>(
        &self,
        items: Vec<WorkItem>,
        config: &C,
        observer: Arc<O>,
        sink: Arc<S>,
        cancel: CancellationToken,
    ) -> FanoutResult<RunReport>
    where
        C: FanoutConfig + ?Sized,
        O: OutcomeObserver + 'static,
        S: ReportSink + ?Sized,
    {
        validate_indices(&items)?;

        let total = items.len();
        let observer: Arc<dyn OutcomeObserver> = if config.enable_progress_reporting() {
            observer as Arc<dyn OutcomeObserver>
        } else {
            Arc::new(NoOpOutcomeObserver::new())
        };

        observer.report_started(total).await;

        let dispatcher = Dispatcher::new(Arc::clone(&self.executor))
            .with_max_concurrent(config.max_concurrent_tasks())
            .with_cancellation(cancel.clone());

        let watchdog = config
            .timeout()
            .map(|limit| spawn_timeout_watchdog(limit, cancel.clone()));

        // 全件起動してからCollectorを接続（チャネル容量がN以上なので取りこぼしなし）
        let (outcome_rx, completion) = dispatcher.dispatch(items).into_parts();
        let collector_handle = spawn_reassembler(outcome_rx, total, Arc::clone(&observer));

        let collected = collector_handle.await;
        let total_elapsed = completion.wait().await;

        if let Some(watchdog) = watchdog {
            watchdog.abort();
        }

        let ordered = collected??;
        let total_elapsed = total_elapsed?;

        let report = RunReport::new(ordered, total_elapsed);
        observer
            .report_completed(report.success_count(), report.failure_count())
            .await;

        info!(
            total,
            succeeded = report.success_count(),
            failed = report.failure_count(),
            elapsed_ms = total_elapsed.as_millis() as u64,
            "fan-out run finished"
        );

        sink.publish(&report).await.map_err(FanoutError::report)?;

        Ok(report)
    }
}

/// インデックスが 0..N-1 の連番であることを検証
fn validate_indices(items: &[WorkItem]) -> FanoutResult<()> {
    for (expected, item) in items.iter().enumerate() {
        if item.index() != expected {
            return Err(FanoutError::validation(
                "items",
                format!(
                    "インデックスは0からの連番である必要があります (位置 {expected} に {} )",
                    item.index()
                ),
            ));
        }
    }
    Ok(())
}

/// 実行時間の上限に達したらキャンセルを発行
fn spawn_timeout_watchdog(limit: Duration, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(limit) => {
                warn!(?limit, "run timed out, cancelling outstanding executions");
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
    })
}
