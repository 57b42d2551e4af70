// Dispatcher - WorkItemごとに1タスクを起動し、完了順にOutcomeを配信

use super::gate::{Arrival, CompletionGate};
use crate::core::{Executor, FanoutResult, Outcome, WorkItem};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// キャンセル時の失敗理由
pub const CANCELLED_REASON: &str = "cancelled";

/// ディスパッチの状態遷移: Idle → Dispatching → Draining → Closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DispatchPhase {
    Idle,
    Dispatching,
    Draining,
    Closed,
}

/// 全実行の完了シグナル
///
/// ゲートが0に到達し、送信側が閉じられた時点で全体所要時間を返す。
pub struct DispatchCompletion {
    handle: JoinHandle<Duration>,
}

impl DispatchCompletion {
    pub async fn wait(self) -> FanoutResult<Duration> {
        Ok(self.handle.await?)
    }
}

/// 1回のディスパッチに対するハンドル
pub struct DispatchHandle {
    total: usize,
    outcomes: mpsc::Receiver<Outcome>,
    phase: watch::Receiver<DispatchPhase>,
    completion: DispatchCompletion,
}

impl DispatchHandle {
    pub fn total(&self) -> usize {
        self.total
    }

    /// 次のOutcome（完了順）。全実行が終わってストリームが閉じると None
    pub async fn recv(&mut self) -> Option<Outcome> {
        self.outcomes.recv().await
    }

    pub fn phase(&self) -> watch::Receiver<DispatchPhase> {
        self.phase.clone()
    }

    pub fn into_parts(self) -> (mpsc::Receiver<Outcome>, DispatchCompletion) {
        (self.outcomes, self.completion)
    }
}

/// Fan-out ディスパッチャ
pub struct Dispatcher<E> {
    executor: Arc<E>,
    limiter: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
}

impl<E> Dispatcher<E>
where
    E: Executor + 'static,
{
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            executor,
            limiter: None,
            cancel: CancellationToken::new(),
        }
    }

    /// 同時実行数の上限を設定（None は無制限、Some(0) は無制限として扱う）
    pub fn with_max_concurrent(mut self, limit: Option<usize>) -> Self {
        self.limiter = limit
            .filter(|&n| n > 0)
            .map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 全WorkItemの実行を待たずに起動する
    pub fn dispatch(&self, items: Vec<WorkItem>) -> DispatchHandle {
        let started_at = Instant::now();
        let total = items.len();
        let (phase_tx, phase_rx) = watch::channel(DispatchPhase::Idle);

        // 完了側が配信でブロックしないよう容量はN以上
        let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>(total.max(1));
        let gate = Arc::new(CompletionGate::new(total));

        phase_tx.send_replace(DispatchPhase::Dispatching);
        info!(total, bounded = self.limiter.is_some(), "dispatching work items");

        for item in items {
            spawn_execution(
                Arc::clone(&self.executor),
                item,
                outcome_tx.clone(),
                gate.ticket(),
                self.limiter.clone(),
                self.cancel.clone(),
            );
        }

        phase_tx.send_replace(DispatchPhase::Draining);

        let handle = tokio::spawn(async move {
            gate.wait().await;
            // ゲート到達後にのみ元の送信側を閉じる
            drop(outcome_tx);
            phase_tx.send_replace(DispatchPhase::Closed);
            let elapsed = started_at.elapsed();
            debug!(?elapsed, "outcome stream closed");
            elapsed
        });

        DispatchHandle {
            total,
            outcomes: outcome_rx,
            phase: phase_rx,
            completion: DispatchCompletion { handle },
        }
    }
}

/// 1件分の実行タスクを起動
///
/// Outcome送信後に `arrival` がdropされ、ゲートが1つ進む。
fn spawn_execution<E>(
    executor: Arc<E>,
    item: WorkItem,
    outcome_tx: mpsc::Sender<Outcome>,
    arrival: Arrival,
    limiter: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
) where
    E: Executor + 'static,
{
    tokio::spawn(async move {
        let _arrival = arrival;
        let index = item.index();
        let outcome = run_execution(executor, item, limiter, cancel).await;

        if outcome_tx.send(outcome).await.is_err() {
            debug!(index, "outcome receiver dropped");
        }
    });
}

async fn run_execution<E>(
    executor: Arc<E>,
    item: WorkItem,
    limiter: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
) -> Outcome
where
    E: Executor + 'static,
{
    let started_at = Instant::now();

    let _permit: Option<OwnedSemaphorePermit> = match limiter {
        Some(semaphore) => tokio::select! {
            permit = semaphore.acquire_owned() => permit.ok(),
            _ = cancel.cancelled() => {
                return Outcome::failure(&item, CANCELLED_REASON, started_at.elapsed());
            }
        },
        None => None,
    };

    let task_item = item.clone();
    let mut task = tokio::spawn(async move { executor.execute(task_item).await });

    tokio::select! {
        joined = &mut task => match joined {
            Ok(outcome) if outcome.index == item.index() => outcome,
            Ok(outcome) => {
                warn!(
                    expected = item.index(),
                    actual = outcome.index,
                    "executor returned an outcome for a different item"
                );
                Outcome::failure(
                    &item,
                    format!("executor returned outcome for index {}", outcome.index),
                    started_at.elapsed(),
                )
            }
            Err(error) => {
                warn!(index = item.index(), %error, "executor task did not complete");
                Outcome::failure(
                    &item,
                    format!("executor aborted: {error}"),
                    started_at.elapsed(),
                )
            }
        },
        _ = cancel.cancelled() => {
            task.abort();
            debug!(index = item.index(), "execution cancelled");
            Outcome::failure(&item, CANCELLED_REASON, started_at.elapsed())
        }
    }
}
