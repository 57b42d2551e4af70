// Collector - 到着順の表示とインデックス順の復元

use super::reassembler::Reassembler;
use crate::core::{FanoutResult, Outcome, OutcomeObserver};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Collector: Outcomeストリームを消費し、順序付きコレクションを返す
///
/// 各Outcomeは到着直後に `report_arrival` され、連続区間が揃うたびに
/// `report_released` がインデックス順に呼ばれる。
pub fn spawn_reassembler<O>(
    mut outcome_rx: mpsc::Receiver<Outcome>,
    total: usize,
    observer: Arc<O>,
) -> JoinHandle<FanoutResult<Vec<Outcome>>>
where
    O: OutcomeObserver + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut reassembler = Reassembler::new(total);
        let mut received = 0;

        while let Some(outcome) = outcome_rx.recv().await {
            received += 1;
            observer.report_arrival(&outcome, received, total).await;

            let released = reassembler.accept(outcome)?;
            for outcome in released {
                observer.report_released(outcome).await;
            }
            debug!(
                received,
                next_expected = reassembler.next_expected(),
                pending = reassembler.pending_len(),
                "outcome accepted"
            );
        }

        reassembler.finish()
    })
}
