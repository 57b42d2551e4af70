// CompletionGate - 未完了実行数のカウントダウン

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{debug, warn};

/// 未完了の実行数を数えるカウントダウンゲート
///
/// カウンタが0に到達したことは、最後に `arrive` した1者だけが観測する。
#[derive(Debug)]
pub struct CompletionGate {
    remaining: AtomicUsize,
    opened: Notify,
}

impl CompletionGate {
    pub fn new(count: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(count),
            opened: Notify::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    pub fn is_open(&self) -> bool {
        self.remaining() == 0
    }

    /// 1件の完了を記録。カウンタを0にした呼び出しのみ true を返す
    pub fn arrive(&self) -> bool {
        match self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(1) => {
                debug!("completion gate reached zero");
                self.opened.notify_waiters();
                true
            }
            Ok(_) => false,
            Err(_) => {
                warn!("arrival recorded on an already open completion gate");
                false
            }
        }
    }

    /// カウンタが0になるまで待機
    pub async fn wait(&self) {
        loop {
            // notify_waiters を取りこぼさないよう、判定より先に登録する
            let opened = self.opened.notified();
            if self.is_open() {
                return;
            }
            opened.await;
        }
    }

    /// drop時に1回だけ arrive する完了チケットを発行
    pub fn ticket(self: &Arc<Self>) -> Arrival {
        Arrival {
            gate: Arc::clone(self),
        }
    }
}

/// 実行タスクが所有する完了チケット
#[derive(Debug)]
pub struct Arrival {
    gate: Arc<CompletionGate>,
}

impl Drop for Arrival {
    fn drop(&mut self) {
        self.gate.arrive();
    }
}
