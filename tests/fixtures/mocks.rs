// テスト用の記録実装
// Observerへの通知順序を検証するための記録用Observerと台本ヘルパー

use async_trait::async_trait;
use ordered_fanout::{Outcome, OutcomeObserver, ScriptedExecutor};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Observerに届いたイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Started(usize),
    Arrived { index: usize, received: usize },
    Released(usize),
    Completed { succeeded: usize, failed: usize },
}

/// 全イベントを記録するObserver
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn arrival_order(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ObservedEvent::Arrived { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    pub fn release_order(&self) -> Vec<usize> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ObservedEvent::Released(index) => Some(index),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ObservedEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl OutcomeObserver for RecordingObserver {
    async fn report_started(&self, total: usize) {
        self.push(ObservedEvent::Started(total));
    }

    async fn report_arrival(&self, outcome: &Outcome, received: usize, _total: usize) {
        self.push(ObservedEvent::Arrived {
            index: outcome.index,
            received,
        });
    }

    async fn report_released(&self, outcome: &Outcome) {
        self.push(ObservedEvent::Released(outcome.index));
    }

    async fn report_completed(&self, succeeded: usize, failed: usize) {
        self.push(ObservedEvent::Completed { succeeded, failed });
    }
}

/// 指定した遅延（ミリ秒）で全件成功する台本
pub fn scripted_delays(delays_ms: &[u64]) -> ScriptedExecutor {
    delays_ms
        .iter()
        .enumerate()
        .fold(ScriptedExecutor::new(), |executor, (index, delay)| {
            executor.succeed(
                index,
                Duration::from_millis(*delay),
                format!("value-{index}"),
            )
        })
}

/// ペイロード列 "item-0".."item-{n-1}"
pub fn payloads(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{i}")).collect()
}
