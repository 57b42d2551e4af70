// 台本どおりに振る舞う決定的なExecutor（テスト・デモ用）

use crate::core::{Executor, Outcome, WorkItem};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
enum Script {
    Succeed { delay: Duration, value: String },
    Fail { delay: Duration, reason: String },
}

/// インデックスごとに遅延と結果を指定するExecutor
///
/// 台本にないインデックスは即座に失敗Outcomeを返す。
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    scripts: HashMap<usize, Script>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(mut self, index: usize, delay: Duration, value: impl Into<String>) -> Self {
        self.scripts.insert(
            index,
            Script::Succeed {
                delay,
                value: value.into(),
            },
        );
        self
    }

    pub fn fail(mut self, index: usize, delay: Duration, reason: impl Into<String>) -> Self {
        self.scripts.insert(
            index,
            Script::Fail {
                delay,
                reason: reason.into(),
            },
        );
        self
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, item: WorkItem) -> Outcome {
        let started_at = Instant::now();

        match self.scripts.get(&item.index()) {
            Some(Script::Succeed { delay, value }) => {
                tokio::time::sleep(*delay).await;
                Outcome::success(&item, value.clone(), started_at.elapsed())
            }
            Some(Script::Fail { delay, reason }) => {
                tokio::time::sleep(*delay).await;
                Outcome::failure(&item, reason.clone(), started_at.elapsed())
            }
            None => Outcome::failure(
                &item,
                format!("no script for index {}", item.index()),
                started_at.elapsed(),
            ),
        }
    }
}
