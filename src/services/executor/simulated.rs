// 擬似リクエスト実行 - ランダムな遅延と確率的な失敗

use crate::core::{Executor, FanoutError, FanoutResult, Outcome, WorkItem};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// 擬似リクエストのパラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// 遅延の上限（ミリ秒、この値は含まない）
    pub max_delay_ms: u64,
    /// 失敗確率（0.0〜1.0）
    pub failure_rate: f64,
    /// 乱数シード（指定時はWorkItemごとに決定的）
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            max_delay_ms: 1000,
            failure_rate: 0.2,
            seed: None,
        }
    }
}

impl SimulationSettings {
    pub fn validate(&self) -> FanoutResult<()> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(FanoutError::validation(
                "failure_rate",
                format!("0.0〜1.0 の範囲で指定してください: {}", self.failure_rate),
            ));
        }
        Ok(())
    }
}

/// ネットワーク呼び出しを模したExecutor
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    settings: SimulationSettings,
}

impl SimulatedExecutor {
    pub fn new(settings: SimulationSettings) -> FanoutResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// WorkItemごとの遅延と成否を決定
    fn draw(&self, index: usize) -> (Duration, bool) {
        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(item_seed(seed, index)),
            None => StdRng::from_os_rng(),
        };

        let delay_ms = if self.settings.max_delay_ms == 0 {
            0
        } else {
            rng.random_range(0..self.settings.max_delay_ms)
        };
        let fails = rng.random_bool(self.settings.failure_rate);

        (Duration::from_millis(delay_ms), fails)
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self {
            settings: SimulationSettings::default(),
        }
    }
}

/// シードとインデックスから独立した乱数列を導出
fn item_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

#[async_trait]
impl Executor for SimulatedExecutor {
    async fn execute(&self, item: WorkItem) -> Outcome {
        let started_at = Instant::now();
        let (delay, fails) = self.draw(item.index());

        tokio::time::sleep(delay).await;
        let elapsed = started_at.elapsed();

        if fails {
            Outcome::failure(
                &item,
                format!("リクエスト失敗 [{}] (所要時間: {elapsed:?})", item.payload()),
                elapsed,
            )
        } else {
            Outcome::success(&item, format!("結果データ [{}]", item.payload()), elapsed)
        }
    }
}
