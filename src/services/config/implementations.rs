// 設定管理の具象実装

use crate::core::{FanoutConfig, FanoutError, FanoutResult};
use crate::services::executor::SimulationSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 設定ファイルでターゲットが指定されない場合の既定リクエスト先
pub const DEFAULT_TARGETS: [&str; 10] = [
    "https://api.service.com/user",
    "https://api.service.com/products",
    "https://api.service.com/orders",
    "https://api.service.com/inventory",
    "https://api.service.com/payments",
    "https://api.service.com/shipping",
    "https://api.service.com/reviews",
    "https://api.service.com/analytics",
    "https://api.service.com/notifications",
    "https://api.service.com/recommendations",
];

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultFanoutConfig {
    max_concurrent: Option<usize>,
    timeout: Option<Duration>,
    enable_progress: bool,
}

impl DefaultFanoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = Some(max_concurrent);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 設定値の検証
    pub fn validate(&self) -> FanoutResult<()> {
        if self.max_concurrent == Some(0) {
            return Err(FanoutError::configuration(
                "同時実行数は1以上である必要があります",
            ));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(FanoutError::configuration(
                "タイムアウトは0より大きい必要があります",
            ));
        }
        Ok(())
    }
}

impl Default for DefaultFanoutConfig {
    fn default() -> Self {
        Self {
            max_concurrent: None,
            timeout: None,
            enable_progress: true,
        }
    }
}

impl FanoutConfig for DefaultFanoutConfig {
    fn max_concurrent_tasks(&self) -> Option<usize> {
        self.max_concurrent
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// JSON設定ファイルの内容（全項目省略可）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanoutSettings {
    pub targets: Vec<String>,
    pub max_concurrent: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub progress: bool,
    pub simulation: SimulationSettings,
}

impl Default for FanoutSettings {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            max_concurrent: None,
            timeout_ms: None,
            progress: true,
            simulation: SimulationSettings::default(),
        }
    }
}

impl FanoutSettings {
    /// JSONファイルから読み込み
    pub fn load<P: AsRef<Path>>(path: P) -> FanoutResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            FanoutError::configuration(format!(
                "設定ファイル読み込みエラー {}: {e}",
                path.display()
            ))
        })?;
        let settings: FanoutSettings = serde_json::from_str(&contents).map_err(|e| {
            FanoutError::configuration(format!(
                "設定ファイル解析エラー {}: {e}",
                path.display()
            ))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> FanoutResult<()> {
        self.simulation.validate()?;
        self.to_config().validate()
    }

    /// ターゲット一覧（未指定なら既定のリクエスト先）
    pub fn effective_targets(&self) -> Vec<String> {
        if self.targets.is_empty() {
            DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect()
        } else {
            self.targets.clone()
        }
    }

    pub fn to_config(&self) -> DefaultFanoutConfig {
        DefaultFanoutConfig {
            max_concurrent: self.max_concurrent,
            timeout: self.timeout_ms.map(Duration::from_millis),
            enable_progress: self.progress,
        }
    }
}
