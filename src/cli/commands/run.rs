use crate::cli::args::RunArgs;
use crate::core::RunReport;
use crate::engine::FanoutEngine;
use crate::services::{
    CompositeReportSink, ConsoleOutcomeObserver, ConsoleReportSink, FanoutSettings,
    JsonReportSink, SimulatedExecutor,
};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// run コマンドの確定済み設定
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub targets: Vec<String>,
    pub settings: FanoutSettings,
    pub json_output: Option<PathBuf>,
    pub force: bool,
    pub quiet: bool,
}

impl RunConfig {
    /// 設定ファイルを読み込み、コマンドライン引数で上書きする
    pub fn resolve(args: RunArgs) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => FanoutSettings::load(path)?,
            None => FanoutSettings::default(),
        };

        if let Some(max_delay_ms) = args.max_delay_ms {
            settings.simulation.max_delay_ms = max_delay_ms;
        }
        if let Some(failure_rate) = args.failure_rate {
            settings.simulation.failure_rate = failure_rate;
        }
        if args.seed.is_some() {
            settings.simulation.seed = args.seed;
        }
        if args.max_concurrent.is_some() {
            settings.max_concurrent = args.max_concurrent;
        }
        if args.timeout_ms.is_some() {
            settings.timeout_ms = args.timeout_ms;
        }
        if args.quiet {
            settings.progress = false;
        }
        settings.validate()?;

        let targets = if !args.targets.is_empty() {
            args.targets
        } else if !settings.targets.is_empty() {
            settings.targets.clone()
        } else if let Some(count) = args.count {
            synthetic_targets(count)
        } else {
            settings.effective_targets()
        };

        Ok(Self {
            targets,
            settings,
            json_output: args.json_output,
            force: args.force,
            quiet: args.quiet,
        })
    }
}

/// 連番付きの擬似リクエスト先
pub fn synthetic_targets(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("https://api.service.com/resource/{i}"))
        .collect()
}

/// run コマンドの実行
pub async fn execute_run(config: RunConfig) -> Result<RunReport> {
    // Check if output file already exists
    if let Some(output) = &config.json_output {
        if output.exists() && !config.force {
            anyhow::bail!(
                "Output file already exists: {}. Use --force to overwrite.",
                output.display()
            );
        }
    }

    let executor = SimulatedExecutor::new(config.settings.simulation.clone())?;

    let mut sink = CompositeReportSink::new().with_sink(ConsoleReportSink::new());
    if let Some(output) = &config.json_output {
        sink = sink.with_sink(JsonReportSink::new(output));
    }

    let observer = if config.quiet {
        ConsoleOutcomeObserver::quiet()
    } else {
        ConsoleOutcomeObserver::new()
    };

    let engine = FanoutEngine::new(executor, config.settings.to_config(), observer, sink);

    info!(
        targets = config.targets.len(),
        max_concurrent = ?config.settings.max_concurrent,
        timeout_ms = ?config.settings.timeout_ms,
        seed = ?config.settings.simulation.seed,
        "starting run"
    );

    // Ctrl-C で未完了の実行をキャンセル
    let cancel = engine.cancellation_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            cancel.cancel();
        }
    });

    let result = engine.run(config.targets).await;
    interrupt.abort();

    let report = result.map_err(|e| anyhow::anyhow!("実行エラー: {e}"))?;

    if let Some(output) = &config.json_output {
        println!("📄 結果は {} に保存されました", output.display());
    }

    Ok(report)
}
