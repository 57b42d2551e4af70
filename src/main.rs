use anyhow::Result;
use clap::Parser;
use ordered_fanout::cli::{execute_run, execute_show_config, Cli, Commands, RunConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ログは標準エラーへ（RUST_LOG で制御、既定は warn）
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = RunConfig::resolve(args)?;
            let report = execute_run(config).await?;

            if report.failure_count() > 0 {
                println!("⚠️  {}件のリクエストが失敗しました", report.failure_count());
            }
        }
        Commands::ShowConfig { config } => {
            println!("{}", execute_show_config(config.as_deref())?);
        }
    }

    Ok(())
}
