use anyhow::Result;
use clap::Parser;
use heritage_cli::{CliArgs, run, tracing_config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let report = run(&args).await?;

    let mut stdout = std::io::stdout().lock();
    report.write(&mut stdout, args.format)
}
