use aligncv::cli::{handle_command, AlignCli};
use anyhow::Result;
use clap::Parser;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = AlignCli::parse();

    // Logs go to stderr so rendered results stay clean on stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aligncv=info"));
    let layer = if cli.log_json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .with_span_list(false)
            .boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    tracing_subscriber::registry().with(layer).with(filter).init();

    if !handle_command(cli).await? {
        std::process::exit(1);
    }
    Ok(())
}
