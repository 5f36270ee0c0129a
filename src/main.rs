use anyhow::Result;
use clap::Parser as CliParser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::info;

use tamarin::agent::{attach, attach_running};
use tamarin::host::HostHandle;

#[derive(CliParser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Endpoint configuration (eg., [host:]port:path, joined with '|')
    #[arg(index = 1)]
    config: String,

    /// Attach to an already-running process instead of this one
    #[clap(long)]
    pid: Option<u32>,

    /// Verbosity level
    #[clap(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn set_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    set_logging(&cli);

    let agent = match cli.pid {
        Some(pid) => {
            let host = HostHandle::attach(pid)?;
            attach_running(&cli.config, host).await?
        }
        None => {
            let host = HostHandle::current()?;
            attach(&cli.config, host).await?
        }
    };

    info!("Serving {} metrics endpoint(s)", agent.servers.len());
    tokio::signal::ctrl_c().await?;

    info!("Shutting down");
    agent.shutdown();

    Ok(())
}
