//! Main entry point for the dawinspect CLI application.
//!
//! Runs the selected inspections over the OK/NG archive pair, one archive
//! after the other, writing diagnostics to stdout.

use anyhow::Result;
use clap::Parser;
use std::io::Write;

use dawinspect::{Cli, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_level())?;

    let options = cli.options();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Inspection failures are reported inline; only stdout errors end the run
    for pass in cli.command().passes() {
        for (label, path) in cli.targets() {
            tracing::info!("{pass:?} pass over {label} ({})", path.display());
            pass.run(&mut out, label, &path, &options).await?;
        }
    }

    out.flush()?;
    Ok(())
}
