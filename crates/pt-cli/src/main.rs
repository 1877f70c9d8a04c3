use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pt_cli::{Cli, Config, source};
use pt_core::Cupboard;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let journal = cli.journal.unwrap_or_else(|| config.journal_path.clone());
    let rows = source::load_rows(&journal)?;
    tracing::debug!(rows = rows.len(), journal = %journal.display(), "journal loaded");

    let mut cupboard = Cupboard::with_defaults();
    pt_core::correlate(&rows, &mut cupboard);

    let report = pt_core::render(&cupboard).context("failed to render report")?;
    print!("{report}");

    // The report is already on stdout at this point, so an email failure
    // is a partial success and the error message says so.
    if cli.email {
        let smtp = config
            .smtp
            .as_ref()
            .context("--email requested but no [smtp] section is configured")?;
        pt_mail::send_report(smtp, &config.email_subject, &report)
            .context("report printed, but email delivery failed")?;
        tracing::info!(to = %smtp.to, "report emailed");
    }

    Ok(())
}
