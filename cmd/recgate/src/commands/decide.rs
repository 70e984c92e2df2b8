//! Decide command implementation.

use anyhow::Result;
use recgate_config::Config;
use recgate_engine::{start, Outcome};
use tracing::info;

/// Runs the decide command.
///
/// Exit status reflects the decision: success when the visit records,
/// failure when it is skipped, so the command composes in shell pipelines.
pub async fn run(config: Config, path: &str, cookies: &str) -> Result<()> {
    info!("Deciding visit for path: {path}");

    match start(config, path, cookies).await? {
        Outcome::Recorded => {
            info!("Decision: record this visit");
            Ok(())
        }
        Outcome::Skipped => {
            anyhow::bail!("Decision: skip this visit")
        }
    }
}
