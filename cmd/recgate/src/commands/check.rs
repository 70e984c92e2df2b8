//! Check command implementation.

use anyhow::{Context, Result};
use recgate_config::Config;
use tracing::info;

/// Runs the check command.
pub fn run(config: Config) -> Result<()> {
    let validated = config
        .validate()
        .with_context(|| "Configuration failed validation")?;

    info!(
        "Configuration valid: site {} targeting {} country code(s), {} page rule(s)",
        validated.site_id,
        validated.location_rule.country_codes.len(),
        validated.optional_rule.page_rules.len()
    );
    Ok(())
}
