use crate::output::print_json;
use crate::ExportArgs;
use anyhow::Context;
use socials_core::export::{export, ExportOptions};

use super::{build_client, effective_config, GlobalArgs};

pub fn run(global: &GlobalArgs, args: &ExportArgs, json: bool) -> anyhow::Result<()> {
    let config = effective_config(global, args)?;
    let client = build_client(global, &config)?;

    let opts = ExportOptions {
        output: config.output.clone(),
        include_empty: config.include_empty,
    };
    let summary = export(&client, &opts)
        .with_context(|| format!("failed to export to {}", opts.output.display()))?;

    if json {
        print_json(&summary)?;
    } else {
        println!(
            "Wrote {} rows ({} users, {} networks) to {}",
            summary.rows,
            summary.users,
            summary.networks.len(),
            summary.output.display()
        );
    }
    tracing::info!("done");
    Ok(())
}
