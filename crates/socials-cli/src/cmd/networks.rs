use crate::output::{print_json, print_table};
use crate::ExportArgs;
use anyhow::Context;
use socials_core::export::network_counts;

use super::{build_client, effective_config, GlobalArgs};

pub fn run(
    global: &GlobalArgs,
    export: &ExportArgs,
    per_page: Option<u32>,
    json: bool,
) -> anyhow::Result<()> {
    let args = ExportArgs {
        per_page: per_page.or(export.per_page),
        ..export.clone()
    };
    let config = effective_config(global, &args)?;
    let client = build_client(global, &config)?;

    let users = client.fetch_all_users().context("failed to fetch users")?;
    let counts = network_counts(&users);

    if json {
        let value = serde_json::json!({
            "users": users.len(),
            "networks": counts,
        });
        print_json(&value)?;
        return Ok(());
    }

    if counts.is_empty() {
        println!("No social profiles found across {} users.", users.len());
        return Ok(());
    }

    let rows = counts
        .iter()
        .map(|c| vec![c.network.clone(), c.users.to_string()])
        .collect();
    print_table(&["NETWORK", "USERS"], rows);
    Ok(())
}
