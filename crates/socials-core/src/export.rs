//! Fetch every user, build the network columns, fill rows, write the file.
//!
//! The run is strictly sequential and the first error aborts it.

use crate::client::IntercomClient;
use crate::error::Result;
use crate::network::NetworkColumns;
use crate::sheet::{build_table, write_xlsx};
use crate::types::User;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output: PathBuf,
    pub include_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub pages: usize,
    pub users: usize,
    pub rows: usize,
    pub networks: Vec<String>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkCount {
    pub network: String,
    pub users: usize,
}

/// Every user from every page, with the number of pages fetched.
pub fn collect_users(client: &IntercomClient) -> Result<(Vec<User>, usize)> {
    let mut users = Vec::new();
    let mut pages = 0;
    for page in client.pages() {
        users.extend(page?.users);
        pages += 1;
    }
    tracing::info!(pages, users = users.len(), "users fetched");
    Ok((users, pages))
}

pub fn export(client: &IntercomClient, opts: &ExportOptions) -> Result<ExportSummary> {
    let (users, pages) = collect_users(client)?;
    export_users(&users, pages, opts)
}

/// Build and write the spreadsheet for already-fetched users.
pub fn export_users(users: &[User], pages: usize, opts: &ExportOptions) -> Result<ExportSummary> {
    let columns = NetworkColumns::from_users(users);
    let table = build_table(users, &columns, opts.include_empty);
    write_xlsx(&table, &opts.output)?;
    tracing::debug!("file {} written", opts.output.display());

    Ok(ExportSummary {
        pages,
        users: users.len(),
        rows: table.rows.len(),
        networks: columns.networks().to_vec(),
        output: opts.output.clone(),
    })
}

/// How many users list each network, in column order. A user listing a
/// network twice counts once.
pub fn network_counts(users: &[User]) -> Vec<NetworkCount> {
    let columns = NetworkColumns::from_users(users);
    let mut counts = vec![0usize; columns.len()];
    for user in users {
        let mut seen = vec![false; columns.len()];
        for profile in user.profiles() {
            if let Some(col) = columns.column_of(&profile.name) {
                seen[col - 1] = true;
            }
        }
        for (count, hit) in counts.iter_mut().zip(seen) {
            if hit {
                *count += 1;
            }
        }
    }

    columns
        .networks()
        .iter()
        .zip(counts)
        .map(|(network, users)| NetworkCount {
            network: network.clone(),
            users,
        })
        .collect()
}
