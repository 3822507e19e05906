use crate::error::{Result, SocialsError};
use crate::network::NetworkColumns;
use crate::types::User;
use serde::Serialize;
use std::path::Path;

pub const SHEET_NAME: &str = "Sheet1";

/// Rectangular export table: a header row plus one row per exported user.
/// Every row has exactly `header.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialsTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SocialsTable {
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Fill one row per user with a social profile (every user when
/// `include_empty` is set). When a user lists the same network twice the
/// first non-empty URL is kept.
pub fn build_table(users: &[User], columns: &NetworkColumns, include_empty: bool) -> SocialsTable {
    let header = columns.header();
    let width = header.len();
    let mut rows = Vec::new();

    for user in users {
        if !user.has_profiles() && !include_empty {
            continue;
        }
        let mut row = vec![String::new(); width];
        row[0] = user.email().to_string();
        for profile in user.profiles() {
            let Some(col) = columns.column_of(&profile.name) else {
                continue;
            };
            if row[col].is_empty() {
                row[col] = profile.url.clone();
            } else if row[col] != profile.url {
                tracing::debug!(
                    email = user.email(),
                    network = %header[col],
                    "duplicate profile ignored"
                );
            }
        }
        rows.push(row);
    }

    SocialsTable { header, rows }
}

/// Write `table` to an XLSX workbook with a single `Sheet1` worksheet.
pub fn write_xlsx(table: &SocialsTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();

    let lines = std::iter::once(&table.header).chain(table.rows.iter());
    for (r, line) in lines.enumerate() {
        for (c, value) in line.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet
                .get_cell_mut((c as u32 + 1, r as u32 + 1))
                .set_value_string(value.as_str());
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| SocialsError::Spreadsheet(format!("{}: {e}", path.display())))
}
