// src/export/logic.rs

use crate::core::report::filter_by_date_range;
use crate::db::pool::DbPool;
use crate::db::queries::load_events;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_writable, resolve_output_path};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::EventExport;
use crate::export::pdf_export::export_pdf;
use crate::export::range::{describe_range, parse_optional_range};
use crate::export::xlsx::export_xlsx;
use crate::ui::messages::warning;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export raw scans.
    ///
    /// - `file`: absolute output path (`~/` is expanded)
    /// - `range`: `None`, `"all"` or an expression accepted by
    ///   [`crate::export::range::parse_range`]
    /// - `user`: restrict to one user id
    ///
    /// Returns the number of exported events.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&String>,
        user: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = resolve_output_path(file)?;
        let bounds = parse_optional_range(range)?;

        let mut events = filter_by_date_range(&load_events(&pool.conn, user)?, bounds.0, bounds.1);

        if events.is_empty() {
            warning("No events found for selected range.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        // oldest first in files
        events.reverse();
        let rows: Vec<EventExport> = events.iter().map(EventExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, &path)?,
            ExportFormat::Pdf => {
                let title = format!("Attendance events: {}", describe_range(&bounds));
                export_pdf(&rows, &path, &title)?
            }
        }

        Ok(rows.len())
    }
}
