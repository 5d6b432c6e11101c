// src/export/pdf_export.rs

use crate::core::calculator::duration::format_hours_decimal;
use crate::core::report::{REPORT_HEADERS, ReportRow, report_rows};
use crate::errors::{AppError, AppResult};
use crate::export::model::{events_to_table, get_headers};
use crate::export::pdf::{PdfDocument, PdfManager};
use crate::export::range::{Bounds, describe_range};
use crate::export::{EventExport, notify_export_success};
use crate::models::event::Event;
use crate::models::stats::MonthlySummary;
use crate::ui::messages::info;
use crate::utils::date::{month_name, today};
use std::path::Path;

fn save(pdf: PdfManager, path: &Path) -> AppResult<()> {
    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))
}

fn rows_to_cells(rows: &[ReportRow]) -> Vec<Vec<String>> {
    rows.iter().map(ReportRow::cells).collect()
}

/// Raw event listing.
pub(crate) fn export_pdf(events: &[EventExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let rows = events_to_table(events);
    let intro = vec![format!("Generated on: {}", today())];

    let mut pdf = PdfManager::new();
    pdf.write_document(&PdfDocument {
        title,
        intro: &intro,
        headers: &headers,
        rows: &rows,
        footer: None,
    });
    save(pdf, path)?;

    notify_export_success("PDF", path);
    Ok(())
}

/// Attendance report of one employee: one row per day plus the total.
pub fn export_report_pdf(
    employee_name: &str,
    bounds: &Bounds,
    events: &[Event],
    path: &Path,
) -> AppResult<()> {
    info(format!("Writing attendance report: {}", path.display()));

    let (rows, total) = report_rows(events);
    let cells = rows_to_cells(&rows);
    let intro = vec![
        format!("Employee: {}", employee_name),
        format!("Period: {}", describe_range(bounds)),
        format!("Generated on: {}", today()),
    ];
    let footer = vec![
        String::new(),
        String::new(),
        "TOTAL:".to_string(),
        format_hours_decimal(total),
    ];

    let mut pdf = PdfManager::new();
    pdf.write_document(&PdfDocument {
        title: "Attendance report",
        intro: &intro,
        headers: &REPORT_HEADERS,
        rows: &cells,
        footer: Some(footer.as_slice()),
    });
    save(pdf, path)?;

    notify_export_success("PDF report", path);
    Ok(())
}

/// Summary of one month for one employee, followed by its days.
pub fn export_monthly_pdf(
    employee_name: &str,
    summary: &MonthlySummary,
    events: &[Event],
    path: &Path,
) -> AppResult<()> {
    info(format!("Writing monthly summary: {}", path.display()));

    let (rows, _) = report_rows(events);
    let cells = rows_to_cells(&rows);
    let title = format!(
        "Monthly summary - {} {}",
        month_name(summary.month),
        summary.year
    );
    let intro = vec![
        format!("Employee: {}", employee_name),
        format!("Total hours: {}", format_hours_decimal(summary.total_hours)),
        format!("Days worked: {}", summary.days_worked),
        format!("Average per day: {}", format_hours_decimal(summary.avg_hours_per_day)),
        format!("Generated on: {}", today()),
    ];

    let mut pdf = PdfManager::new();
    pdf.write_document(&PdfDocument {
        title: &title,
        intro: &intro,
        headers: &REPORT_HEADERS,
        rows: &cells,
        footer: None,
    });
    save(pdf, path)?;

    notify_export_success("PDF monthly summary", path);
    Ok(())
}
