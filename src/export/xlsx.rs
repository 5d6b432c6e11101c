// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{events_to_table, get_headers};
use crate::export::{EventExport, notify_export_success};
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const HEADER_BG: u32 = 0x2F75B5;
const BAND_ODD: u32 = 0xEAF3FB;
const BAND_EVEN: u32 = 0xFFFFFF;

pub(crate) fn export_xlsx(events: &[EventExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    write_table(path, "Events", &get_headers(), &events_to_table(events))?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// One worksheet: bold header, frozen first row, banded rows and columns
/// sized to their widest cell.
fn write_table(path: &Path, sheet: &str, headers: &[&str], rows: &[Vec<String>]) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).map_err(xlsx_error)?;

    if rows.is_empty() {
        worksheet.write(0, 0, "No data available").map_err(xlsx_error)?;
        workbook.save(path_str(path)?).map_err(xlsx_error)?;
        return Ok(());
    }

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(HEADER_BG))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_error)?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();

    for (idx, row) in rows.iter().enumerate() {
        let band = Color::RGB(if idx % 2 == 0 { BAND_ODD } else { BAND_EVEN });

        for (col, value) in row.iter().enumerate() {
            write_cell(worksheet, (idx + 1) as u32, col as u16, value, band)?;
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(value.width());
            }
        }
    }

    for (col, w) in widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *w as f64 + 2.0)
            .map_err(xlsx_error)?;
    }

    workbook.save(path_str(path)?).map_err(xlsx_error)?;
    Ok(())
}

/// Dates and times become Excel serials, numbers stay numeric, the rest is text.
fn write_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, band: Color) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(band)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        ws.write_with_format(row, col, serial, &base.set_num_format(num_format))
            .map_err(xlsx_error)?;
    } else if let Ok(num) = s.parse::<f64>() {
        ws.write_with_format(row, col, num, &base.set_align(FormatAlign::Right))
            .map_err(xlsx_error)?;
    } else {
        ws.write_with_format(row, col, s, &base).map_err(xlsx_error)?;
    }

    Ok(())
}

fn xlsx_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(format!("XLSX error: {e}"))
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::Export(format!("invalid path: {}", path.display())))
}
