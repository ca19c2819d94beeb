//! Excel workbook export
//!
//! Generates a workbook containing:
//! - `Informacion_General`: one row of generation metadata
//! - `Datos_Completos`: the merged dataset as read
//! - `Resumen_Columnas`: per-column type, non-empty and distinct counts

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local, NaiveDateTime, Timelike};
use rust_xlsxwriter::*;

use crate::dataset::MergedDataset;
use crate::ingest::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// Summary of one dataset column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    pub type_label: &'static str,
    pub non_empty: usize,
    pub distinct: usize,
}

/// `reporte_estudiantes_<YYYYMMDD_HHMMSS>.xlsx`
pub fn workbook_file_name(generated_at: &DateTime<Local>) -> String {
    format!("reporte_estudiantes_{}.xlsx", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Type label in dataframe terms for the values of one column
pub fn infer_type_label(values: &[&CellValue]) -> &'static str {
    let present: Vec<&CellValue> = values.iter().copied().filter(|v| !v.is_empty()).collect();
    let has_gaps = present.len() < values.len();

    if present.is_empty() {
        return "float64";
    }
    if present.iter().all(|v| v.is_integral()) {
        return if has_gaps { "float64" } else { "int64" };
    }
    if present.iter().all(|v| v.is_numeric()) {
        return "float64";
    }
    if !has_gaps && present.iter().all(|v| matches!(v, CellValue::Bool(_))) {
        return "bool";
    }
    if present.iter().all(|v| matches!(v, CellValue::DateTime(_))) {
        return "datetime64[ns]";
    }
    "object"
}

/// Identity of a value for distinct counting.
///
/// Numbers compare by value (`1` and `1.0` are one value) but never equal
/// text, so `1` and `"1"` count twice.
fn distinct_key(value: &CellValue) -> (u8, String) {
    let kind = match value {
        CellValue::Empty => 0,
        CellValue::Text(_) => 1,
        CellValue::Int(_) | CellValue::Float(_) => 2,
        CellValue::Bool(_) => 3,
        CellValue::DateTime(_) => 4,
    };
    (kind, value.to_text())
}

/// Summaries for every dataset column, in column order
pub fn summarize_columns(dataset: &MergedDataset) -> Vec<ColumnSummary> {
    dataset
        .columns()
        .iter()
        .map(|name| {
            let values: Vec<&CellValue> = dataset
                .iter()
                .map(|record| record.get(name).unwrap_or(&EMPTY))
                .collect();

            let non_empty = values.iter().filter(|v| !v.is_empty()).count();
            let distinct = values
                .iter()
                .copied()
                .filter(|v| !v.is_empty())
                .map(distinct_key)
                .collect::<HashSet<_>>()
                .len();

            ColumnSummary {
                name: name.clone(),
                type_label: infer_type_label(&values),
                non_empty,
                distinct,
            }
        })
        .collect()
}

/// Export the merged dataset to an Excel file
pub fn write_workbook(dataset: &MergedDataset, generated_at: &DateTime<Local>, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    create_info_sheet(&mut workbook, dataset, generated_at)?;
    create_data_sheet(&mut workbook, dataset)?;
    create_summary_sheet(&mut workbook, dataset)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    log::info!("Excel report exported to: {}", path.display());
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD9E1F2))
        .set_border(FormatBorder::Thin)
}

fn write_header_row(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

fn create_info_sheet(workbook: &mut Workbook, dataset: &MergedDataset, generated_at: &DateTime<Local>) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Informacion_General")?;

    write_header_row(
        sheet,
        &["Fecha_Generacion", "Archivo_Origen", "Total_Registros", "Columnas_Disponibles"],
    )?;

    let origin = dataset
        .sources()
        .iter()
        .map(|s| s.path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    sheet.write_string(1, 0, generated_at.format("%Y-%m-%d %H:%M:%S").to_string())?;
    sheet.write_string(1, 1, &origin)?;
    sheet.write_number(1, 2, dataset.len() as f64)?;
    sheet.write_string(1, 3, dataset.columns().join(", "))?;

    sheet.autofit();
    Ok(())
}

fn create_data_sheet(workbook: &mut Workbook, dataset: &MergedDataset) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Datos_Completos")?;

    let headers: Vec<&str> = dataset.columns().iter().map(String::as_str).collect();
    write_header_row(sheet, &headers)?;
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for record in dataset.iter() {
        let row = (record.index + 1) as u32;
        for (col, name) in dataset.columns().iter().enumerate() {
            if let Some(value) = record.get(name) {
                write_value(sheet, row, col as u16, value, &date_format)?;
            }
        }
    }

    sheet.autofit();
    Ok(())
}

fn create_summary_sheet(workbook: &mut Workbook, dataset: &MergedDataset) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name("Resumen_Columnas")?;

    write_header_row(sheet, &["Columna", "Tipo_Dato", "Valores_No_Nulos", "Valores_Unicos"])?;

    for (idx, summary) in summarize_columns(dataset).iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &summary.name)?;
        sheet.write_string(row, 1, summary.type_label)?;
        sheet.write_number(row, 2, summary.non_empty as f64)?;
        sheet.write_number(row, 3, summary.distinct as f64)?;
    }

    sheet.autofit();
    Ok(())
}

/// Excel cannot hold dates before 1900; those come back as `None`
fn to_excel_datetime(dt: &NaiveDateTime) -> Option<ExcelDateTime> {
    let year = u16::try_from(dt.year()).ok()?;
    let seconds = dt.second() as f64 + dt.nanosecond() as f64 / 1e9;
    ExcelDateTime::from_ymd(year, dt.month() as u8, dt.day() as u8)
        .and_then(|date| date.and_hms(dt.hour() as u16, dt.minute() as u8, seconds))
        .ok()
}

fn write_value(ws: &mut Worksheet, row: u32, col: u16, value: &CellValue, date_format: &Format) -> Result<()> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(s) => {
            ws.write_string(row, col, s)?;
        }
        CellValue::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        CellValue::Bool(b) => {
            ws.write_boolean(row, col, *b)?;
        }
        CellValue::DateTime(dt) => match to_excel_datetime(dt) {
            Some(excel) => {
                ws.write_datetime_with_format(row, col, &excel, date_format)?;
            }
            None => {
                ws.write_string(row, col, value.to_text())?;
            }
        },
    }
    Ok(())
}
