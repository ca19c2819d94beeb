//! Cell value representation for spreadsheet sources

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// A single spreadsheet cell, as read from a source file
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell (or a cell the reader could not represent)
    Empty,
    /// Text value
    Text(String),
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Date and time, without timezone
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Check if this cell carries no value
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Whether the value is a whole number, including floats with no fraction
    pub fn is_integral(&self) -> bool {
        match self {
            CellValue::Int(_) => true,
            CellValue::Float(f) => f.is_finite() && f.fract() == 0.0,
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    /// Render the value as text, the way it is compared and displayed.
    ///
    /// Whole floats print without the fraction (`12345.0` -> `12345`) since
    /// spreadsheets store every number as a float.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            CellValue::Bool(true) => "True".to_string(),
            CellValue::Bool(false) => "False".to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Parse a raw text field (CSV sources). Only blanks are special-cased.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match excel_serial_to_datetime(dt.as_f64()) {
                Some(parsed) => CellValue::DateTime(parsed),
                None => CellValue::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .map(CellValue::DateTime)
                .unwrap_or_else(|_| CellValue::Text(s.clone())),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }
}

/// Convert an Excel serial date (1900 date system) to a timestamp
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    // Serial 0 is 1899-12-30 once the 1900 leap-year bug is accounted for
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_float_renders_as_integer() {
        assert_eq!(CellValue::Float(123456789.0).to_text(), "123456789");
        assert_eq!(CellValue::Float(7.5).to_text(), "7.5");
        assert_eq!(CellValue::Int(42).to_text(), "42");
    }

    #[test]
    fn test_empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        assert!(!CellValue::Text(" ".to_string()).is_empty());
        assert!(!CellValue::Int(0).is_empty());
    }

    #[test]
    fn test_bool_and_datetime_text() {
        assert_eq!(CellValue::Bool(true).to_text(), "True");
        let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_text(), "2024-03-01 08:30:00");
    }

    #[test]
    fn test_excel_serial_conversion() {
        let dt = excel_serial_to_datetime(45352.5).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 12:00");
        assert!(excel_serial_to_datetime(-1.0).is_none());
    }
}
