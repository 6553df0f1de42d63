//! Payment and student transaction records

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::value::{CellValue, ReportRow, ToReportRow};

/// A fee payment made by (or owed by) a student
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub student_id: String,
    #[serde(default)]
    pub student_name: Option<String>,
    /// Amount in major units
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    /// PAID, PENDING, DUE, or anything the billing service emits
    #[serde(default)]
    pub status: Option<String>,
}

impl ToReportRow for Payment {
    fn to_report_row(&self) -> ReportRow {
        ReportRow::new()
            .with("studentId", self.student_id.as_str())
            .with("studentName", self.student_name.clone())
            .with("amount", amount_cell(self.amount))
            .with("date", date_cell(self.date.as_deref()))
            .with("method", self.method.clone())
            .with("status", self.status.clone())
    }
}

/// One line of a student's account statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentTransaction {
    #[serde(default)]
    pub date: Option<String>,
    pub description: String,
    #[serde(default)]
    pub reference: Option<String>,
    /// Signed amount in major units; charges are positive, credits negative
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ToReportRow for StudentTransaction {
    fn to_report_row(&self) -> ReportRow {
        ReportRow::new()
            .with("date", date_cell(self.date.as_deref()))
            .with("description", self.description.as_str())
            .with("reference", self.reference.clone())
            .with("amount", amount_cell(self.amount))
            .with("status", self.status.clone())
    }
}

fn date_cell(date: Option<&str>) -> CellValue {
    date.map(CellValue::date_from_text).unwrap_or_default()
}

/// Amounts too large for whole cents stay plain numbers
fn amount_cell(amount: Option<f64>) -> CellValue {
    match amount {
        Some(amount) => Money::from_major(amount)
            .map(CellValue::Currency)
            .unwrap_or(CellValue::Number(amount)),
        None => CellValue::Empty,
    }
}
