//! Student and course records

use serde::{Deserialize, Serialize};

use super::value::{CellValue, ReportRow, ToReportRow};

/// A student as returned by the student service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// ISO date or timestamp
    #[serde(default)]
    pub enrollment_date: Option<String>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl ToReportRow for Student {
    fn to_report_row(&self) -> ReportRow {
        ReportRow::new()
            .with("studentId", self.student_id.as_str())
            .with("name", self.full_name())
            .with("email", self.email.clone())
            .with("faculty", self.faculty.clone())
            .with("department", self.department.clone())
            .with(
                "enrollmentDate",
                self.enrollment_date
                    .as_deref()
                    .map(CellValue::date_from_text)
                    .unwrap_or_default(),
            )
    }
}

/// A course offering
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub semester: Option<String>,
}

impl ToReportRow for Course {
    fn to_report_row(&self) -> ReportRow {
        ReportRow::new()
            .with("code", self.code.as_str())
            .with("name", self.name.as_str())
            .with("department", self.department.clone())
            .with("credits", self.credits)
            .with("instructor", self.instructor.clone())
            .with("semester", self.semester.clone())
    }
}
