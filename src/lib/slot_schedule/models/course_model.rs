//! Module with course catalog model compatible with the enrollment REST API
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    Open,
    Closed,
    Archived,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub credits: u32,
    pub status: CourseStatus,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Course {
    pub fn is_open(&self) -> bool {
        self.status == CourseStatus::Open
    }
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPeriod {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl EnrollmentPeriod {
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }
}

/// Everything the scheduler reads from the course source.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub courses: Vec<Course>,
    #[serde(default)]
    pub enrollment_periods: Vec<EnrollmentPeriod>,
}
