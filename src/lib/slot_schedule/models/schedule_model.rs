//! Module with the generator's output and the persist endpoint's wire model
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{course_model::Course, Day};

/// One (course, section, day) combination that asks for a slot run.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRequest {
    pub course_id: String,
    pub course_code: String,
    pub section_code: Option<String>,
    /// 1-based position in the course's section list, 1 for courses without sections
    pub section_number: u32,
    pub day: Day,
}

impl PlacementRequest {
    /// Fans a course out into requests: every section on every day, or one
    /// request per day when the course has no sections yet.
    pub fn for_course(course: &Course, days: &[Day]) -> Vec<PlacementRequest> {
        let sections: Vec<(Option<String>, u32)> = if course.sections.is_empty() {
            vec![(None, 1)]
        } else {
            course
                .sections
                .iter()
                .zip(1..)
                .map(|(section, number)| (Some(section.code.clone()), number))
                .collect()
        };

        sections
            .into_iter()
            .flat_map(|(section_code, section_number)| {
                days.iter().map(move |&day| PlacementRequest {
                    course_id: course.id.clone(),
                    course_code: course.code.clone(),
                    section_code: section_code.clone(),
                    section_number,
                    day,
                })
            })
            .collect()
    }
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEntry {
    pub course_id: String,
    pub course_code: String,
    pub section_code: Option<String>,
    pub section_number: u32,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub start_slot: usize,
    pub slot_count: usize,
}

impl ScheduledEntry {
    pub fn slots(&self) -> Range<usize> {
        self.start_slot..self.start_slot + self.slot_count
    }

    pub fn overlaps(&self, other: &ScheduledEntry) -> bool {
        self.day == other.day
            && self.start_slot < other.start_slot + other.slot_count
            && other.start_slot < self.start_slot + self.slot_count
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Nothing was requested: no courses or no days selected
    Empty,
    /// Every request got a slot run
    Complete { entries: Vec<ScheduledEntry> },
    /// Some requests found no free run on their day
    Partial {
        entries: Vec<ScheduledEntry>,
        unplaced: Vec<PlacementRequest>,
    },
}

impl ScheduleOutcome {
    pub fn entries(&self) -> &[ScheduledEntry] {
        match self {
            ScheduleOutcome::Empty => &[],
            ScheduleOutcome::Complete { entries } | ScheduleOutcome::Partial { entries, .. } => {
                entries
            }
        }
    }

    pub fn unplaced(&self) -> &[PlacementRequest] {
        match self {
            ScheduleOutcome::Partial { unplaced, .. } => unplaced,
            _ => &[],
        }
    }
}

/// One item of the batch handed to the persist endpoint.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub course_id: String,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_code: Option<String>,
}

/// Entries for courses without sections carry no section reference, so
/// persisting them creates a fresh section per entry.
impl From<&ScheduledEntry> for ScheduleItem {
    fn from(entry: &ScheduledEntry) -> Self {
        let section_number = entry.section_code.as_ref().map(|_| entry.section_number);
        ScheduleItem {
            course_id: entry.course_id.clone(),
            day: entry.day,
            start_time: entry.start_time.clone(),
            end_time: entry.end_time.clone(),
            section_number,
            section_code: entry.section_code.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaveAction {
    Updated,
    Created,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    pub course_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<SaveAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    pub results: Vec<ItemResult>,
    pub updated: usize,
    pub created: usize,
    /// Placements lost because a later item rewrote the same section
    #[serde(default)]
    pub overwritten: usize,
}

impl SaveReport {
    pub fn failed(&self) -> impl Iterator<Item = &ItemResult> {
        self.results.iter().filter(|result| !result.success)
    }
}
