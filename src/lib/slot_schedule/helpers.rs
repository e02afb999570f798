use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use log::{debug, info, warn};
use similar::TextDiff;

use super::{
    error::SchedulerError,
    models::{
        course_model::{Catalog, Course},
        schedule_model::{SaveReport, ScheduleItem, ScheduleOutcome},
    },
    persist::apply_schedule,
};

pub fn log_all_courses(courses: &[Course]) {
    for course in courses.iter() {
        debug!(
            "Course {} ({}) is {:?} with {} section(s)",
            course.code,
            course.name,
            course.status,
            course.sections.len()
        );
    }
}

pub fn read_catalog(path: &Path) -> Result<Catalog, SchedulerError> {
    info!("Reading catalog from {}", std::path::absolute(path)?.display());
    let catalog_file = BufReader::new(File::open(path)?);
    let catalog: Catalog = serde_json::from_reader(catalog_file)?;
    log_all_courses(&catalog.courses);
    Ok(catalog)
}

pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), SchedulerError> {
    info!(
        "Writing {} courses to {}",
        catalog.courses.len(),
        std::path::absolute(path)?.display()
    );
    let catalog_file = BufWriter::new(File::create(path)?);
    Ok(serde_json::to_writer_pretty(catalog_file, catalog)?)
}

/// Picks the courses to schedule, keeping the order and any repeats of
/// `codes`. With no codes every OPEN course is taken. Courses that are not
/// OPEN are never eligible and are skipped.
pub fn select_courses(
    courses: &[Course],
    codes: &[String],
) -> Result<Vec<Course>, SchedulerError> {
    if codes.is_empty() {
        return Ok(courses
            .iter()
            .filter(|course| course.is_open())
            .cloned()
            .collect());
    }

    let mut selected = Vec::with_capacity(codes.len());
    for code in codes {
        let course = courses
            .iter()
            .find(|course| course.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| SchedulerError::UnknownCourse { code: code.clone() })?;
        if course.is_open() {
            selected.push(course.clone());
        } else {
            warn!(
                "Course {} is {:?}, only OPEN courses can be scheduled",
                course.code, course.status
            );
        }
    }
    Ok(selected)
}

/// Unified diff of the catalog before and after applying `items`, empty
/// when nothing would change, together with the report saving would give.
pub fn preview_changes(
    catalog: &Catalog,
    items: &[ScheduleItem],
) -> Result<(String, SaveReport), SchedulerError> {
    let mut updated = catalog.courses.clone();
    let report = apply_schedule(&mut updated, items);

    let old_json = serde_json::to_string_pretty(&catalog.courses)?;
    let new_json = serde_json::to_string_pretty(&updated)?;
    let diff = TextDiff::from_lines(&old_json, &new_json);
    if diff.ratio() == 1.0 {
        return Ok((String::new(), report));
    }
    let preview = diff
        .unified_diff()
        .header("catalog", "catalog (scheduled)")
        .to_string();
    Ok((preview, report))
}

/* human readable table of the outcome, one line per entry */
pub fn format_outcome(outcome: &ScheduleOutcome) -> String {
    let mut lines = Vec::new();
    for entry in outcome.entries() {
        let section = entry
            .section_code
            .clone()
            .unwrap_or_else(|| format!("#{}", entry.section_number));
        lines.push(format!(
            "{:<10} {:<6} {:<9} {} - {}",
            entry.course_code, section, entry.day, entry.start_time, entry.end_time
        ));
    }
    for request in outcome.unplaced() {
        lines.push(format!(
            "{:<10} {:<6} {:<9} no free slot",
            request.course_code,
            request
                .section_code
                .clone()
                .unwrap_or_else(|| format!("#{}", request.section_number)),
            request.day
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "tests/helpers_tests.rs"]
mod tests;
