//! Turning a confirmed schedule into section updates.
use std::collections::HashMap;

use chrono::NaiveDate;
use log::{debug, warn};

use super::{
    error::SchedulerError,
    models::{
        course_model::{Course, EnrollmentPeriod, Section},
        schedule_model::{ItemResult, SaveAction, SaveReport, ScheduleItem},
        Day, Role,
    },
};

/// Alphabetic section code for a 0-based position: A..Z, AA, AB, ...
pub fn section_code(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Schedule string stored on a section, e.g. "Monday 08:00 AM - 09:00 AM".
pub fn format_schedule(day: Day, start_time: &str, end_time: &str) -> String {
    format!("{} {} - {}", day, start_time, end_time)
}

/// Saving is reserved to administrators and only opens once at least one
/// enrollment period lies in the past.
pub fn ensure_can_save(
    role: Role,
    periods: &[EnrollmentPeriod],
    today: NaiveDate,
) -> Result<(), SchedulerError> {
    if role != Role::Admin {
        return Err(SchedulerError::Forbidden { role });
    }
    if !periods.iter().any(|period| period.has_ended(today)) {
        return Err(SchedulerError::NoEndedEnrollmentPeriod);
    }
    Ok(())
}

/* first generated code past the current section count that is still free */
fn next_section_code(sections: &[Section]) -> String {
    (sections.len()..)
        .map(section_code)
        .find(|code| sections.iter().all(|section| &section.code != code))
        .unwrap_or_else(|| section_code(sections.len()))
}

fn find_section(sections: &[Section], item: &ScheduleItem) -> Option<usize> {
    if let Some(code) = &item.section_code {
        if let Some(index) = sections.iter().position(|section| &section.code == code) {
            return Some(index);
        }
    }
    item.section_number
        .and_then(|number| (number as usize).checked_sub(1))
        .filter(|&index| index < sections.len())
}

/// Upserts one section per item. Items are independent: an unknown course
/// fails its item only, and everything applied before stays applied.
///
/// A section holds a single schedule string, so when a later item of the
/// batch writes a section again, the earlier item's placement is lost. That
/// earlier item is reported as failed and counted in `overwritten`.
pub fn apply_schedule(courses: &mut [Course], items: &[ScheduleItem]) -> SaveReport {
    let mut report = SaveReport::default();
    // (course position, section code) -> index of the result that wrote it last
    let mut written: HashMap<(usize, String), usize> = HashMap::new();

    for item in items {
        let Some(position) = courses
            .iter()
            .position(|course| course.id == item.course_id)
        else {
            warn!("Skipping schedule for unknown course {}", item.course_id);
            report.results.push(ItemResult {
                course_id: item.course_id.clone(),
                success: false,
                action: None,
                section_code: None,
                error: Some(format!("Course {} not found", item.course_id)),
            });
            continue;
        };
        let course = &mut courses[position];

        let schedule = format_schedule(item.day, &item.start_time, &item.end_time);
        let (action, code) = match find_section(&course.sections, item) {
            Some(index) => {
                let section = &mut course.sections[index];
                section.schedule = Some(schedule.clone());
                report.updated += 1;
                (SaveAction::Updated, section.code.clone())
            }
            None => {
                let code = next_section_code(&course.sections);
                course.sections.push(Section {
                    code: code.clone(),
                    schedule: Some(schedule.clone()),
                    capacity: None,
                });
                report.created += 1;
                (SaveAction::Created, code)
            }
        };
        debug!("{:?} section {} of {}", action, code, course.code);

        if let Some(previous) = written.insert((position, code.clone()), report.results.len()) {
            warn!(
                "Section {} of {} is written twice in one batch, keeping {}",
                code, course.code, schedule
            );
            let lost = &mut report.results[previous];
            lost.success = false;
            lost.error = Some(format!(
                "Section {} was rewritten later in the batch with {}",
                code, schedule
            ));
            report.overwritten += 1;
        }

        report.results.push(ItemResult {
            course_id: item.course_id.clone(),
            success: true,
            action: Some(action),
            section_code: Some(code),
            error: None,
        });
    }

    debug!(
        "Resolved {} schedule item(s): {} section update(s), {} new section(s), {} overwritten",
        items.len(),
        report.updated,
        report.created,
        report.overwritten
    );
    report
}

#[cfg(test)]
#[path = "tests/persist_tests.rs"]
mod tests;
