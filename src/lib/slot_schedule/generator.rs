use log::{debug, info, warn};

use super::{
    error::SchedulerError,
    grid::{format_12h, DayWindow, TimeSlotGrid},
    models::{
        course_model::Course,
        schedule_model::{PlacementRequest, ScheduleOutcome, ScheduledEntry},
        Day,
    },
};

/// Assigns every section of every course a non-overlapping slot run on each
/// selected day.
///
/// Placement is first-fit: for each request the day's slots are scanned from
/// the start of the window and the earliest free run of the needed length is
/// taken. One class length applies to the whole batch. Courses are not
/// deduplicated, and requests that find no free run are reported in
/// [`ScheduleOutcome::Partial`] without stopping the run.
pub fn generate_schedule(
    courses: &[Course],
    days: &[Day],
    hours_per_class: f64,
    window: &DayWindow,
) -> Result<ScheduleOutcome, SchedulerError> {
    let slots_needed = window.slots_for_hours(hours_per_class)?;

    if courses.is_empty() || days.is_empty() {
        info!(
            "Nothing to schedule: {} course(s) on {} day(s)",
            courses.len(),
            days.len()
        );
        return Ok(ScheduleOutcome::Empty);
    }

    let mut grid = TimeSlotGrid::new(*window, days);
    let mut entries = Vec::new();
    let mut unplaced = Vec::new();

    for course in courses {
        for request in PlacementRequest::for_course(course, days) {
            match grid.allocate(request.day, slots_needed) {
                Some(slots) => {
                    let entry = ScheduledEntry {
                        start_time: format_12h(window.slot_time(slots.start)),
                        end_time: format_12h(window.slot_time(slots.end)),
                        start_slot: slots.start,
                        slot_count: slots.len(),
                        course_id: request.course_id,
                        course_code: request.course_code,
                        section_code: request.section_code,
                        section_number: request.section_number,
                        day: request.day,
                    };
                    debug!(
                        "Placed {} section {} on {} at {} - {}",
                        entry.course_code,
                        entry.section_number,
                        entry.day,
                        entry.start_time,
                        entry.end_time
                    );
                    entries.push(entry);
                }
                None => {
                    warn!(
                        "No free {}-slot run left on {} for {} section {}",
                        slots_needed, request.day, request.course_code, request.section_number
                    );
                    unplaced.push(request);
                }
            }
        }
    }

    info!(
        "Scheduled {} entries, {} request(s) left unplaced",
        entries.len(),
        unplaced.len()
    );

    if unplaced.is_empty() {
        Ok(ScheduleOutcome::Complete { entries })
    } else {
        Ok(ScheduleOutcome::Partial { entries, unplaced })
    }
}

#[cfg(test)]
#[path = "tests/generator_tests.rs"]
mod tests;
