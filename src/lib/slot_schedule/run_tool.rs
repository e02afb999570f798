use chrono::Local;
use log::{info, warn};

use super::{
    course_source::CourseSource,
    error::SchedulerError,
    generator::generate_schedule,
    grid::DayWindow,
    helpers::{preview_changes, select_courses},
    models::{
        course_model::Catalog,
        schedule_model::{SaveReport, ScheduleItem, ScheduleOutcome},
        Args, Config,
    },
    persist::ensure_can_save,
    schedule_saver::ScheduleSaver,
};

#[derive(Debug)]
pub struct RunSummary {
    pub outcome: ScheduleOutcome,
    /// Unified diff of the catalog sections the schedule would touch
    pub preview: String,
    /// What saving would do, including placements a later item rewrites
    pub planned: SaveReport,
    /// Present only when the schedule was saved
    pub report: Option<SaveReport>,
    /// Catalog fetched again after saving
    pub refreshed: Option<Catalog>,
}

pub async fn run<CS: CourseSource, SS: ScheduleSaver>(
    course_source: CS,
    schedule_saver: SS,
    args: &Args,
    config: &Config,
) -> Result<RunSummary, SchedulerError> {
    let window = DayWindow::from_config(config)?;
    let catalog = course_source.get_catalog().await?;
    info!("Found {} courses in catalog", catalog.courses.len());

    let courses = select_courses(&catalog.courses, &args.courses)?;
    let days = if args.days.is_empty() {
        &config.default_days
    } else {
        &args.days
    };
    let hours_per_class = args
        .hours_per_class
        .unwrap_or(config.default_hours_per_class);
    info!(
        "Scheduling {} course(s) on {:?}, {} hour(s) per class",
        courses.len(),
        days,
        hours_per_class
    );

    let outcome = generate_schedule(&courses, days, hours_per_class, &window)?;
    let items = outcome
        .entries()
        .iter()
        .map(ScheduleItem::from)
        .collect::<Vec<_>>();
    let (preview, planned) = preview_changes(&catalog, &items)?;
    if planned.overwritten > 0 {
        warn!(
            "{} placement(s) share a section with a later day and would not be kept",
            planned.overwritten
        );
    }

    if !args.save {
        info!("Preview only, pass --save to persist {} item(s)", items.len());
        return Ok(RunSummary {
            outcome,
            preview,
            planned,
            report: None,
            refreshed: None,
        });
    }
    if items.is_empty() {
        info!("Nothing to save");
        return Ok(RunSummary {
            outcome,
            preview,
            planned,
            report: None,
            refreshed: None,
        });
    }

    ensure_can_save(
        args.role,
        &catalog.enrollment_periods,
        Local::now().date_naive(),
    )?;
    let report = schedule_saver.save(&items).await?;
    info!(
        "Saved schedule: {} updated, {} created, {} failed",
        report.updated,
        report.created,
        report.failed().count()
    );

    let refreshed = course_source.get_catalog().await?;
    info!(
        "Catalog now holds {} sections",
        refreshed
            .courses
            .iter()
            .map(|course| course.sections.len())
            .sum::<usize>()
    );

    Ok(RunSummary {
        outcome,
        preview,
        planned,
        report: Some(report),
        refreshed: Some(refreshed),
    })
}
