use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use enrollment_scheduler::slot_schedule::course_source::{CourseSource, JsonCatalogSource};
use enrollment_scheduler::slot_schedule::error::SchedulerError;
use enrollment_scheduler::slot_schedule::helpers::read_catalog;
use enrollment_scheduler::slot_schedule::models::course_model::Catalog;
use enrollment_scheduler::slot_schedule::models::schedule_model::{
    SaveReport, ScheduleItem, ScheduleOutcome,
};
use enrollment_scheduler::slot_schedule::models::{Args, Config, Day, Role};
use enrollment_scheduler::slot_schedule::persist::apply_schedule;
use enrollment_scheduler::slot_schedule::run_tool::run;
use enrollment_scheduler::slot_schedule::schedule_saver::{JsonCatalogSaver, ScheduleSaver};
use figment::providers::{Format, Json};
use figment::Figment;

const CATALOG_PATH: &str = "tests/test.catalog.json";

pub struct TestSource {
    pub catalog_path: PathBuf,
    pub fetches: Arc<AtomicUsize>,
}

impl CourseSource for TestSource {
    async fn get_catalog(&self) -> Result<Catalog, SchedulerError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        read_catalog(&self.catalog_path)
    }
}

// applies the batch to an in-memory copy and remembers what it was given
pub struct TestSaver {
    pub catalog: Mutex<Catalog>,
    pub received: Arc<Mutex<Vec<ScheduleItem>>>,
}

impl ScheduleSaver for TestSaver {
    async fn save(&self, items: &[ScheduleItem]) -> Result<SaveReport, SchedulerError> {
        self.received.lock().unwrap().extend_from_slice(items);
        let mut catalog = self.catalog.lock().unwrap();
        Ok(apply_schedule(&mut catalog.courses, items))
    }
}

fn make_args(courses: &[&str], days: &[Day], role: Role, save: bool) -> Args {
    Args {
        catalog_json_path: PathBuf::from(CATALOG_PATH),
        config_json_path: PathBuf::from("_"),
        courses: courses.iter().map(|code| code.to_string()).collect(),
        days: days.to_vec(),
        hours_per_class: Some(1.0),
        role,
        save,
    }
}

fn make_test_pair() -> (TestSource, TestSaver, Arc<AtomicUsize>, Arc<Mutex<Vec<ScheduleItem>>>) {
    let fetches = Arc::new(AtomicUsize::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));
    let source = TestSource {
        catalog_path: PathBuf::from(CATALOG_PATH),
        fetches: fetches.clone(),
    };
    let saver = TestSaver {
        catalog: Mutex::new(read_catalog(&PathBuf::from(CATALOG_PATH)).unwrap()),
        received: received.clone(),
    };
    (source, saver, fetches, received)
}

#[tokio::test]
async fn preview_does_not_save() {
    let (source, saver, fetches, received) = make_test_pair();
    let args = make_args(&[], &[Day::Monday], Role::Admin, false);

    let summary = run(source, saver, &args, &Config::default()).await.unwrap();

    let ScheduleOutcome::Complete { entries } = &summary.outcome else {
        panic!("expected a complete schedule");
    };
    let placed = entries
        .iter()
        .map(|entry| {
            (
                entry.course_code.as_str(),
                entry.section_code.as_deref(),
                entry.start_time.as_str(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        placed,
        vec![
            ("CS101", Some("A"), "08:00 AM"),
            ("CS101", Some("B"), "09:00 AM"),
            ("CS205", None, "10:00 AM"),
        ]
    );
    assert!(summary.report.is_none());
    assert!(summary.refreshed.is_none());
    assert_eq!(summary.planned.updated, 2);
    assert_eq!(summary.planned.created, 1);
    assert!(summary.preview.contains("Monday 09:00 AM - 10:00 AM"));
    assert!(summary
        .preview
        .lines()
        .any(|line| line.starts_with('-') && line.contains("Friday 01:00 PM - 02:00 PM")));
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn admin_saves_and_catalog_is_refetched() {
    let (source, saver, fetches, received) = make_test_pair();
    let args = make_args(&[], &[Day::Monday], Role::Admin, true);

    let summary = run(source, saver, &args, &Config::default()).await.unwrap();

    let report = summary.report.unwrap();
    assert_eq!(report.updated, 2);
    assert_eq!(report.created, 1);
    assert_eq!(report.failed().count(), 0);
    assert_eq!(summary.refreshed.unwrap().courses.len(), 3);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 3);
    assert_eq!(received[0].section_number, Some(1));
    assert_eq!(received[1].section_code.as_deref(), Some("B"));
    assert_eq!(received[2].section_number, None);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn faculty_cannot_save() {
    let (source, saver, _fetches, received) = make_test_pair();
    let args = make_args(&["CS205"], &[Day::Tuesday], Role::Faculty, true);

    let result = run(source, saver, &args, &Config::default()).await;

    assert!(matches!(
        result,
        Err(SchedulerError::Forbidden { role: Role::Faculty })
    ));
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn closed_course_yields_nothing_to_save() {
    let (source, saver, fetches, received) = make_test_pair();
    let args = make_args(&["HIST110"], &[Day::Monday], Role::Admin, true);

    let summary = run(source, saver, &args, &Config::default()).await.unwrap();

    assert_eq!(summary.outcome, ScheduleOutcome::Empty);
    assert!(summary.report.is_none());
    assert!(summary.preview.is_empty());
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_course_stops_the_run() {
    let (source, saver, _fetches, _received) = make_test_pair();
    let args = make_args(&["PHYS900"], &[Day::Monday], Role::Admin, false);

    let result = run(source, saver, &args, &Config::default()).await;
    assert!(matches!(result, Err(SchedulerError::UnknownCourse { .. })));
}

#[tokio::test]
async fn default_days_and_duration_come_from_config() {
    let (source, saver, _fetches, _received) = make_test_pair();
    let mut args = make_args(&["CS205"], &[], Role::Admin, false);
    args.hours_per_class = None;
    let config: Config = Figment::new()
        .merge(Json::string(
            r#"{ "default_days": ["tuesday", "thursday"], "default_hours_per_class": 2.5 }"#,
        ))
        .extract()
        .unwrap();

    let summary = run(source, saver, &args, &config).await.unwrap();

    let entries = summary.outcome.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].day, Day::Tuesday);
    assert_eq!(entries[1].day, Day::Thursday);
    assert_eq!(entries[0].end_time, "10:30 AM");
}

#[tokio::test]
async fn short_window_from_config_leaves_requests_unplaced() {
    let (source, saver, _fetches, _received) = make_test_pair();
    let args = make_args(&[], &[Day::Wednesday], Role::Admin, false);
    let config: Config = Figment::new()
        .merge(Json::string(r#"{ "day_start": "09:00", "day_end": "11:00" }"#))
        .extract()
        .unwrap();

    let summary = run(source, saver, &args, &config).await.unwrap();

    let ScheduleOutcome::Partial { entries, unplaced } = &summary.outcome else {
        panic!("expected a partial schedule");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].start_time, "10:00 AM");
    assert_eq!(entries[1].end_time, "11:00 AM");
    assert_eq!(unplaced.len(), 1);
    assert_eq!(unplaced[0].course_code, "CS205");
}

#[tokio::test]
async fn catalog_file_is_updated_in_place() {
    let catalog_path =
        std::env::temp_dir().join(format!("slot-schedule-{}.json", std::process::id()));
    std::fs::copy(CATALOG_PATH, &catalog_path).unwrap();

    let mut args = make_args(&["CS205"], &[Day::Monday, Day::Tuesday], Role::Admin, true);
    args.catalog_json_path = catalog_path.clone();
    let source = JsonCatalogSource {
        catalog_json_path: catalog_path.clone(),
    };
    let saver = JsonCatalogSaver {
        catalog_json_path: catalog_path.clone(),
    };

    let summary = run(source, saver, &args, &Config::default()).await.unwrap();
    let catalog = read_catalog(&catalog_path).unwrap();
    std::fs::remove_file(&catalog_path).unwrap();

    assert_eq!(summary.report.unwrap().created, 2);
    let cs205 = catalog
        .courses
        .iter()
        .find(|course| course.code == "CS205")
        .unwrap();
    let sections = cs205
        .sections
        .iter()
        .map(|section| (section.code.as_str(), section.schedule.as_deref()))
        .collect::<Vec<_>>();
    assert_eq!(
        sections,
        vec![
            ("A", Some("Monday 08:00 AM - 09:00 AM")),
            ("B", Some("Tuesday 08:00 AM - 09:00 AM")),
        ]
    );
    assert_eq!(catalog.enrollment_periods.len(), 2);
}

#[tokio::test]
async fn section_on_several_days_keeps_only_the_last_day() {
    let catalog_path =
        std::env::temp_dir().join(format!("slot-schedule-days-{}.json", std::process::id()));
    std::fs::copy(CATALOG_PATH, &catalog_path).unwrap();

    let days = [Day::Monday, Day::Wednesday, Day::Friday];
    let mut args = make_args(&["CS101"], &days, Role::Admin, true);
    args.catalog_json_path = catalog_path.clone();
    let source = JsonCatalogSource {
        catalog_json_path: catalog_path.clone(),
    };
    let saver = JsonCatalogSaver {
        catalog_json_path: catalog_path.clone(),
    };

    let summary = run(source, saver, &args, &Config::default()).await.unwrap();
    std::fs::remove_file(&catalog_path).unwrap();

    assert_eq!(summary.outcome.entries().len(), 6);
    assert_eq!(summary.planned.overwritten, 4);
    let report = summary.report.unwrap();
    assert_eq!((report.updated, report.created), (6, 0));
    assert_eq!(report.overwritten, 4);
    assert_eq!(report.failed().count(), 4);
    assert!(report
        .failed()
        .all(|result| result.error.as_deref().is_some_and(|e| e.contains("rewritten"))));

    let refreshed = summary.refreshed.unwrap();
    let cs101 = refreshed
        .courses
        .iter()
        .find(|course| course.code == "CS101")
        .unwrap();
    let schedules = cs101
        .sections
        .iter()
        .map(|section| section.schedule.as_deref())
        .collect::<Vec<_>>();
    assert_eq!(
        schedules,
        vec![
            Some("Friday 08:00 AM - 09:00 AM"),
            Some("Friday 09:00 AM - 10:00 AM"),
        ]
    );
}
