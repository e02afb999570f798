use std::{fmt, path::PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod course_model;
pub mod schedule_model;

/// Weekdays on which classes can be scheduled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        };
        f.write_str(name)
    }
}

/// Role of whoever runs the tool. Only administrators may save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Student => "student",
        };
        f.write_str(name)
    }
}

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to catalog.json with courses, their sections and enrollment periods.
/// 2. Path to config.json with the daily window and defaults.
/// 3. Course codes to schedule. All OPEN courses are taken when none are given.
/// 4. Days to schedule on. Falls back to `default_days` from config.
/// 5. Length of one class in hours. Falls back to `default_hours_per_class`.
/// 6. Role of the caller and the explicit confirmation to save.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "catalog.json")]
    pub catalog_json_path: PathBuf,
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long = "course", value_name = "CODE")]
    pub courses: Vec<String>,
    #[arg(long = "day", value_enum, value_name = "DAY")]
    pub days: Vec<Day>,
    #[arg(long, value_name = "HOURS")]
    pub hours_per_class: Option<f64>,
    #[arg(long, value_enum, default_value_t = Role::Faculty)]
    pub role: Role,
    /// Persist the generated schedule instead of only previewing it
    #[arg(long)]
    pub save: bool,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Daily window start and end, "HH:MM" in 24-hour format
/// 2. Width of one slot in minutes
/// 3. Defaults for the class length and the scheduled days
/// 4. Optional endpoints; the catalog file is used when they are absent
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "default_day_start")]
    pub day_start: String,
    #[serde(default = "default_day_end")]
    pub day_end: String,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
    #[serde(default = "default_hours_per_class")]
    pub default_hours_per_class: f64,
    #[serde(default = "default_days")]
    pub default_days: Vec<Day>,
    #[serde(default)]
    pub course_source_url: Option<String>,
    #[serde(default)]
    pub save_url: Option<String>,
}

fn default_day_start() -> String {
    "08:00".to_owned()
}

fn default_day_end() -> String {
    "17:30".to_owned()
}

fn default_slot_minutes() -> u32 {
    30
}

fn default_hours_per_class() -> f64 {
    1.0
}

fn default_days() -> Vec<Day> {
    vec![Day::Monday, Day::Wednesday, Day::Friday]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            day_start: default_day_start(),
            day_end: default_day_end(),
            slot_minutes: default_slot_minutes(),
            default_hours_per_class: default_hours_per_class(),
            default_days: default_days(),
            course_source_url: None,
            save_url: None,
        }
    }
}
