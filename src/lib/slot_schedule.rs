//! Slot scheduling for course sections: generation of non-overlapping
//! weekly time slots and their persistence as section schedules.
pub mod course_source;
pub mod error;
pub mod generator;
pub mod grid;
pub mod helpers;
pub mod models;
pub mod persist;
pub mod run_tool;
pub mod schedule_saver;
