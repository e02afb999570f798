//! Daily time window and per-day slot occupancy.
use std::{collections::BTreeMap, ops::Range};

use chrono::{Duration, NaiveTime};

use super::{
    error::SchedulerError,
    models::{Config, Day},
};

/// The part of the day in which classes may run, cut into equal slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    start: NaiveTime,
    slot_minutes: u32,
    slot_count: usize,
}

impl DayWindow {
    /// Builds a window from its bounds. A trailing remainder shorter than a
    /// slot is not usable and gets cut off.
    pub fn new(
        start: NaiveTime,
        end: NaiveTime,
        slot_minutes: u32,
    ) -> Result<Self, SchedulerError> {
        if slot_minutes == 0 {
            return Err(SchedulerError::InvalidWindow {
                message: "slot width must be positive".to_owned(),
            });
        }
        if end <= start {
            return Err(SchedulerError::InvalidWindow {
                message: format!("window end {} is not after start {}", end, start),
            });
        }

        let minutes = (end - start).num_minutes();
        let slot_count = (minutes / i64::from(slot_minutes)) as usize;
        if slot_count == 0 {
            return Err(SchedulerError::InvalidWindow {
                message: format!("window {}-{} is shorter than one slot", start, end),
            });
        }

        Ok(DayWindow {
            start,
            slot_minutes,
            slot_count,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SchedulerError> {
        let start = parse_clock(&config.day_start)?;
        let end = parse_clock(&config.day_end)?;
        DayWindow::new(start, end, config.slot_minutes)
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Start time of the slot at `index`; `index == slot_count` is the window end.
    pub fn slot_time(&self, index: usize) -> NaiveTime {
        self.start + Duration::minutes(i64::from(self.slot_minutes) * index as i64)
    }

    /// Number of contiguous slots a class of `hours` occupies, rounded up.
    pub fn slots_for_hours(&self, hours: f64) -> Result<usize, SchedulerError> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(SchedulerError::InvalidDuration { hours });
        }

        let slots_needed = (hours * 60.0 / f64::from(self.slot_minutes)).ceil() as usize;
        if slots_needed > self.slot_count {
            return Err(SchedulerError::DurationExceedsWindow {
                slots_needed,
                slots_available: self.slot_count,
            });
        }
        Ok(slots_needed)
    }
}

impl Default for DayWindow {
    /// 08:00-17:30 in 30 minute slots.
    fn default() -> Self {
        DayWindow {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            slot_minutes: 30,
            slot_count: 19,
        }
    }
}

fn parse_clock(value: &str) -> Result<NaiveTime, SchedulerError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|err| SchedulerError::InvalidWindow {
        message: format!("cannot parse time {:?}: {}", value, err),
    })
}

/// 12-hour clock used in schedule strings, e.g. "08:00 AM".
pub fn format_12h(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Occupancy flags for every eligible day. Lives for a single generation run.
#[derive(Debug, Clone)]
pub struct TimeSlotGrid {
    occupied: BTreeMap<Day, Vec<bool>>,
}

impl TimeSlotGrid {
    pub fn new(window: DayWindow, days: &[Day]) -> Self {
        let occupied = days
            .iter()
            .map(|&day| (day, vec![false; window.slot_count()]))
            .collect();
        TimeSlotGrid { occupied }
    }

    /// First start index (ascending scan) whose run of `len` slots is free.
    pub fn find_free_run(&self, day: Day, len: usize) -> Option<usize> {
        let slots = self.occupied.get(&day)?;
        if len == 0 || len > slots.len() {
            return None;
        }
        (0..=slots.len() - len)
            .find(|&start| slots[start..start + len].iter().all(|taken| !taken))
    }

    /// Marks `slots` taken. Returns false, leaving the grid untouched, when
    /// the day is not in the grid, the range falls outside the window or any
    /// of its slots is already taken.
    pub fn occupy(&mut self, day: Day, slots: Range<usize>) -> bool {
        let Some(flags) = self
            .occupied
            .get_mut(&day)
            .and_then(|flags| flags.get_mut(slots))
        else {
            return false;
        };
        if flags.iter().any(|&taken| taken) {
            return false;
        }
        flags.fill(true);
        true
    }

    /// First-fit allocation: finds the earliest free run and marks it taken.
    pub fn allocate(&mut self, day: Day, len: usize) -> Option<Range<usize>> {
        let start = self.find_free_run(day, len)?;
        let slots = start..start + len;
        self.occupy(day, slots.clone()).then_some(slots)
    }

    pub fn occupied_count(&self, day: Day) -> usize {
        self.occupied
            .get(&day)
            .map(|flags| flags.iter().filter(|&&taken| taken).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "tests/grid_tests.rs"]
mod tests;
