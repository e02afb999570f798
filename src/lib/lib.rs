pub mod slot_schedule;
