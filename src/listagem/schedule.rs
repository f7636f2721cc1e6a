use crate::evento::model::{parse_local_date_time, InvalidDateTime};
use chrono::NaiveDateTime;

// pt-BR
const DAY_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Portuguese schedule information for an event's date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub start_day: String,
    pub start_time: String,
    pub full_schedule: String,
    pub is_multi_day: bool,
}

impl Schedule {
    pub fn new(starts_at: NaiveDateTime, ends_at: NaiveDateTime) -> Self {
        let start_day = starts_at.format(DAY_FORMAT).to_string();
        let start_time = starts_at.format(TIME_FORMAT).to_string();
        let end_day = ends_at.format(DAY_FORMAT).to_string();
        let end_time = ends_at.format(TIME_FORMAT).to_string();

        let is_multi_day = start_day != end_day;

        let full_schedule = if is_multi_day {
            format!("{} {} - {} {}", start_day, start_time, end_day, end_time)
        } else if start_time != end_time {
            format!("{} das {} às {}", start_day, start_time, end_time)
        } else {
            format!("{} às {}", start_day, start_time)
        };

        Self {
            start_day,
            start_time,
            full_schedule,
            is_multi_day,
        }
    }
}

pub fn format_schedule(starts_at: &str, ends_at: &str) -> Result<Schedule, InvalidDateTime> {
    Ok(Schedule::new(
        parse_local_date_time(starts_at)?,
        parse_local_date_time(ends_at)?,
    ))
}
