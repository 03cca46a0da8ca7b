use chrono::{DateTime, Datelike, Local};

/// Day/month/year trackers for rollover detection. The zero state forces a
/// full rollover on the very first observation.
#[derive(Debug)]
pub(crate) struct RolloverState {
    last_day: u32,
    last_month: u32,
    last_year: i32,
}

impl Default for RolloverState {
    fn default() -> Self {
        Self {
            last_day: 0,
            last_month: 1,
            last_year: 0,
        }
    }
}

impl RolloverState {
    /// Advances the trackers in year, month, day order and reports whether
    /// the calendar day changed since the previous observation. At most one
    /// day change is reported per real calendar day, however often this is
    /// polled.
    pub(crate) fn observe(&mut self, now: DateTime<Local>) -> bool {
        if now.year() > self.last_year {
            log::info!("year change");
            self.last_year = now.year();
            self.last_month = 1;
            self.last_day = 0;
        }
        if now.month() > self.last_month {
            log::info!("month change");
            self.last_month = now.month();
            self.last_day = 0;
        }
        if now.day() > self.last_day {
            log::info!("day change");
            self.last_day = now.day();
            return true;
        }
        false
    }
}
