use chrono::{DateTime, Local, NaiveDate, Utc};

use billing_core::Clock;

/// Real-time clock. Timestamps are UTC; the billing date follows the local calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
