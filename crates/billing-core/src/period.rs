//! Target period selection.

use billing_domain::BillingPeriod;
use chrono::NaiveDate;

use crate::time::Clock;

/// Picks the period a run bills for: the calendar month after today.
pub struct PeriodResolver;

impl PeriodResolver {
    pub fn resolve(today: NaiveDate) -> BillingPeriod {
        BillingPeriod::following(today)
    }

    pub fn resolve_with(clock: &dyn Clock) -> BillingPeriod {
        Self::resolve(clock.today())
    }
}
