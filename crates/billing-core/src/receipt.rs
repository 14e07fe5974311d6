use billing_domain::{
    ApartmentId, ApartmentProfile, BillingPeriod, ChargeBreakdown, RateSchedule, ReceiptRef,
};

use crate::ReceiptError;

/// Persists a human-readable receipt for one breakdown and returns where it lives.
///
/// Implementations must have written the document before returning `Ok`, and
/// the reference must depend only on the apartment and period.
pub trait ReceiptRenderer {
    fn render(
        &mut self,
        profile: &ApartmentProfile,
        rates: &RateSchedule,
        period: BillingPeriod,
        breakdown: &ChargeBreakdown,
    ) -> Result<ReceiptRef, ReceiptError>;
}

/// Conventional receipt file name, e.g. `receipt_2025-03_7.html`.
pub fn receipt_file_name(period: BillingPeriod, apartment: ApartmentId) -> String {
    format!("receipt_{period}_{apartment}.html")
}
