//! Pure charge computation.

use billing_domain::{
    ApartmentProfile, ChargeBreakdown, ChargeLine, ChargeLineItem, ChargeSchema, RateGroup,
    RateSchedule,
};

use crate::BillingError;

/// Maps an apartment and the shared rates to an itemized breakdown.
pub struct ChargeCalculator;

impl ChargeCalculator {
    /// Checks that every line of `schema` has a usable rate, so a run can
    /// refuse to start instead of billing some apartments and failing later.
    pub fn validate(rates: &RateSchedule, schema: &ChargeSchema) -> Result<(), BillingError> {
        for line in schema.lines() {
            Self::rate_for(rates, line)?;
        }
        Ok(())
    }

    /// Computes the breakdown for one apartment.
    ///
    /// Area lines are `round_amount(area * rate)`; flat lines use the rate
    /// verbatim. A gated line contributes `0` unless the apartment's flag is set.
    pub fn compute(
        profile: &ApartmentProfile,
        rates: &RateSchedule,
        schema: &ChargeSchema,
    ) -> Result<ChargeBreakdown, BillingError> {
        let mut items = Vec::with_capacity(schema.len());
        for line in schema.lines() {
            let unit_rate = Self::rate_for(rates, line)?;
            let applies = line
                .gate
                .as_deref()
                .map_or(true, |flag| profile.flag(flag));
            let (quantity, amount) = match (line.group, applies) {
                (_, false) => (0.0, 0),
                (RateGroup::Area, true) => (
                    profile.area_sqm,
                    round_amount(profile.area_sqm * unit_rate),
                ),
                (RateGroup::Flat, true) => (1.0, unit_rate as i64),
            };
            items.push(ChargeLineItem {
                key: line.key.clone(),
                label: line.label.clone(),
                group: line.group,
                unit_rate,
                quantity,
                amount,
            });
        }
        Ok(ChargeBreakdown::from_lines(items))
    }

    fn rate_for(rates: &RateSchedule, line: &ChargeLine) -> Result<f64, BillingError> {
        let rate = rates
            .rate(line.group, &line.key)
            .ok_or_else(|| BillingError::MissingRateKey {
                group: line.group,
                key: line.key.clone(),
            })?;
        let invalid = |reason| BillingError::InvalidRate {
            group: line.group,
            key: line.key.clone(),
            value: rate,
            reason,
        };
        if !rate.is_finite() {
            return Err(invalid("rate must be a finite number"));
        }
        if rate < 0.0 {
            return Err(invalid("rate must not be negative"));
        }
        if line.group == RateGroup::Flat && rate.fract() != 0.0 {
            return Err(invalid("flat rates must be whole currency units"));
        }
        Ok(rate)
    }
}

/// Rounds to the nearest whole currency unit; exact halves go to the even neighbour.
pub fn round_amount(value: f64) -> i64 {
    value.round_ties_even() as i64
}
