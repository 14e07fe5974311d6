//! Loaders for the rate schedule and apartment list configuration files.

use std::{collections::HashSet, fs, path::Path};

use billing_core::{BillingError, InputSource, MissingSource};
use billing_domain::{ApartmentProfile, RateSchedule};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::csv_io::parse_apartments_csv;

/// Fails with every absent source listed, before anything is parsed.
pub fn ensure_inputs_exist(sources: &[(InputSource, &Path)]) -> Result<(), BillingError> {
    let missing: Vec<MissingSource> = sources
        .iter()
        .filter(|(_, path)| !path.is_file())
        .map(|(input, path)| MissingSource {
            input: *input,
            path: path.to_path_buf(),
        })
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BillingError::MissingInput(missing))
    }
}

pub fn load_rate_schedule(path: &Path) -> Result<RateSchedule, BillingError> {
    read_json(InputSource::RateSchedule, path)
}

/// Reads the apartment list, JSON or (by `.csv` extension) CSV, and rejects
/// records with a non-positive area.
///
/// Repeated apartment numbers are only logged; the merge bills each once.
pub fn load_apartments(path: &Path) -> Result<Vec<ApartmentProfile>, BillingError> {
    let profiles = if is_csv(path) {
        let data = read_source(InputSource::ApartmentList, path)?;
        parse_apartments_csv(&data).map_err(|reason| BillingError::MalformedInput {
            input: InputSource::ApartmentList,
            path: path.to_path_buf(),
            reason,
        })?
    } else {
        read_json::<Vec<ApartmentProfile>>(InputSource::ApartmentList, path)?
    };
    let mut seen = HashSet::new();
    for profile in &profiles {
        if !profile.has_valid_area() {
            return Err(BillingError::MalformedInput {
                input: InputSource::ApartmentList,
                path: path.to_path_buf(),
                reason: format!(
                    "apartment {} has invalid area {}",
                    profile.id, profile.area_sqm
                ),
            });
        }
        if !seen.insert(profile.id) {
            warn!(apartment = %profile.id, "apartment listed more than once");
        }
    }
    Ok(profiles)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_source(input: InputSource, path: &Path) -> Result<String, BillingError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => BillingError::MissingInput(vec![MissingSource {
            input,
            path: path.to_path_buf(),
        }]),
        _ => BillingError::Io(err),
    })
}

fn read_json<T: DeserializeOwned>(input: InputSource, path: &Path) -> Result<T, BillingError> {
    let data = read_source(input, path)?;
    serde_json::from_str(&data).map_err(|err| BillingError::MalformedInput {
        input,
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}
