#![allow(dead_code)]

use std::{fs, path::Path};

pub const RATES_JSON: &str = r#"{
  "monthly_rates": {
    "maintenance_sqm": 50,
    "capital_repair_sqm": 20,
    "heat_meter_service_sqm": 5
  },
  "fixed_rates": {
    "cleaning_unit": 800,
    "video_service_unit": 300
  }
}"#;

pub const APARTMENTS_JSON: &str = r#"[
  {"apartment": 7, "area_sqm": 45.0, "has_video": true},
  {"apartment": 8, "area_sqm": 45.0, "has_video": false},
  {"apartment": 9, "area_sqm": 45.0}
]"#;

/// Writes the rate and apartment files into `dir`.
pub fn write_inputs(dir: &Path) {
    fs::write(dir.join("rates_config.json"), RATES_JSON).expect("write rates");
    fs::write(dir.join("apartments_config.json"), APARTMENTS_JSON).expect("write apartments");
}
