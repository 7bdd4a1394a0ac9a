//! Tunable constants shared by the log generator and the log parser.

use crate::error::{LogError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Last protection hour walked by the generator and accepted by the parser.
    pub last_hour: usize,
    /// Rows above the first hour row in every sim sheet.
    pub header_rows: usize,
    pub platinum_per_peasant: i64,
    pub daily_land_bonus: i64,
    /// Used when a spell multiplier constant can't be read from the sim.
    pub fallback_spell_multiplier: Decimal,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_hour: 73,
            header_rows: 3,
            platinum_per_peasant: 4,
            daily_land_bonus: 20,
            fallback_spell_multiplier: dec!(2),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or YAML when the extension says so.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.last_hour == 0 {
            return Err(LogError::Settings("last_hour must be at least 1".to_string()));
        }
        if self.fallback_spell_multiplier.is_sign_negative() {
            return Err(LogError::Settings(
                "fallback_spell_multiplier must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Settings:")?;
        writeln!(f, "  Last hour: {}", self.last_hour)?;
        writeln!(f, "  Header rows: {}", self.header_rows)?;
        writeln!(f, "  Platinum per peasant: {}", self.platinum_per_peasant)?;
        writeln!(f, "  Daily land bonus: {}", self.daily_land_bonus)?;
        write!(
            f,
            "  Fallback spell multiplier: {}",
            self.fallback_spell_multiplier
        )
    }
}
