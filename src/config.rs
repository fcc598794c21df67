//! Ponder Chess - Engine Configuration
//!
//! Options can be set by name with a string value, the way a protocol front
//! end or command line hands them over. Spin options are range-checked and
//! check options accept `true`/`false`.

use std::time::Duration;

use thiserror::Error;

use crate::evaluation::{EvalConfig, DEFAULT_TABLES};

/// Upper bound on how long the engine keeps thinking after the player moves
pub const DEFAULT_MAX_PONDER: Duration = Duration::from_secs(10);

/// Errors raised while setting an engine option
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option '{name}'")]
    UnknownOption { name: String },

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },

    #[error("value {value} for option {name} is outside {min}..={max}")]
    OutOfRange {
        name: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Engine settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Search threads, 0 = one per CPU
    pub threads: usize,
    /// Depths that always complete, even after cancellation
    pub min_depth: u32,
    pub max_depth: Option<u32>,
    /// Cap on the delay between the player's move and stopping the search
    pub max_ponder: Duration,
    pub quiescence: bool,
    pub eval: EvalConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            threads: 0,
            min_depth: 1,
            max_depth: None,
            max_ponder: DEFAULT_MAX_PONDER,
            quiescence: true,
            eval: EvalConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set an option by name. Names are case-insensitive.
    ///
    /// | name               | type  | range      |
    /// |--------------------|-------|------------|
    /// | `Threads`          | spin  | 0..=256    |
    /// | `MinDepth`         | spin  | 0..=16     |
    /// | `MaxDepth`         | spin  | 0..=64, 0 = unlimited |
    /// | `PonderLimitMs`    | spin  | 0..=600000 |
    /// | `Quiescence`       | check |            |
    /// | `PositionalTables` | check |            |
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "threads" => self.threads = parse_spin(name, value, 0, 256)? as usize,
            "mindepth" => self.min_depth = parse_spin(name, value, 0, 16)? as u32,
            "maxdepth" => {
                let depth = parse_spin(name, value, 0, 64)?;
                self.max_depth = (depth > 0).then_some(depth as u32);
            }
            "ponderlimitms" => {
                let millis = parse_spin(name, value, 0, 600_000)?;
                self.max_ponder = Duration::from_millis(millis as u64);
            }
            "quiescence" => self.quiescence = parse_check(name, value)?,
            "positionaltables" => {
                self.eval.tables = parse_check(name, value)?.then_some(DEFAULT_TABLES);
            }
            _ => {
                return Err(ConfigError::UnknownOption {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn parse_spin(name: &str, value: &str, min: i64, max: i64) -> Result<i64, ConfigError> {
    let parsed: i64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })?;
    if !(min..=max).contains(&parsed) {
        return Err(ConfigError::OutOfRange {
            name: name.to_string(),
            value: parsed,
            min,
            max,
        });
    }
    Ok(parsed)
}

fn parse_check(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.min_depth, 1);
        assert_eq!(config.max_ponder, Duration::from_secs(10));
        assert!(config.eval.tables.is_some());
    }

    #[test]
    fn set_spin_and_check_options() {
        let mut config = EngineConfig::default();
        config.set_option("Threads", "3").unwrap();
        config.set_option("maxdepth", "4").unwrap();
        config.set_option("PonderLimitMs", "250").unwrap();
        config.set_option("Quiescence", "false").unwrap();
        config.set_option("PositionalTables", "FALSE").unwrap();
        assert_eq!(config.threads, 3);
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.max_ponder, Duration::from_millis(250));
        assert!(!config.quiescence);
        assert_eq!(config.eval, EvalConfig::material_only());

        config.set_option("MaxDepth", "0").unwrap();
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn rejects_bad_options() {
        let mut config = EngineConfig::default();
        assert_eq!(
            config.set_option("Hash", "16"),
            Err(ConfigError::UnknownOption { name: "Hash".to_string() })
        );
        assert!(matches!(
            config.set_option("Threads", "many"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set_option("MinDepth", "99"),
            Err(ConfigError::OutOfRange { value: 99, .. })
        ));
        assert!(matches!(
            config.set_option("Quiescence", "yes"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn error_messages() {
        let err = ConfigError::OutOfRange {
            name: "Threads".to_string(),
            value: 300,
            min: 0,
            max: 256,
        };
        assert_eq!(err.to_string(), "value 300 for option Threads is outside 0..=256");
    }
}
