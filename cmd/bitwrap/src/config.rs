//! Simulation config resolution.
//!
//! Layers, lowest precedence first: preset (default `long-long`), config
//! file, individual command-line flags.

use anyhow::{bail, Context, Result};
use bitwrap_register::{Preset, Register, SimulationConfig};
use num_bigint::BigInt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Command-line inputs for a simulation.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Preset name.
    pub preset: Option<String>,
    /// Config file path.
    pub config: Option<String>,
    /// Register name.
    pub register: Option<String>,
    /// Start value.
    pub start: Option<String>,
    /// Iteration count.
    pub iterations: Option<usize>,
}

impl Overrides {
    /// Resolves the final, validated configuration.
    pub fn resolve(&self) -> Result<SimulationConfig> {
        let mut config = match (&self.config, &self.preset) {
            (Some(_), Some(_)) => bail!("--config and --preset cannot be combined"),
            (Some(path), None) => load_config(Path::new(path))?,
            (None, Some(name)) => name
                .parse::<Preset>()
                .with_context(|| format!("Invalid preset: {name}"))?
                .config(),
            (None, None) => Preset::LongLong.config(),
        };

        if let Some(name) = &self.register {
            config.register = parse_register(name)?;
        }
        if let Some(start) = &self.start {
            config.start_value = parse_start(start)?;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }

        config.validate().with_context(|| "Invalid simulation config")?;
        debug!(?config, "resolved simulation config");
        Ok(config)
    }
}

/// Parses a register name with CLI context.
pub fn parse_register(name: &str) -> Result<Register> {
    name.parse()
        .with_context(|| format!("Invalid register: {name}"))
}

/// Parses an arbitrarily large decimal start value.
pub fn parse_start(value: &str) -> Result<BigInt> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid start value: {value}"))
}

/// Loads a config file, choosing the parser by extension.
fn load_config(path: &Path) -> Result<SimulationConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    parse_config(&content, extension)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse_config(content: &str, extension: &str) -> Result<SimulationConfig> {
    let config = match extension.to_ascii_lowercase().as_str() {
        "json" => serde_json::from_str(content)?,
        "yaml" | "yml" | "" => serde_yaml::from_str(content)?,
        other => bail!("Unsupported config extension '{other}'. Use .yaml or .json."),
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_long_long() {
        let config = Overrides::default().resolve().unwrap();
        assert_eq!(config, Preset::LongLong.config());
    }

    #[test]
    fn flags_override_preset() {
        let overrides = Overrides {
            preset: Some("int32".to_string()),
            register: Some("i8".to_string()),
            start: Some("-3".to_string()),
            ..Overrides::default()
        };
        let config = overrides.resolve().unwrap();
        assert_eq!(config.register, Register::signed(8).unwrap());
        assert_eq!(config.start_value, BigInt::from(-3));
        assert_eq!(config.iterations, 40);
    }

    #[test]
    fn rejects_out_of_range_start() {
        let overrides = Overrides {
            register: Some("u8".to_string()),
            start: Some("256".to_string()),
            ..Overrides::default()
        };
        assert!(overrides.resolve().is_err());
    }

    #[test]
    fn rejects_config_with_preset() {
        let overrides = Overrides {
            preset: Some("int32".to_string()),
            config: Some("sim.yaml".to_string()),
            ..Overrides::default()
        };
        assert!(overrides.resolve().is_err());
    }

    #[test]
    fn parses_yaml_and_json_configs() {
        let yaml = parse_config("register: i16\nstart_value: 5\niterations: 20\n", "yaml").unwrap();
        assert_eq!(yaml.register, Register::signed(16).unwrap());

        let json = parse_config(
            r#"{"register":"u128","start_value":"340282366920938463463374607431768211455","iterations":2}"#,
            "json",
        )
        .unwrap();
        assert_eq!(json.start_value, BigInt::from(u128::MAX));

        assert!(parse_config("register: i16", "toml").is_err());
    }
}
