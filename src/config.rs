// Demo configuration and command-line parsing

use crate::core::Vector;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Missing value for option: {0}")]
    MissingValue(String),

    #[error("Invalid value for {option}: {value}")]
    InvalidValue { option: String, value: String },
}

/// Settings for the demo run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Simulated time to run for, in seconds
    pub seconds: f64,

    /// Observations per simulated second
    pub sample_rate: u32,

    /// Length of one simulated frame, in seconds
    pub frame_secs: f64,

    /// Magnitude of the single demo force
    pub magnitude: f64,

    /// Direction of the demo force, before normalization
    pub direction: Vector,

    /// Starting position of the demo body
    pub position: Vector,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seconds: 2.0,
            sample_rate: 4,
            frame_secs: 1.0 / 60.0,
            magnitude: 1.0,
            direction: Vector::new(1.0, 0.0),
            position: Vector::new(1.0, 1.0),
        }
    }
}

impl DemoConfig {
    /// Build a config from `--option value` pairs, starting from defaults
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(option) = args.next() {
            let value = args
                .next()
                .ok_or_else(|| ConfigError::MissingValue(option.clone()))?;

            match option.as_str() {
                "--seconds" => config.seconds = parse_number(&option, &value)?,
                "--rate" => {
                    config.sample_rate = value.parse().map_err(|_| invalid(&option, &value))?
                }
                "--frame" => config.frame_secs = parse_number(&option, &value)?,
                "--magnitude" => config.magnitude = parse_number(&option, &value)?,
                "--direction" => config.direction = parse_vector(&option, &value)?,
                "--position" => config.position = parse_vector(&option, &value)?,
                _ => return Err(ConfigError::UnknownOption(option)),
            }
        }

        Ok(config)
    }

    /// Number of simulated frames the demo runs for
    pub fn frame_count(&self) -> u64 {
        if self.frame_secs <= 0.0 || self.seconds <= 0.0 {
            return 0;
        }
        // Tolerate rounding in seconds / frame_secs
        (self.seconds / self.frame_secs - 1e-9).ceil() as u64
    }
}

fn invalid(option: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

fn parse_number(option: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse().map_err(|_| invalid(option, value))
}

/// Parse `x,y`
fn parse_vector(option: &str, value: &str) -> Result<Vector, ConfigError> {
    let (x, y) = value.split_once(',').ok_or_else(|| invalid(option, value))?;
    Ok(Vector::new(parse_number(option, x)?, parse_number(option, y)?))
}
