//! Host configuration, read from command line flags.

use std::time::Duration;

use thiserror::Error;

use crate::{
    game::DEFAULT_TICK_INTERVAL,
    patterns::{Pattern, GLIDER, PRESETS},
    rules::RuleParseError,
    Rules,
};

pub const USAGE: &str = "\
usage: sparselife [options]

options:
    --rule <B../S..>     birth / survival rule, default B3/S23
    --interval <ms>      milliseconds between generations, default 100
    --speed <factor>     generation speed multiplier, overrides --interval
    --pattern <name>     pattern placed at the origin, default glider
    --cell-size <px>     terminal characters per cell, default 1
    -h, --help           print this message";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("help requested")]
    Help,

    #[error("unknown flag {0:?}")]
    UnknownFlag(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value {value:?} for {flag}, expected a positive number")]
    InvalidNumber { flag: String, value: String },

    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    #[error("invalid rule: {0}")]
    InvalidRule(#[from] RuleParseError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Time between generations while running.
    pub tick_interval: Duration,
    /// Birth and survival counts the game starts with.
    pub rules: Rules,
    /// Seed pattern placed at the origin.
    pub pattern: Pattern,
    /// Size of one cell in screen units.
    pub cell_pixel_size: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            rules: Rules::default(),
            pattern: GLIDER,
            cell_pixel_size: 1.0,
        }
    }
}

impl Config {
    /// Parses flags, not including the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut speed = None;
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            if flag == "-h" || flag == "--help" {
                return Err(ConfigError::Help);
            }
            let known = ["--rule", "--interval", "--speed", "--pattern", "--cell-size"];
            if !known.contains(&flag.as_str()) {
                return Err(ConfigError::UnknownFlag(flag));
            }
            let value = args
                .next()
                .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;

            match flag.as_str() {
                "--rule" => config.rules = value.parse()?,
                "--interval" => {
                    let ms = positive_number(&flag, &value)?;
                    config.tick_interval = Duration::from_secs_f64(ms / 1000.0);
                }
                "--speed" => speed = Some((positive_number(&flag, &value)?, value)),
                "--pattern" => {
                    config.pattern =
                        Pattern::find(&value).ok_or(ConfigError::UnknownPattern(value))?
                }
                _ => config.cell_pixel_size = positive_number(&flag, &value)?,
            }
        }

        if let Some((speed, value)) = speed {
            config.tick_interval =
                Duration::try_from_secs_f64(DEFAULT_TICK_INTERVAL.as_secs_f64() / speed).map_err(
                    |_| ConfigError::InvalidNumber {
                        flag: "--speed".to_string(),
                        value,
                    },
                )?;
        }
        Ok(config)
    }

    pub fn pattern_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|pattern| pattern.name)
    }
}

fn positive_number(flag: &str, value: &str) -> Result<f64, ConfigError> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 && n < 1e12 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::GOSPER_GLIDER_GUN;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        Config::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.rules, Rules::conway());
    }

    #[test]
    fn all_flags() {
        let config = parse(&[
            "--rule",
            "B36/S23",
            "--interval",
            "250",
            "--pattern",
            "gosper-gun",
            "--cell-size",
            "2",
        ])
        .unwrap();
        assert_eq!(config.rules, Rules::highlife());
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.pattern, GOSPER_GLIDER_GUN);
        assert_eq!(config.cell_pixel_size, 2.0);
    }

    #[test]
    fn speed_overrides_interval() {
        let config = parse(&["--speed", "4", "--interval", "900"]).unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(25));
    }

    #[test]
    fn errors() {
        assert_eq!(parse(&["--help"]), Err(ConfigError::Help));
        assert_eq!(
            parse(&["--fast"]),
            Err(ConfigError::UnknownFlag("--fast".into()))
        );
        assert_eq!(
            parse(&["--rule"]),
            Err(ConfigError::MissingValue("--rule".into()))
        );
        assert_eq!(
            parse(&["--speed", "-1"]),
            Err(ConfigError::InvalidNumber {
                flag: "--speed".into(),
                value: "-1".into()
            })
        );
        assert_eq!(
            parse(&["--pattern", "ship"]),
            Err(ConfigError::UnknownPattern("ship".into()))
        );
        assert_eq!(
            parse(&["--speed", "1e-30"]),
            Err(ConfigError::InvalidNumber {
                flag: "--speed".into(),
                value: "1e-30".into()
            })
        );
        assert!(matches!(
            parse(&["--rule", "B3S23"]),
            Err(ConfigError::InvalidRule(_))
        ));
    }
}
