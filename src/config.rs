use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::animation::Speed;
use crate::data::generator::{
    DEFAULT_DEATH_RATE, DEFAULT_SEQUENCE_LENGTH, default_phases, default_start_date,
};
use crate::data::{City, GeneratorParams, Phase, default_cities, validate_cities};
use crate::error::{GlobeError, Result};

/// Everything one render session needs, as loaded from YAML.
///
/// Missing keys fall back to the values of the reference page, so an empty
/// document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of days to animate
    pub sequence_length: usize,
    pub start_date: NaiveDate,
    /// Fixed generator seed; a wall-clock seed is used when absent
    pub seed: Option<u64>,
    pub phases: Vec<Phase>,
    pub death_rate: f64,
    pub cities: Vec<City>,
    /// City the onset distances are measured from
    pub origin_city: Option<String>,
    pub playback: PlaybackConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Real time between playback ticks
    pub tick_interval_ms: u32,
    /// Speed multiplier active when the page loads
    pub initial_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Height of the canvas inside the embedded frame
    pub render_height: u32,
    /// Declared height of the embedded frame itself
    pub frame_height: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            start_date: default_start_date(),
            seed: None,
            phases: default_phases(),
            death_rate: DEFAULT_DEATH_RATE,
            cities: default_cities(),
            origin_city: Some("Wuhan".to_string()),
            playback: PlaybackConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30,
            initial_speed: 1.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            render_height: 700,
            frame_height: 720,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: SessionConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Fail fast on anything that would produce a degenerate session
    pub fn validate(&self) -> Result<()> {
        self.generator_params().validate()?;
        validate_cities(&self.cities)?;
        self.origin()?;

        if self.playback.tick_interval_ms == 0 {
            return Err(GlobeError::InvalidPlayback(
                "tick interval must be at least 1 ms".to_string(),
            ));
        }
        self.initial_speed()?;

        if self.display.render_height == 0 || self.display.frame_height < self.display.render_height {
            return Err(GlobeError::InvalidDisplay(format!(
                "frame height {} cannot hold a render target of {}",
                self.display.frame_height, self.display.render_height
            )));
        }

        Ok(())
    }

    pub fn generator_params(&self) -> GeneratorParams {
        GeneratorParams {
            sequence_length: self.sequence_length,
            start_date: self.start_date,
            phases: self.phases.clone(),
            death_rate: self.death_rate,
        }
    }

    /// The configured origin city, if any
    pub fn origin(&self) -> Result<Option<&City>> {
        match &self.origin_city {
            None => Ok(None),
            Some(name) => self
                .cities
                .iter()
                .find(|c| &c.name == name)
                .map(Some)
                .ok_or_else(|| GlobeError::UnknownOrigin(name.clone())),
        }
    }

    pub fn initial_speed(&self) -> Result<Speed> {
        Speed::from_multiplier(self.playback.initial_speed).ok_or_else(|| {
            GlobeError::InvalidPlayback(format!(
                "speed {} is not one of 0.5, 1, 2, 4",
                self.playback.initial_speed
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
sequence_length: 30
start_date: 2021-03-01
seed: 42
death_rate: 0.02
phases:
  - start_day: 0
    mean_daily_cases: 100
  - start_day: 10
    mean_daily_cases: 1000
cities:
  - name: "Seoul"
    lat: 37.5665
    lon: 126.9780
  - name: "Busan"
    lat: 35.1796
    lon: 129.0756
origin_city: "Seoul"
playback:
  tick_interval_ms: 50
  initial_speed: 2
"#;

    #[test]
    fn test_parse_yaml() {
        let config = SessionConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(config.sequence_length, 30);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.cities.len(), 2);
        assert_eq!(config.playback.tick_interval_ms, 50);
        assert_eq!(config.initial_speed().unwrap(), Speed::Double);
        assert_eq!(config.origin().unwrap().unwrap().name, "Seoul");
        // Untouched sections keep their defaults
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = SessionConfig::from_yaml("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = SessionConfig::default().to_yaml().unwrap();
        let parsed = SessionConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, SessionConfig::default());
    }

    #[test]
    fn test_zero_length_rejected() {
        let result = SessionConfig::from_yaml("sequence_length: 0");
        assert!(matches!(result, Err(GlobeError::EmptySequence)));
    }

    #[test]
    fn test_bad_city_rejected() {
        let yaml = r#"
origin_city: null
cities:
  - name: "Nowhere"
    lat: 123.0
    lon: 0.0
"#;
        let result = SessionConfig::from_yaml(yaml);
        assert!(matches!(result, Err(GlobeError::LatitudeOutOfRange { .. })));
    }

    #[test]
    fn test_unknown_origin_rejected() {
        let result = SessionConfig::from_yaml("origin_city: Atlantis");
        assert!(matches!(result, Err(GlobeError::UnknownOrigin(_))));
    }

    #[test]
    fn test_unsupported_speed_rejected() {
        let result = SessionConfig::from_yaml("playback:\n  initial_speed: 3");
        assert!(matches!(result, Err(GlobeError::InvalidPlayback(_))));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let result = SessionConfig::from_yaml("sequence_length: [oops");
        assert!(matches!(result, Err(GlobeError::Config(_))));
    }
}
