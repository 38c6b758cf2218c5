use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can stop a render session from being built.
///
/// Playback and index problems never show up here: those are clamped in
/// place by the playback state machine.
#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("sequence length must be greater than zero")]
    EmptySequence,

    #[error("sequence of {length} days starting {start} runs past the last representable date")]
    DateOverflow { start: chrono::NaiveDate, length: usize },

    #[error("city '{name}' has latitude {latitude}, expected a value in [-90, 90]")]
    LatitudeOutOfRange { name: String, latitude: f64 },

    #[error("city '{name}' has longitude {longitude}, expected a value in [-180, 180]")]
    LongitudeOutOfRange { name: String, longitude: f64 },

    #[error("city name must not be empty")]
    UnnamedCity,

    #[error("city '{0}' is listed more than once")]
    DuplicateCity(String),

    #[error("origin city '{0}' is not in the city list")]
    UnknownOrigin(String),

    #[error("invalid phase table: {0}")]
    InvalidPhases(String),

    #[error("death rate {0} must be a finite value in [0, 1]")]
    InvalidDeathRate(f64),

    #[error("invalid playback setting: {0}")]
    InvalidPlayback(String),

    #[error("invalid display setting: {0}")]
    InvalidDisplay(String),

    #[error("malformed series: {0}")]
    MalformedSeries(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("render setup failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, GlobeError>;

impl From<GlobeError> for JsValue {
    fn from(err: GlobeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = GlobeError::LatitudeOutOfRange {
            name: "Atlantis".to_string(),
            latitude: 95.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Atlantis"));
        assert!(msg.contains("95"));
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        let err: GlobeError = yaml_err.into();
        assert!(matches!(err, GlobeError::Config(_)));
    }
}
