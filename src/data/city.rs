use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{GlobeError, Result};

/// Mean Earth radius used for onset distances
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance a new outbreak travels per day, in kilometres
const SPREAD_KM_PER_DAY: f64 = 150.0;

/// A city marker on the globe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lon", alias = "longitude")]
    pub longitude: f64,
}

impl City {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
        }
    }

    /// Reject coordinates outside the valid lat/lon ranges
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GlobeError::UnnamedCity);
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GlobeError::LatitudeOutOfRange {
                name: self.name.clone(),
                latitude: self.latitude,
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GlobeError::LongitudeOutOfRange {
                name: self.name.clone(),
                longitude: self.longitude,
            });
        }
        Ok(())
    }

    /// Great-circle distance in kilometres (haversine)
    pub fn distance_km(&self, other: &City) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Day index at which this city counts as affected by an outbreak at `origin`
    pub fn onset_day(&self, origin: &City) -> usize {
        if self.name == origin.name {
            return 0;
        }
        (self.distance_km(origin) / SPREAD_KM_PER_DAY).floor() as usize
    }
}

/// The ten cities shown on the default globe
pub fn default_cities() -> Vec<City> {
    vec![
        City::new("Wuhan", 30.5928, 114.3055),
        City::new("Seoul", 37.5665, 126.9780),
        City::new("New York", 40.7128, -74.0060),
        City::new("London", 51.5074, -0.1278),
        City::new("Tokyo", 35.6762, 139.6503),
        City::new("Paris", 48.8566, 2.3522),
        City::new("Sao Paulo", -23.5505, -46.6333),
        City::new("Mumbai", 19.0760, 72.8777),
        City::new("Sydney", -33.8688, 151.2093),
        City::new("Moscow", 55.7558, 37.6173),
    ]
}

/// Validate every city and check names are unique
pub fn validate_cities(cities: &[City]) -> Result<()> {
    let mut seen = HashSet::new();
    for city in cities {
        city.validate()?;
        if !seen.insert(city.name.as_str()) {
            return Err(GlobeError::DuplicateCity(city.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cities_are_valid() {
        let cities = default_cities();
        assert_eq!(cities.len(), 10);
        assert!(validate_cities(&cities).is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        let city = City::new("North of North", 91.0, 0.0);
        assert!(matches!(
            city.validate(),
            Err(GlobeError::LatitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_longitude_out_of_range() {
        let city = City::new("Date Line", 0.0, -180.5);
        assert!(matches!(
            city.validate(),
            Err(GlobeError::LongitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_nan_coordinates_rejected() {
        assert!(City::new("Nowhere", f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let cities = vec![City::new("Seoul", 37.5, 127.0), City::new("Seoul", 37.6, 126.9)];
        assert!(matches!(
            validate_cities(&cities),
            Err(GlobeError::DuplicateCity(name)) if name == "Seoul"
        ));
    }

    #[test]
    fn test_serde_uses_short_keys() {
        let city = City::new("Tokyo", 35.6762, 139.6503);
        let json = serde_json::to_string(&city).unwrap();
        assert_eq!(json, r#"{"name":"Tokyo","lat":35.6762,"lon":139.6503}"#);

        let parsed: City = serde_json::from_str(r#"{"name":"X","latitude":1.0,"longitude":2.0}"#).unwrap();
        assert_eq!(parsed.latitude, 1.0);
        assert_eq!(parsed.longitude, 2.0);
    }

    #[test]
    fn test_distance_known_pair() {
        let london = City::new("London", 51.5074, -0.1278);
        let paris = City::new("Paris", 48.8566, 2.3522);
        let d = london.distance_km(&paris);
        assert!((d - 343.5).abs() < 5.0, "London-Paris was {d} km");
    }

    #[test]
    fn test_onset_day() {
        let cities = default_cities();
        let wuhan = &cities[0];
        assert_eq!(wuhan.onset_day(wuhan), 0);

        let seoul = &cities[1];
        let new_york = &cities[2];
        assert!(seoul.onset_day(wuhan) < new_york.onset_day(wuhan));
    }
}
