//! Geographic to scene-space projection

use super::Vec3;

/// Project a latitude/longitude in degrees onto a sphere of `radius`.
///
/// Latitude 90 maps to +Y. Longitude 0 on the equator maps to +X and
/// longitude 90 east maps to -Z.
pub fn lat_lon_to_position(latitude: f64, longitude: f64, radius: f32) -> Vec3 {
    let phi = (90.0 - latitude).to_radians();
    let theta = (longitude + 180.0).to_radians();
    let r = radius as f64;

    Vec3::new(
        (-r * phi.sin() * theta.cos()) as f32,
        (r * phi.cos()) as f32,
        (r * phi.sin() * theta.sin()) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!(a.distance(&b) < 0.001, "{a:?} != {b:?}");
    }

    #[test]
    fn test_null_island() {
        assert_close(lat_lon_to_position(0.0, 0.0, 120.0), Vec3::new(120.0, 0.0, 0.0));
    }

    #[test]
    fn test_poles() {
        assert_close(lat_lon_to_position(90.0, 45.0, 1.0), Vec3::UP);
        assert_close(lat_lon_to_position(-90.0, -45.0, 1.0), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_east_is_minus_z() {
        assert_close(lat_lon_to_position(0.0, 90.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert_close(lat_lon_to_position(0.0, -90.0, 1.0), Vec3::FORWARD);
    }

    #[test]
    fn test_positions_lie_on_sphere() {
        for (lat, lon) in [(30.5928, 114.3055), (-33.8688, 151.2093), (40.7128, -74.006)] {
            let p = lat_lon_to_position(lat, lon, 123.0);
            assert!((p.length() - 123.0).abs() < 0.01);
        }
    }
}
