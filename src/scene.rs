//! Static description of the globe scene
//!
//! Geometry sizes, colours, lights and camera of the rendered page, plus the
//! city markers anchored to the globe surface. Nothing in here touches WebGL;
//! the render pipeline reads it every frame.

use crate::animation::marker_pulse;
use crate::data::City;
use crate::interaction::MarkerTarget;
use crate::math::{lat_lon_to_position, Mat4, Vec3};

pub const GLOBE_RADIUS: f32 = 120.0;
pub const GLOBE_SEGMENTS: usize = 64;

/// Markers float this far above the surface
pub const MARKER_OFFSET: f32 = 3.0;
pub const MARKER_RADIUS: f32 = 2.5;
pub const MARKER_SEGMENTS: usize = 16;

pub const ATMOSPHERE_RADIUS: f32 = GLOBE_RADIUS * 1.025;

pub const STAR_COUNT: usize = 3000;
pub const STAR_EXTENT: f32 = 2500.0;

/// Surface appearance for one drawable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive: Vec3,
    pub shininess: f32,
    pub opacity: f32,
    /// Lit with Phong shading; unlit materials draw flat `color`
    pub lit: bool,
}

impl Material {
    pub fn unlit(color: u32, opacity: f32) -> Self {
        Self {
            color: Vec3::from_hex(color),
            emissive: Vec3::ZERO,
            shininess: 0.0,
            opacity,
            lit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient_intensity: f32,
    pub point_intensity: f32,
    pub point_position: Vec3,
}

/// Colours and lights of the whole scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub globe: Material,
    pub wireframe: Material,
    pub marker: Material,
    pub atmosphere: Material,
    pub lighting: Lighting,
    /// Cleared fully transparent so the page gradient shows through
    pub clear_color: [f32; 4],
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            globe: Material {
                color: Vec3::from_hex(0x1e40af),
                emissive: Vec3::from_hex(0x0c1e3d),
                shininess: 60.0,
                opacity: 0.95,
                lit: true,
            },
            wireframe: Material::unlit(0x334155, 0.2),
            marker: Material::unlit(0xef4444, 0.9),
            atmosphere: Material::unlit(0x3b82f6, 0.1),
            lighting: Lighting {
                ambient_intensity: 0.7,
                point_intensity: 1.2,
                point_position: Vec3::new(300.0, 300.0, 300.0),
            },
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

/// Fixed perspective camera looking at the globe centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_degrees: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            position: Vec3::new(0.0, 0.0, 400.0),
            target: Vec3::ZERO,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, Vec3::UP)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// A city marker in globe-local coordinates
#[derive(Debug, Clone)]
pub struct Marker {
    pub name: String,
    pub anchor: Vec3,
    /// Day the outbreak reaches this city, if an origin is configured
    pub onset_day: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct GlobeScene {
    pub style: SceneStyle,
    pub camera: Camera,
    markers: Vec<Marker>,
}

impl GlobeScene {
    pub fn new(cities: &[City], origin: Option<&City>) -> Self {
        let markers = cities
            .iter()
            .map(|city| Marker {
                name: city.name.clone(),
                anchor: lat_lon_to_position(
                    city.latitude,
                    city.longitude,
                    GLOBE_RADIUS + MARKER_OFFSET,
                ),
                onset_day: origin.map(|o| city.onset_day(o)),
            })
            .collect();

        Self {
            style: SceneStyle::default(),
            camera: Camera::default(),
            markers,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Model matrix of marker `index`: placed on the rotated globe, pulsing in size
    pub fn marker_model(&self, index: usize, globe_model: &Mat4, time_ms: f64) -> Mat4 {
        let anchor = self.markers[index].anchor;
        globe_model
            .mul(&Mat4::translation(anchor.x, anchor.y, anchor.z))
            .mul(&Mat4::uniform_scale(marker_pulse(time_ms, index)))
    }

    /// World-space bounding spheres for hover picking
    pub fn marker_targets(&self, globe_model: &Mat4, time_ms: f64) -> Vec<MarkerTarget> {
        self.markers
            .iter()
            .enumerate()
            .map(|(i, marker)| MarkerTarget {
                city_index: i,
                center: globe_model.transform_point(marker.anchor),
                radius: MARKER_RADIUS * marker_pulse(time_ms, i),
            })
            .collect()
    }

    /// Cities the outbreak has reached by `day`; zero without an origin
    pub fn affected_count(&self, day: usize) -> usize {
        self.markers
            .iter()
            .filter(|m| m.onset_day.is_some_and(|onset| onset <= day))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_cities;

    fn default_scene() -> GlobeScene {
        let cities = default_cities();
        GlobeScene::new(&cities, Some(&cities[0]))
    }

    #[test]
    fn test_markers_float_above_surface() {
        let scene = default_scene();
        assert_eq!(scene.markers().len(), 10);
        for marker in scene.markers() {
            assert!((marker.anchor.length() - 123.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_affected_count_grows() {
        let scene = default_scene();
        assert_eq!(scene.affected_count(0), 1);
        assert_eq!(scene.affected_count(10_000), 10);

        let mut last = 0;
        for day in (0..200).step_by(5) {
            let count = scene.affected_count(day);
            assert!(count >= last);
            last = count;
        }
    }

    #[test]
    fn test_no_origin_means_no_onset() {
        let scene = GlobeScene::new(&default_cities(), None);
        assert!(scene.markers().iter().all(|m| m.onset_day.is_none()));
        assert_eq!(scene.affected_count(5000), 0);
    }

    #[test]
    fn test_marker_model_follows_globe() {
        let scene = default_scene();
        let globe = Mat4::rotation_y(0.7);
        let model = scene.marker_model(2, &globe, 0.0);
        let expected = globe.transform_point(scene.markers()[2].anchor);
        assert!(model.transform_point(Vec3::ZERO).distance(&expected) < 1e-3);
    }

    #[test]
    fn test_targets_match_marker_models() {
        let scene = default_scene();
        let globe = Mat4::orientation(0.2, 1.3);
        let targets = scene.marker_targets(&globe, 1234.0);
        for (i, target) in targets.iter().enumerate() {
            let center = scene.marker_model(i, &globe, 1234.0).transform_point(Vec3::ZERO);
            assert!(target.center.distance(&center) < 1e-3);
            assert!(target.radius >= 2.0 && target.radius <= 3.0);
        }
    }

    #[test]
    fn test_style_constants() {
        let style = SceneStyle::default();
        assert!((style.globe.opacity - 0.95).abs() < 1e-6);
        assert!((style.lighting.ambient_intensity - 0.7).abs() < 1e-6);
        assert_eq!(Camera::default().position, Vec3::new(0.0, 0.0, 400.0));
    }
}
