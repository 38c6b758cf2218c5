use crate::math::{Mat4, Vec3};

/// A world-space ray
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Ray through a canvas pixel, for a perspective camera at `camera_pos`
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        view: &Mat4,
        projection: &Mat4,
        camera_pos: Vec3,
    ) -> Self {
        // Convert screen to normalized device coordinates
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        // Undo the projection's x/y focal scale; the view-space ray looks down -Z
        let ray_view = Vec3::new(ndc_x / projection.data[0], ndc_y / projection.data[5], -1.0);

        // View matrices are rigid, so the rotation transpose takes us back to world space
        let direction = view.rotation_inverse().transform_direction(ray_view).normalize();

        Self {
            origin: camera_pos,
            direction,
        }
    }

    /// Nearest positive hit distance against a sphere
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;

        let a = self.direction.dot(&self.direction);
        let b = 2.0 * oc.dot(&self.direction);
        let c = oc.dot(&oc) - radius * radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t > 0.0 {
            return Some(t);
        }
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);
        (t2 > 0.0).then_some(t2)
    }
}

/// A marker's bounding sphere in world space
#[derive(Debug, Clone, Copy)]
pub struct MarkerTarget {
    pub city_index: usize,
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerHit {
    pub city_index: usize,
    pub distance: f32,
}

/// Hover picking for city markers sitting on an opaque globe
#[derive(Debug, Clone)]
pub struct MarkerPicker {
    globe_center: Vec3,
    globe_radius: f32,
}

impl MarkerPicker {
    pub fn new(globe_radius: f32) -> Self {
        Self {
            globe_center: Vec3::ZERO,
            globe_radius,
        }
    }

    /// Closest marker the ray reaches before it enters the globe
    pub fn pick(&self, ray: &Ray, markers: &[MarkerTarget]) -> Option<MarkerHit> {
        let horizon = ray
            .intersect_sphere(self.globe_center, self.globe_radius)
            .unwrap_or(f32::MAX);

        markers
            .iter()
            .filter_map(|marker| {
                ray.intersect_sphere(marker.center, marker.radius)
                    .filter(|&distance| distance < horizon)
                    .map(|distance| MarkerHit {
                        city_index: marker.city_index,
                        distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ray_down_z(x: f32, y: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, y, 400.0),
            direction: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    #[test]
    fn test_ray_sphere_hit() {
        let result = ray_down_z(0.0, 0.0).intersect_sphere(Vec3::ZERO, 1.0);
        assert!((result.unwrap() - 399.0).abs() < 0.001);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::new(0.0, 0.0, 1.0),
        };
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
        assert!(ray_down_z(5.0, 0.0).intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn test_center_pixel_looks_at_target() {
        let eye = Vec3::new(0.0, 0.0, 400.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let projection = Mat4::perspective(60f32.to_radians(), 1.5, 0.1, 2000.0);
        let ray = Ray::from_screen(300.0, 200.0, 600.0, 400.0, &view, &projection, eye);
        assert!(ray.direction.distance(&Vec3::new(0.0, 0.0, -1.0)) < 1e-5);
    }

    #[test]
    fn test_top_edge_tilts_up_by_half_fov() {
        let eye = Vec3::new(0.0, 0.0, 400.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::UP);
        let projection = Mat4::perspective(60f32.to_radians(), 1.0, 0.1, 2000.0);
        let ray = Ray::from_screen(50.0, 0.0, 100.0, 100.0, &view, &projection, eye);
        let angle = ray.direction.y.atan2(-ray.direction.z);
        assert!((angle - 30f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn test_front_marker_is_picked() {
        let picker = MarkerPicker::new(120.0);
        let markers = [MarkerTarget {
            city_index: 3,
            center: Vec3::new(0.0, 0.0, 123.0),
            radius: 2.5,
        }];
        let hit = picker.pick(&ray_down_z(0.0, 0.0), &markers).unwrap();
        assert_eq!(hit.city_index, 3);
        assert!((hit.distance - 274.5).abs() < 0.01);
    }

    #[test]
    fn test_marker_behind_globe_is_occluded() {
        let picker = MarkerPicker::new(120.0);
        let markers = [MarkerTarget {
            city_index: 0,
            center: Vec3::new(0.0, 0.0, -123.0),
            radius: 2.5,
        }];
        assert!(picker.pick(&ray_down_z(0.0, 0.0), &markers).is_none());
    }

    #[test]
    fn test_nearest_marker_wins() {
        let picker = MarkerPicker::new(120.0);
        let markers = [
            MarkerTarget {
                city_index: 1,
                center: Vec3::new(200.0, 0.0, 0.0),
                radius: 2.5,
            },
            MarkerTarget {
                city_index: 2,
                center: Vec3::new(200.0, 0.0, 100.0),
                radius: 2.5,
            },
        ];
        let hit = picker.pick(&ray_down_z(200.0, 0.0), &markers).unwrap();
        assert_eq!(hit.city_index, 2);
    }
}
