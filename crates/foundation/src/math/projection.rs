use crate::math::{GeoPoint, Vec2};

/// Plate carrée projection: longitude and latitude map linearly to x and y.
///
/// `scale` is pixels per radian; `translate` is the screen position of
/// (0°, 0°). Screen y grows downwards, so north is up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Equirectangular {
    pub scale: f64,
    pub translate: Vec2,
}

impl Equirectangular {
    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self { scale, translate }
    }

    /// Fits the whole sphere (360° × 180°) into a `width` × `height` surface,
    /// centered, without cropping.
    pub fn fit_size(width: f64, height: f64) -> Self {
        let by_width = width / (2.0 * std::f64::consts::PI);
        let by_height = height / std::f64::consts::PI;
        let scale = by_width.min(by_height).max(1e-9);
        Self::new(scale, Vec2::new(width * 0.5, height * 0.5))
    }

    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Vec2 {
        Vec2::new(
            self.translate.x + lon_deg.to_radians() * self.scale,
            self.translate.y - lat_deg.to_radians() * self.scale,
        )
    }

    pub fn project_point(&self, p: GeoPoint) -> Vec2 {
        self.project(p.lon_deg, p.lat_deg)
    }

    pub fn invert(&self, screen: Vec2) -> GeoPoint {
        GeoPoint::new(
            ((screen.x - self.translate.x) / self.scale).to_degrees(),
            ((self.translate.y - screen.y) / self.scale).to_degrees(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Equirectangular;
    use crate::math::{GeoPoint, Vec2};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn origin_maps_to_center() {
        let p = Equirectangular::fit_size(960.0, 480.0);
        let c = p.project(0.0, 0.0);
        assert_eq!(c, Vec2::new(480.0, 240.0));
    }

    #[test]
    fn sphere_fills_two_to_one_surface() {
        let p = Equirectangular::fit_size(960.0, 480.0);
        let nw = p.project(-180.0, 90.0);
        let se = p.project(180.0, -90.0);
        assert_close(nw.x, 0.0, 1e-9);
        assert_close(nw.y, 0.0, 1e-9);
        assert_close(se.x, 960.0, 1e-9);
        assert_close(se.y, 480.0, 1e-9);
    }

    #[test]
    fn north_is_up() {
        let p = Equirectangular::fit_size(960.0, 480.0);
        assert!(p.project(0.0, 45.0).y < p.project(0.0, -45.0).y);
        assert!(p.project(-90.0, 0.0).x < p.project(90.0, 0.0).x);
    }

    #[test]
    fn invert_recovers_coordinates() {
        let p = Equirectangular::fit_size(800.0, 600.0);
        let geo = GeoPoint::new(-123.25, 41.5);
        let back = p.invert(p.project_point(geo));
        assert_close(back.lon_deg, geo.lon_deg, 1e-9);
        assert_close(back.lat_deg, geo.lat_deg, 1e-9);
    }

    #[test]
    fn fit_uses_limiting_dimension() {
        // Tall surface: width limits the scale.
        let p = Equirectangular::fit_size(360.0, 1000.0);
        let nw = p.project(-180.0, 90.0);
        let se = p.project(180.0, -90.0);
        assert_close(se.x - nw.x, 360.0, 1e-9);
        assert_close(se.y - nw.y, 180.0, 1e-9);
    }
}
