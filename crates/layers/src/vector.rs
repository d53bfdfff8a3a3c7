use std::fmt::Write;

use foundation::math::{Equirectangular, GeoPoint, Vec2};
use formats::Outline;

/// Formats a pixel coordinate with at most three decimals and no trailing zeros.
pub fn fmt_px(v: f64) -> String {
    let mut s = format!("{v:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// SVG path data (`d` attribute) builder.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PathBuilder {
    d: String,
    open: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Vec2) {
        let _ = write!(self.d, "M{},{}", fmt_px(p.x), fmt_px(p.y));
        self.open = true;
    }

    pub fn line_to(&mut self, p: Vec2) {
        if !self.open {
            self.move_to(p);
            return;
        }
        let _ = write!(self.d, "L{},{}", fmt_px(p.x), fmt_px(p.y));
    }

    pub fn close(&mut self) {
        if self.open {
            self.d.push('Z');
            self.open = false;
        }
    }

    /// Adds one projected polyline. Non-finite vertices split the line.
    pub fn polyline(&mut self, proj: &Equirectangular, points: &[GeoPoint], closed: bool) {
        let mut started = false;
        let mut broken = false;
        for p in points {
            let xy = proj.project_point(*p);
            if !xy.is_finite() {
                started = false;
                broken = true;
                continue;
            }
            if started {
                self.line_to(xy);
            } else {
                self.move_to(xy);
                started = true;
            }
        }
        if closed && started && !broken {
            self.close();
        }
        self.open = false;
    }

    pub fn finish(self) -> String {
        self.d
    }
}

/// Outline of the whole globe in geographic coordinates.
pub fn sphere_ring() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(-180.0, 90.0),
        GeoPoint::new(180.0, 90.0),
        GeoPoint::new(180.0, -90.0),
        GeoPoint::new(-180.0, -90.0),
    ]
}

/// Latitude/longitude reference grid.
///
/// Minor lines every `step_deg`, limited to ±`minor_lat_extent`; meridians on
/// multiples of `major_step_deg` run pole to pole.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Graticule {
    pub step_deg: f64,
    pub minor_lat_extent: f64,
    pub major_step_deg: f64,
}

impl Default for Graticule {
    fn default() -> Self {
        Self {
            step_deg: 10.0,
            minor_lat_extent: 80.0,
            major_step_deg: 90.0,
        }
    }
}

impl Graticule {
    pub fn lines(&self) -> Vec<Vec<GeoPoint>> {
        let mut out = Vec::new();
        if self.step_deg <= 0.0 || !self.step_deg.is_finite() {
            return out;
        }
        let ext = self.minor_lat_extent;

        let mut lon = -180.0;
        while lon < 180.0 {
            let major = self.major_step_deg > 0.0 && (lon % self.major_step_deg).abs() < 1e-9;
            let lat_ext = if major { 90.0 } else { ext };
            out.push(vec![
                GeoPoint::new(lon, -lat_ext),
                GeoPoint::new(lon, lat_ext),
            ]);
            lon += self.step_deg;
        }

        let mut lat = -ext;
        while lat <= ext + 1e-9 {
            out.push(vec![GeoPoint::new(-180.0, lat), GeoPoint::new(180.0, lat)]);
            lat += self.step_deg;
        }
        out
    }
}

/// Static geographic layer drawn as a single SVG path.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorLayer {
    pub rings: Vec<Vec<GeoPoint>>,
    pub closed: bool,
}

impl VectorLayer {
    pub fn sphere() -> Self {
        Self {
            rings: vec![sphere_ring()],
            closed: true,
        }
    }

    pub fn outline(outline: &Outline) -> Self {
        Self {
            rings: outline.rings.clone(),
            closed: true,
        }
    }

    pub fn graticule(graticule: &Graticule) -> Self {
        Self {
            rings: graticule.lines(),
            closed: false,
        }
    }

    pub fn path(&self, proj: &Equirectangular) -> String {
        let mut b = PathBuilder::new();
        for ring in &self.rings {
            b.polyline(proj, ring, self.closed);
        }
        b.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Graticule, VectorLayer, fmt_px};
    use foundation::math::{Equirectangular, GeoPoint};
    use formats::Outline;
    use pretty_assertions::assert_eq;

    #[test]
    fn px_formatting() {
        assert_eq!(fmt_px(480.0), "480");
        assert_eq!(fmt_px(12.5), "12.5");
        assert_eq!(fmt_px(1.23456), "1.235");
        assert_eq!(fmt_px(-0.0001), "0");
    }

    #[test]
    fn sphere_path_is_surface_rectangle() {
        let proj = Equirectangular::fit_size(960.0, 480.0);
        let d = VectorLayer::sphere().path(&proj);
        assert_eq!(d, "M0,0L960,0L960,480L0,480Z");
    }

    #[test]
    fn default_graticule_counts() {
        let lines = Graticule::default().lines();
        // 36 meridians, 17 parallels (-80..=80).
        assert_eq!(lines.len(), 36 + 17);
        // Meridian at -180 is major and reaches the poles.
        assert_eq!(lines[0][1], GeoPoint::new(-180.0, 90.0));
        // Meridian at -170 stops at 80.
        assert_eq!(lines[1][1], GeoPoint::new(-170.0, 80.0));
    }

    #[test]
    fn graticule_lines_are_open() {
        let proj = Equirectangular::fit_size(960.0, 480.0);
        let d = VectorLayer::graticule(&Graticule::default()).path(&proj);
        assert!(!d.contains('Z'));
        assert_eq!(d.matches('M').count(), 53);
    }

    #[test]
    fn outline_skips_nan_vertices() {
        let proj = Equirectangular::fit_size(360.0, 180.0);
        let outline = Outline {
            rings: vec![vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(f64::NAN, 0.0),
                GeoPoint::new(10.0, 0.0),
                GeoPoint::new(10.0, 10.0),
            ]],
        };
        let d = VectorLayer::outline(&outline).path(&proj);
        assert_eq!(d.matches('M').count(), 2);
        assert!(!d.contains("NaN"));
        assert!(!d.ends_with('Z'));
    }

    #[test]
    fn empty_graticule_for_bad_step() {
        let g = Graticule {
            step_deg: 0.0,
            ..Graticule::default()
        };
        assert!(g.lines().is_empty());
    }
}
