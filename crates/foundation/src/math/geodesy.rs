/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    /// Same point with the crater-table longitude convention applied.
    pub fn with_crater_lon(self) -> Self {
        Self::new(wrap_crater_lon(self.lon_deg), self.lat_deg)
    }
}

/// Re-expresses a crater-table longitude (measured 0..360 east) in [-180, 180).
///
/// Applied exactly once per coordinate: shift by -180, then wrap values that
/// fall below -180. NaN passes through unchanged.
pub fn wrap_crater_lon(lon_deg: f64) -> f64 {
    let mut lon = lon_deg - 180.0;
    if lon < -180.0 {
        lon += 360.0;
    }
    lon
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, wrap_crater_lon};

    #[test]
    fn crater_lon_shifts_by_half_turn() {
        assert_eq!(wrap_crater_lon(190.0), 10.0);
        assert_eq!(wrap_crater_lon(0.0), -180.0);
        assert_eq!(wrap_crater_lon(180.0), 0.0);
        assert_eq!(wrap_crater_lon(359.5), 179.5);
    }

    #[test]
    fn crater_lon_wraps_below_antimeridian() {
        assert_eq!(wrap_crater_lon(-10.0), 170.0);
    }

    #[test]
    fn crater_lon_in_range_for_table_domain() {
        let mut lon = -180.0;
        while lon < 360.0 {
            let w = wrap_crater_lon(lon);
            assert!((-180.0..180.0).contains(&w), "{lon} -> {w}");
            lon += 0.25;
        }
    }

    #[test]
    fn crater_lon_keeps_nan() {
        assert!(wrap_crater_lon(f64::NAN).is_nan());
    }

    #[test]
    fn geo_point_crater_lon() {
        let p = GeoPoint::new(200.0, 5.0).with_crater_lon();
        assert_eq!(p, GeoPoint::new(20.0, 5.0));
    }
}
