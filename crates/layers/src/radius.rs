pub const RADIUS_MIN_PX: f64 = 1.0;
pub const RADIUS_MAX_PX: f64 = 8.0;
const RADIUS_GAIN: f64 = 0.8;

/// Marker radius in pixels for a crater diameter in kilometers.
///
/// `clamp(sqrt(d) * 0.8, 1, 8)`. Total: negative or NaN diameters get the
/// minimum radius.
pub fn radius(diameter_km: f64) -> f64 {
    let r = diameter_km.sqrt() * RADIUS_GAIN;
    if r.is_nan() {
        return RADIUS_MIN_PX;
    }
    r.clamp(RADIUS_MIN_PX, RADIUS_MAX_PX)
}

#[cfg(test)]
mod tests {
    use super::{RADIUS_MAX_PX, RADIUS_MIN_PX, radius};

    #[test]
    fn sixteen_km_is_three_point_two() {
        assert!((radius(16.0) - 3.2).abs() < 1e-12);
    }

    #[test]
    fn clamps_both_ends() {
        assert_eq!(radius(0.0), RADIUS_MIN_PX);
        assert_eq!(radius(-4.0), RADIUS_MIN_PX);
        assert_eq!(radius(f64::NAN), RADIUS_MIN_PX);
        assert_eq!(radius(10_000.0), RADIUS_MAX_PX);
        assert_eq!(radius(f64::INFINITY), RADIUS_MAX_PX);
    }

    #[test]
    fn non_decreasing_and_bounded() {
        let mut prev = radius(0.0);
        let mut d = 0.0;
        while d <= 200.0 {
            let r = radius(d);
            assert!(r >= prev, "radius decreased at d={d}");
            assert!((RADIUS_MIN_PX..=RADIUS_MAX_PX).contains(&r));
            prev = r;
            d += 0.5;
        }
    }
}
