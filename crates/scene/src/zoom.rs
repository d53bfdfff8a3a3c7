use foundation::math::Vec2;
use layers::vector::fmt_px;

/// Wheel pixels to zoom exponent (base 2).
const WHEEL_ZOOM_RATE: f64 = 0.002;
/// Pixels per wheel line (`deltaMode == 1`).
const WHEEL_LINE_PX: f64 = 25.0;
/// Pixels per wheel page (`deltaMode == 2`): one page is one doubling.
const WHEEL_PAGE_PX: f64 = 500.0;

/// Unit of a wheel event's delta (DOM `WheelEvent.deltaMode`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    pub fn from_dom(delta_mode: u32) -> Self {
        match delta_mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }

    fn to_px(self, delta: f64) -> f64 {
        match self {
            WheelDeltaMode::Pixel => delta,
            WheelDeltaMode::Line => delta * WHEEL_LINE_PX,
            WheelDeltaMode::Page => delta * WHEEL_PAGE_PX,
        }
    }
}

/// Pan/zoom transform shared by every zoomable layer of a view.
///
/// Screen position of a surface point `p` is `p * k + (x, y)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
    scale_extent: [f64; 2],
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::new([1.0, 8.0])
    }
}

impl ZoomTransform {
    pub fn new(scale_extent: [f64; 2]) -> Self {
        let [lo, hi] = scale_extent;
        let lo = if lo > 0.0 { lo } else { 1.0 };
        let hi = hi.max(lo);
        Self {
            k: 1.0_f64.clamp(lo, hi),
            x: 0.0,
            y: 0.0,
            scale_extent: [lo, hi],
        }
    }

    pub fn scale_extent(&self) -> [f64; 2] {
        self.scale_extent
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.scale_extent);
    }

    pub fn apply(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    pub fn invert(&self, screen: Vec2) -> Vec2 {
        Vec2::new((screen.x - self.x) / self.k, (screen.y - self.y) / self.k)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.x += dx;
            self.y += dy;
        }
    }

    /// Scales to `k` (clamped) keeping the surface point under `anchor` fixed.
    pub fn scale_to(&mut self, k: f64, anchor: Vec2) {
        if !k.is_finite() || !anchor.is_finite() {
            return;
        }
        let [lo, hi] = self.scale_extent;
        let next = k.clamp(lo, hi);
        let content = self.invert(anchor);
        self.k = next;
        self.x = anchor.x - content.x * next;
        self.y = anchor.y - content.y * next;
    }

    /// Wheel zoom around the cursor.
    pub fn zoom_at(&mut self, anchor: Vec2, wheel_delta_y: f64, mode: WheelDeltaMode) {
        let px = mode.to_px(wheel_delta_y);
        let factor = (-px * WHEEL_ZOOM_RATE).exp2();
        self.scale_to(self.k * factor, anchor);
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            fmt_px(self.x),
            fmt_px(self.y),
            fmt_px(self.k)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{WheelDeltaMode, ZoomTransform};
    use foundation::math::Vec2;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {a} ~= {b}");
    }

    #[test]
    fn identity_by_default() {
        let z = ZoomTransform::default();
        assert_eq!(z.apply(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0));
        assert_eq!(z.to_svg(), "translate(0,0) scale(1)");
    }

    #[test]
    fn scale_stays_within_extent() {
        let mut z = ZoomTransform::default();
        for _ in 0..100 {
            z.zoom_at(Vec2::new(100.0, 100.0), -500.0, WheelDeltaMode::Pixel);
        }
        assert_close(z.k, 8.0);
        for _ in 0..100 {
            z.zoom_at(Vec2::new(100.0, 100.0), 500.0, WheelDeltaMode::Pixel);
        }
        assert_close(z.k, 1.0);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut z = ZoomTransform::default();
        z.pan(12.0, -7.0);
        let anchor = Vec2::new(300.0, 150.0);
        let content = z.invert(anchor);
        z.zoom_at(anchor, -250.0, WheelDeltaMode::Pixel);
        assert!(z.k > 1.0);
        let back = z.apply(content);
        assert_close(back.x, anchor.x);
        assert_close(back.y, anchor.y);
    }

    #[test]
    fn wheel_step_doubles_per_500px() {
        let mut z = ZoomTransform::default();
        z.zoom_at(Vec2::new(0.0, 0.0), -500.0, WheelDeltaMode::Pixel);
        assert_close(z.k, 2.0);
    }

    #[test]
    fn line_mode_scrolls_faster() {
        let mut a = ZoomTransform::default();
        let mut b = ZoomTransform::default();
        a.zoom_at(Vec2::new(0.0, 0.0), -3.0, WheelDeltaMode::Pixel);
        b.zoom_at(Vec2::new(0.0, 0.0), -3.0, WheelDeltaMode::Line);
        assert!(b.k > a.k);
    }

    #[test]
    fn page_mode_doubles_per_page() {
        let mut z = ZoomTransform::default();
        z.zoom_at(Vec2::new(0.0, 0.0), -1.0, WheelDeltaMode::Page);
        assert_close(z.k, 2.0);
        z.zoom_at(Vec2::new(0.0, 0.0), 1.0, WheelDeltaMode::Page);
        assert_close(z.k, 1.0);
    }

    #[test]
    fn delta_mode_from_dom() {
        assert_eq!(WheelDeltaMode::from_dom(0), WheelDeltaMode::Pixel);
        assert_eq!(WheelDeltaMode::from_dom(1), WheelDeltaMode::Line);
        assert_eq!(WheelDeltaMode::from_dom(2), WheelDeltaMode::Page);
        assert_eq!(WheelDeltaMode::from_dom(7), WheelDeltaMode::Pixel);
    }

    #[test]
    fn pan_ignores_nan() {
        let mut z = ZoomTransform::default();
        z.pan(f64::NAN, 1.0);
        assert_eq!(z.x, 0.0);
        assert_eq!(z.y, 0.0);
        z.pan(5.0, 1.0);
        assert_eq!(z.to_svg(), "translate(5,1) scale(1)");
    }

    #[test]
    fn reset_restores_identity() {
        let mut z = ZoomTransform::new([1.0, 4.0]);
        z.scale_to(3.0, Vec2::new(10.0, 10.0));
        z.reset();
        assert_eq!(z, ZoomTransform::new([1.0, 4.0]));
    }
}
