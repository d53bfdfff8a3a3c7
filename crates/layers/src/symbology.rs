use formats::Category;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerStyle {
    pub fill: Option<[f32; 4]>,
    pub stroke: Option<[f32; 4]>,
    pub stroke_width: f32,
}

impl LayerStyle {
    pub const fn new(fill: Option<[f32; 4]>, stroke: Option<[f32; 4]>, stroke_width: f32) -> Self {
        Self {
            fill,
            stroke,
            stroke_width,
        }
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self::new(None, Some([1.0, 1.0, 1.0, 1.0]), 1.0)
    }
}

/// Inline styles for the map surface. Page CSS may override them through the
/// layer and category classes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MapStyle {
    pub sphere: LayerStyle,
    pub outline: LayerStyle,
    pub graticule: LayerStyle,
    pub survived: LayerStyle,
    pub erased: LayerStyle,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            sphere: LayerStyle::new(Some([0.09, 0.09, 0.11, 1.0]), Some([0.4, 0.4, 0.45, 1.0]), 1.0),
            outline: LayerStyle::new(None, Some([0.95, 0.8, 0.3, 0.9]), 1.5),
            graticule: LayerStyle::new(None, Some([0.8, 0.8, 0.8, 0.25]), 0.5),
            survived: LayerStyle::new(Some([0.2, 0.6, 1.0, 0.7]), Some([0.0, 0.0, 0.0, 0.6]), 0.5),
            erased: LayerStyle::new(Some([1.0, 0.35, 0.25, 0.7]), Some([0.0, 0.0, 0.0, 0.6]), 0.5),
        }
    }
}

impl MapStyle {
    pub fn category(&self, category: Category) -> &LayerStyle {
        match category {
            Category::Survived => &self.survived,
            Category::Erased => &self.erased,
        }
    }
}

pub fn rgba_css(c: [f32; 4]) -> String {
    let r = (c[0].clamp(0.0, 1.0) * 255.0).round() as u32;
    let g = (c[1].clamp(0.0, 1.0) * 255.0).round() as u32;
    let b = (c[2].clamp(0.0, 1.0) * 255.0).round() as u32;
    let a = c[3].clamp(0.0, 1.0);
    format!("rgba({r},{g},{b},{a})")
}

/// CSS paint value for an optional color (`none` when absent).
pub fn paint_css(c: Option<[f32; 4]>) -> String {
    c.map(rgba_css).unwrap_or_else(|| "none".to_string())
}

#[cfg(test)]
mod tests {
    use super::{MapStyle, paint_css, rgba_css};
    use formats::Category;

    #[test]
    fn css_colors() {
        assert_eq!(rgba_css([1.0, 0.0, 0.5, 1.0]), "rgba(255,0,128,1)");
        assert_eq!(paint_css(None), "none");
    }

    #[test]
    fn categories_are_distinguishable() {
        let style = MapStyle::default();
        assert_ne!(
            style.category(Category::Survived).fill,
            style.category(Category::Erased).fill
        );
    }
}
