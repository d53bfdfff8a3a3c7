/// Full-bleed base image drawn under the map.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    pub href: String,
    pub width: f64,
    pub height: f64,
}

impl RasterLayer {
    pub fn new(href: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            href: href.into(),
            width,
            height,
        }
    }
}
