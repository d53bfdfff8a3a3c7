/// Drawing-surface layers, bottom to top.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceLayer {
    BaseImage,
    Sphere,
    Outline,
    Graticule,
    Markers,
}

impl SurfaceLayer {
    pub const ORDER: [SurfaceLayer; 5] = [
        SurfaceLayer::BaseImage,
        SurfaceLayer::Sphere,
        SurfaceLayer::Outline,
        SurfaceLayer::Graticule,
        SurfaceLayer::Markers,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            SurfaceLayer::BaseImage => "base-image",
            SurfaceLayer::Sphere => "sphere",
            SurfaceLayer::Outline => "outline",
            SurfaceLayer::Graticule => "graticule",
            SurfaceLayer::Markers => "craters",
        }
    }

    /// Layers that follow the pan/zoom transform. The sphere backdrop stays put.
    pub fn follows_zoom(self) -> bool {
        !matches!(self, SurfaceLayer::Sphere)
    }
}
