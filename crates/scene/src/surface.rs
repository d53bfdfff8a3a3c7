use formats::Outline;
use layers::SurfaceLayer;
use layers::raster::RasterLayer;
use layers::vector::VectorLayer;

use crate::config::ViewConfig;
use crate::context::MapContext;

/// Static part of a map view: everything except the crater markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    pub width: f64,
    pub height: f64,
    pub base_image: Option<RasterLayer>,
    pub sphere_path: String,
    /// `None` when the view has no outline or it failed to load.
    pub outline_path: Option<String>,
    pub graticule_path: String,
}

impl MapSurface {
    pub fn build(ctx: &MapContext, config: &ViewConfig, outline: Option<&Outline>) -> Self {
        let proj = &ctx.projection;
        Self {
            width: config.width,
            height: config.height,
            base_image: config
                .image_href
                .as_ref()
                .map(|href| RasterLayer::new(href.clone(), config.width, config.height)),
            sphere_path: VectorLayer::sphere().path(proj),
            outline_path: outline
                .filter(|o| !o.is_empty())
                .map(|o| VectorLayer::outline(o).path(proj)),
            graticule_path: VectorLayer::graticule(&ctx.graticule).path(proj),
        }
    }

    /// Layers this surface actually draws, bottom to top.
    pub fn layers(&self) -> Vec<SurfaceLayer> {
        SurfaceLayer::ORDER
            .iter()
            .copied()
            .filter(|l| match l {
                SurfaceLayer::BaseImage => self.base_image.is_some(),
                SurfaceLayer::Outline => self.outline_path.is_some(),
                _ => true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::MapSurface;
    use crate::config::ViewConfig;
    use crate::context::MapContext;
    use formats::Outline;
    use foundation::math::GeoPoint;
    use layers::SurfaceLayer;
    use pretty_assertions::assert_eq;

    fn ctx() -> MapContext {
        MapContext::for_surface(960.0, 480.0)
    }

    #[test]
    fn bare_surface_has_sphere_grid_and_markers() {
        let cfg = ViewConfig::with_prefix("x");
        let s = MapSurface::build(&ctx(), &cfg, None);
        assert_eq!(
            s.layers(),
            vec![SurfaceLayer::Sphere, SurfaceLayer::Graticule, SurfaceLayer::Markers]
        );
        assert!(s.sphere_path.starts_with('M'));
    }

    #[test]
    fn optional_layers_appear_when_configured() {
        let cfg = ViewConfig::preset("mare").expect("preset");
        let outline = Outline {
            rings: vec![vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(10.0, 0.0),
                GeoPoint::new(10.0, 10.0),
            ]],
        };
        let s = MapSurface::build(&ctx(), &cfg, Some(&outline));
        assert_eq!(s.layers().len(), 5);
        assert_eq!(
            s.base_image.as_ref().map(|r| r.href.as_str()),
            Some("img/moon.jpg")
        );
    }

    #[test]
    fn empty_outline_is_absent() {
        let cfg = ViewConfig::with_prefix("x");
        let s = MapSurface::build(&ctx(), &cfg, Some(&Outline::default()));
        assert_eq!(s.outline_path, None);
    }
}
