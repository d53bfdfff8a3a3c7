use foundation::math::{Equirectangular, Vec2};
use layers::symbology::MapStyle;
use layers::tooltip::TOOLTIP_OFFSET;
use layers::vector::Graticule;

/// Shared drawing parameters for one map view: projection, styling, grid and
/// tooltip placement. Each view owns its own context.
#[derive(Debug, Clone, PartialEq)]
pub struct MapContext {
    pub projection: Equirectangular,
    pub style: MapStyle,
    pub graticule: Graticule,
    pub tooltip_offset: Vec2,
}

impl MapContext {
    /// Context whose projection fits the whole sphere into `width` × `height`.
    pub fn for_surface(width: f64, height: f64) -> Self {
        Self {
            projection: Equirectangular::fit_size(width, height),
            style: MapStyle::default(),
            graticule: Graticule::default(),
            tooltip_offset: TOOLTIP_OFFSET,
        }
    }

    pub fn tooltip_position(&self, pointer: Vec2) -> Vec2 {
        pointer + self.tooltip_offset
    }
}
