use formats::{CraterRecord, Outline};
use layers::markers::{KeyAllocator, Marker, MarkerJoin, MarkerLayer};
use layers::radius::radius;
use layers::tooltip::{tooltip_html, tooltip_lines};
use tracing::debug;

use crate::config::ViewConfig;
use crate::context::MapContext;
use crate::dataset::Dataset;
use crate::surface::MapSurface;
use crate::view_state::ViewState;
use crate::zoom::ZoomTransform;

/// Everything a view needs from the loaders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewData {
    pub dataset: Dataset,
    pub outline: Option<Outline>,
    /// Why a configured outline is missing, if it is.
    pub outline_warning: Option<String>,
}

/// One crater map view: static surface, keyed markers and zoom state.
///
/// Front ends read control state, call [`MapView::update`] and apply the
/// returned join to whatever they draw with.
#[derive(Debug, Clone)]
pub struct MapView {
    config: ViewConfig,
    context: MapContext,
    dataset: Dataset,
    surface: MapSurface,
    markers: MarkerLayer,
    zoom: ZoomTransform,
    redraws: u64,
}

impl MapView {
    pub fn new(config: ViewConfig, context: MapContext, data: ViewData) -> Self {
        let surface = MapSurface::build(&context, &config, data.outline.as_ref());
        let zoom = ZoomTransform::new(config.scale_extent);
        Self {
            config,
            context,
            dataset: data.dataset,
            surface,
            markers: MarkerLayer::new(),
            zoom,
            redraws: 0,
        }
    }

    /// View with a context fitted to the configured surface size.
    pub fn with_default_context(config: ViewConfig, data: ViewData) -> Self {
        let context = MapContext::for_surface(config.width, config.height);
        Self::new(config, context, data)
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn context(&self) -> &MapContext {
        &self.context
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    pub fn markers(&self) -> &[Marker] {
        self.markers.markers()
    }

    pub fn marker(&self, key: &str) -> Option<&Marker> {
        self.markers.get(key)
    }

    pub fn zoom(&self) -> &ZoomTransform {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomTransform {
        &mut self.zoom
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Slider maximum for this view's filter field.
    pub fn slider_max(&self) -> f64 {
        self.dataset
            .slider_bound(self.config.filter, self.config.fallback_bound())
    }

    /// Filters the dataset for `state` and rebinds the marker layer.
    pub fn update(&mut self, state: ViewState) -> MarkerJoin {
        let proj = &self.context.projection;
        let mut keys = KeyAllocator::new();
        let next: Vec<Marker> = self
            .dataset
            .filtered(self.config.filter, &state)
            .into_iter()
            .filter_map(|r| {
                let record = self.dataset.get(r)?;
                Some(Marker {
                    key: keys.key_for(record),
                    record: r,
                    center: proj.project(record.lon, record.lat),
                    radius: radius(record.diameter),
                })
            })
            .collect();

        let join = self.markers.join(next);
        self.redraws += 1;
        debug!(
            view = %self.config.prefix,
            redraw = self.redraws,
            threshold = state.threshold,
            shown = self.markers.len(),
            entered = join.enter.len(),
            exited = join.exit.len(),
            "redraw"
        );
        join
    }

    pub fn record_for(&self, key: &str) -> Option<&CraterRecord> {
        let marker = self.markers.get(key)?;
        self.dataset.get(marker.record)
    }

    pub fn tooltip_html(&self, key: &str) -> Option<String> {
        self.record_for(key)
            .map(|r| tooltip_html(r, self.config.tooltip_detail()))
    }

    pub fn tooltip_text(&self, key: &str) -> Option<String> {
        self.record_for(key)
            .map(|r| tooltip_lines(r, self.config.tooltip_detail()).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::{MapView, ViewData};
    use crate::config::{FilterField, ViewConfig};
    use crate::dataset::Dataset;
    use crate::view_state::ViewState;
    use formats::{Category, CraterRecord};
    use pretty_assertions::assert_eq;

    fn rec(lon: f64, created: f64, diameter: f64, category: Category) -> CraterRecord {
        CraterRecord {
            lon,
            lat: 10.0,
            diameter,
            created,
            survived_time: None,
            id: None,
            category,
        }
    }

    fn view(filter: FilterField) -> MapView {
        let dataset = Dataset::new(
            vec![
                rec(10.0, 5.0, 16.0, Category::Survived),
                rec(20.0, 1.0, 4.0, Category::Survived),
                rec(30.0, 8.0, 0.5, Category::Survived),
            ],
            vec![
                rec(40.0, 2.0, 100.0, Category::Erased),
                rec(10.0, 5.0, 16.0, Category::Erased),
            ],
        );
        let config = ViewConfig {
            filter,
            ..ViewConfig::with_prefix("test")
        };
        MapView::with_default_context(
            config,
            ViewData {
                dataset,
                ..ViewData::default()
            },
        )
    }

    fn keys_of(view: &MapView, category: Category) -> Vec<String> {
        view.markers()
            .iter()
            .filter(|m| m.record.category == category)
            .map(|m| m.key.to_string())
            .collect()
    }

    #[test]
    fn initial_redraw_shows_all_records() {
        let mut v = view(FilterField::CreationTime);
        let join = v.update(ViewState::default());
        assert_eq!(join.enter.len(), 5);
        assert_eq!(v.markers().len(), 5);
        assert_eq!(v.redraw_count(), 1);
    }

    #[test]
    fn threshold_above_everything_removes_all() {
        let mut v = view(FilterField::CreationTime);
        v.update(ViewState::default());
        let join = v.update(ViewState {
            threshold: 1_000.0,
            ..ViewState::default()
        });
        assert_eq!(join.exit.len(), 5);
        assert!(v.markers().is_empty());
    }

    #[test]
    fn marker_geometry() {
        let mut v = view(FilterField::CreationTime);
        v.update(ViewState::default());
        let m = &v.markers()[0];
        assert!((m.radius - 3.2).abs() < 1e-12);
        let expected = v.context().projection.project(10.0, 10.0);
        assert_eq!(m.center, expected);
    }

    #[test]
    fn identical_records_keep_their_own_category() {
        let mut v = view(FilterField::CreationTime);
        v.update(ViewState::default());
        let survived = v
            .markers()
            .iter()
            .find(|m| m.key.as_str() == "survived:10,10,16")
            .expect("survived marker");
        assert_eq!(survived.class_name(), "survived");
        let erased = v
            .markers()
            .iter()
            .find(|m| m.key.as_str() == "erased:10,10,16")
            .expect("erased marker");
        assert_eq!(erased.class_name(), "erased");
    }

    #[test]
    fn toggling_a_category_leaves_the_other_untouched() {
        let mut v = view(FilterField::Diameter);
        v.update(ViewState::default());
        let erased_before = keys_of(&v, Category::Erased);
        let survived_before = keys_of(&v, Category::Survived);

        let join = v.update(ViewState {
            show_survived: false,
            ..ViewState::default()
        });
        let mut exited: Vec<String> = join.exit.iter().map(|k| k.to_string()).collect();
        exited.sort();
        let mut expected = survived_before.clone();
        expected.sort();
        assert_eq!(exited, expected);
        assert!(join.enter.is_empty());
        assert_eq!(keys_of(&v, Category::Erased), erased_before);
    }

    #[test]
    fn diameter_filter_uses_diameter() {
        let mut v = view(FilterField::Diameter);
        v.update(ViewState {
            threshold: 16.0,
            ..ViewState::default()
        });
        assert_eq!(v.markers().len(), 3);
    }

    #[test]
    fn tooltips_follow_variant() {
        let mut v = view(FilterField::Diameter);
        v.update(ViewState::default());
        assert_eq!(
            v.tooltip_html("erased:40,10,100").as_deref(),
            Some("Diameter: 100.00 km")
        );

        let mut t = view(FilterField::CreationTime);
        t.update(ViewState::default());
        let text = t.tooltip_text("survived:10,10,16").expect("tooltip");
        assert_eq!(text.lines().count(), 4);
        assert_eq!(t.tooltip_html("missing"), None);
    }

    #[test]
    fn slider_max_from_data() {
        assert_eq!(view(FilterField::CreationTime).slider_max(), 8.0);
        assert_eq!(view(FilterField::Diameter).slider_max(), 100.0);
    }
}
