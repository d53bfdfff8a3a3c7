use std::fmt;
use std::path::Path;

use scene::{
    ConfigError, FilterField, LoadError, MapView, TableSource, ViewConfig, ViewState,
    load_view_data,
};

/// Reads tables and outlines from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl TableSource for FsSource {
    async fn fetch_text(&self, location: &str) -> Result<String, String> {
        std::fs::read_to_string(Path::new(location)).map_err(|e| e.to_string())
    }
}

/// Command-line inputs that shape a [`ViewConfig`].
#[derive(Debug, Clone, Default)]
pub struct ViewOverrides {
    pub variant: Option<String>,
    pub config_json: Option<String>,
    pub filter: Option<FilterField>,
    pub survived: String,
    pub erased: String,
    pub outline: Option<String>,
    pub image: Option<String>,
}

impl ViewOverrides {
    /// Base config from `--config` JSON, else the named preset (default
    /// `mare`), then the data paths and explicit flags on top.
    pub fn resolve(&self) -> Result<ViewConfig, ConfigError> {
        let mut config = match (&self.config_json, &self.variant) {
            (Some(json), _) => ViewConfig::from_json_str(json)?,
            (None, Some(name)) => ViewConfig::preset(name)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown variant: {name}")))?,
            (None, None) => ViewConfig::default(),
        };
        config.survived_url = self.survived.clone();
        config.erased_url = self.erased.clone();
        // Preset outline/image locations are page-relative and meaningless here.
        if self.config_json.is_none() {
            config.outline_url = None;
            config.image_href = None;
        }
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(outline) = &self.outline {
            config.outline_url = Some(outline.clone());
        }
        if let Some(image) = &self.image {
            config.image_href = Some(image.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Loads the view's data from disk and builds it, without drawing markers.
pub fn load_view(config: ViewConfig) -> Result<MapView, LoadError> {
    let data = pollster::block_on(load_view_data(&FsSource, &config))?;
    Ok(MapView::with_default_context(config, data))
}

/// Loads, filters with `state` and renders the view as SVG.
pub fn render(config: ViewConfig, state: ViewState) -> Result<String, LoadError> {
    let mut view = load_view(config)?;
    view.update(state);
    Ok(scene::snapshot::render_svg(&view))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub survived: usize,
    pub erased: usize,
    pub filter: FilterField,
    pub slider_max: f64,
}

impl Summary {
    pub fn of(view: &MapView) -> Self {
        Self {
            survived: view.dataset().survived().len(),
            erased: view.dataset().erased().len(),
            filter: view.config().filter,
            slider_max: view.slider_max(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.filter {
            FilterField::CreationTime => "TimeStepCreated",
            FilterField::Diameter => "diameter",
        };
        writeln!(f, "survived: {}", self.survived)?;
        writeln!(f, "erased:   {}", self.erased)?;
        write!(f, "slider:   0..={} ({field})", self.slider_max)
    }
}

#[cfg(test)]
mod tests {
    use super::{Summary, ViewOverrides, load_view, render};
    use pretty_assertions::assert_eq;
    use scene::{FilterField, ViewState};
    use std::path::PathBuf;

    const SURVIVED: &str = "Longitude,Latitude,diameter,TimeStepCreated,SurvivedTimeStep\n190,10,16,5,9\n200,11,4,12,\n";
    const ERASED: &str = "Longitude,Latitude,diameter,TimeStepCreated\n10,-5,2.5,7\n";

    fn fixture(name: &str) -> (String, String) {
        let dir: PathBuf = std::env::temp_dir().join(format!("craters-tools-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let s = dir.join("survived.csv");
        let e = dir.join("erased.csv");
        std::fs::write(&s, SURVIVED).expect("write survived");
        std::fs::write(&e, ERASED).expect("write erased");
        (s.display().to_string(), e.display().to_string())
    }

    fn overrides(survived: String, erased: String) -> ViewOverrides {
        ViewOverrides {
            survived,
            erased,
            ..ViewOverrides::default()
        }
    }

    #[test]
    fn variant_and_filter_flags() {
        let mut o = overrides("a.csv".into(), "b.csv".into());
        o.variant = Some("nonmare".into());
        let cfg = o.resolve().expect("config");
        assert_eq!(cfg.filter, FilterField::Diameter);
        assert_eq!(cfg.survived_url, "a.csv");
        assert_eq!(cfg.outline_url, None);

        o.filter = Some(FilterField::CreationTime);
        o.outline = Some("mare.geojson".into());
        let cfg = o.resolve().expect("config");
        assert_eq!(cfg.filter, FilterField::CreationTime);
        assert_eq!(cfg.outline_url.as_deref(), Some("mare.geojson"));

        o.variant = Some("highlands".into());
        assert!(o.resolve().is_err());
    }

    #[test]
    fn json_config_is_the_base() {
        let mut o = overrides("a.csv".into(), "b.csv".into());
        o.config_json = Some(r#"{"prefix": "custom", "filter": "diameter", "width": 480, "height": 240}"#.into());
        let cfg = o.resolve().expect("config");
        assert_eq!(cfg.prefix, "custom");
        assert_eq!(cfg.width, 480.0);
        assert_eq!(cfg.erased_url, "b.csv");
    }

    #[test]
    fn summary_from_disk() {
        let (s, e) = fixture("summary");
        let view = load_view(overrides(s, e).resolve().expect("config")).expect("load");
        let summary = Summary::of(&view);
        assert_eq!(
            summary,
            Summary {
                survived: 2,
                erased: 1,
                filter: FilterField::CreationTime,
                slider_max: 12.0,
            }
        );
        assert!(summary.to_string().contains("0..=12"));
    }

    #[test]
    fn render_filters_markers() {
        let (s, e) = fixture("render");
        let cfg = overrides(s, e).resolve().expect("config");
        let svg = render(
            cfg,
            ViewState {
                threshold: 6.0,
                ..ViewState::default()
            },
        )
        .expect("render");
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn missing_table_fails() {
        let cfg = overrides("/nonexistent/s.csv".into(), "/nonexistent/e.csv".into())
            .resolve()
            .expect("config");
        assert!(load_view(cfg).is_err());
    }
}
