use formats::CraterRecord;
use layers::tooltip::TooltipDetail;
use serde::{Deserialize, Serialize};

/// Record field compared against the slider threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    /// `TimeStepCreated`.
    CreationTime,
    /// `diameter`, in km.
    Diameter,
}

impl FilterField {
    pub fn value(self, record: &CraterRecord) -> f64 {
        match self {
            FilterField::CreationTime => record.created,
            FilterField::Diameter => record.diameter,
        }
    }

    /// Middle part of the slider/label element ids.
    pub fn slider_suffix(self) -> &'static str {
        match self {
            FilterField::CreationTime => "timestep",
            FilterField::Diameter => "diameter",
        }
    }

    /// Slider bound used when the data has no finite value for this field.
    pub fn fallback_bound(self) -> f64 {
        match self {
            FilterField::CreationTime => 100.0,
            FilterField::Diameter => 50.0,
        }
    }

    pub fn tooltip_detail(self) -> TooltipDetail {
        match self {
            FilterField::CreationTime => TooltipDetail::Full,
            FilterField::Diameter => TooltipDetail::DiameterOnly,
        }
    }

    /// Slider label text for a threshold value, e.g. `"12"` or `"12 km"`.
    pub fn label_text(self, value: &str) -> String {
        match self {
            FilterField::CreationTime => value.to_string(),
            FilterField::Diameter => format!("{value} km"),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "timestep" | "creation_time" | "created" => Some(FilterField::CreationTime),
            "diameter" | "size" => Some(FilterField::Diameter),
            _ => None,
        }
    }
}

/// Everything that distinguishes one map view from another.
///
/// Fields missing from a serialized config take the defaults of
/// [`ViewConfig::with_prefix`] for its prefix, so data locations follow the
/// prefix unless given explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewConfig")]
pub struct ViewConfig {
    /// Element-id prefix, e.g. `mare` for `#mare-map`, `#mare-show-survived`.
    pub prefix: String,
    pub filter: FilterField,
    /// Overrides the field's default tooltip content.
    pub tooltip: Option<TooltipDetail>,
    pub survived_url: String,
    pub erased_url: String,
    pub outline_url: Option<String>,
    pub image_href: Option<String>,
    pub width: f64,
    pub height: f64,
    pub scale_extent: [f64; 2],
    /// Overrides the field's fallback slider bound.
    pub fallback_bound: Option<f64>,
    /// Element id of the shared tooltip.
    pub tooltip_id: String,
}

/// Serialized form of [`ViewConfig`]: every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawViewConfig {
    prefix: Option<String>,
    filter: Option<FilterField>,
    tooltip: Option<TooltipDetail>,
    survived_url: Option<String>,
    erased_url: Option<String>,
    outline_url: Option<String>,
    image_href: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    scale_extent: Option<[f64; 2]>,
    fallback_bound: Option<f64>,
    tooltip_id: Option<String>,
}

impl From<RawViewConfig> for ViewConfig {
    fn from(raw: RawViewConfig) -> Self {
        let base = ViewConfig::with_prefix(raw.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()));
        ViewConfig {
            filter: raw.filter.unwrap_or(base.filter),
            tooltip: raw.tooltip,
            survived_url: raw.survived_url.unwrap_or(base.survived_url),
            erased_url: raw.erased_url.unwrap_or(base.erased_url),
            outline_url: raw.outline_url,
            image_href: raw.image_href,
            width: raw.width.unwrap_or(base.width),
            height: raw.height.unwrap_or(base.height),
            scale_extent: raw.scale_extent.unwrap_or(base.scale_extent),
            fallback_bound: raw.fallback_bound,
            tooltip_id: raw.tooltip_id.unwrap_or(base.tooltip_id),
            prefix: base.prefix,
        }
    }
}

const DEFAULT_PREFIX: &str = "map";

impl Default for ViewConfig {
    fn default() -> Self {
        Self::preset("mare").unwrap_or_else(|| Self::with_prefix(DEFAULT_PREFIX))
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "view config JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid view config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ViewConfig {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            survived_url: format!("data/{prefix}_survived.csv"),
            erased_url: format!("data/{prefix}_erased.csv"),
            prefix,
            filter: FilterField::CreationTime,
            tooltip: None,
            outline_url: None,
            image_href: None,
            width: 960.0,
            height: 480.0,
            scale_extent: [1.0, 8.0],
            fallback_bound: None,
            tooltip_id: "tooltip".to_string(),
        }
    }

    /// Built-in views: `mare` (time filter, mare outline) and `nonmare`
    /// (diameter filter).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "mare" => Some(Self {
                outline_url: Some("data/mare.geojson".to_string()),
                image_href: Some("img/moon.jpg".to_string()),
                ..Self::with_prefix("mare")
            }),
            "nonmare" => Some(Self {
                filter: FilterField::Diameter,
                image_href: Some("img/moon.jpg".to_string()),
                ..Self::with_prefix("nonmare")
            }),
            _ => None,
        }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(payload).map_err(ConfigError::Json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("prefix must not be empty".to_string()));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "surface size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let [lo, hi] = self.scale_extent;
        if !(lo > 0.0 && lo <= hi) {
            return Err(ConfigError::Invalid(format!(
                "scale extent must satisfy 0 < min <= max, got [{lo}, {hi}]"
            )));
        }
        Ok(())
    }

    pub fn tooltip_detail(&self) -> TooltipDetail {
        self.tooltip.unwrap_or_else(|| self.filter.tooltip_detail())
    }

    pub fn fallback_bound(&self) -> f64 {
        self.fallback_bound
            .unwrap_or_else(|| self.filter.fallback_bound())
    }

    pub fn container_id(&self) -> String {
        format!("{}-map", self.prefix)
    }

    pub fn show_survived_id(&self) -> String {
        format!("{}-show-survived", self.prefix)
    }

    pub fn show_erased_id(&self) -> String {
        format!("{}-show-erased", self.prefix)
    }

    pub fn slider_id(&self) -> String {
        format!("{}-{}-slider", self.prefix, self.filter.slider_suffix())
    }

    pub fn slider_label_id(&self) -> String {
        format!("{}-{}-value", self.prefix, self.filter.slider_suffix())
    }

    /// Label text for a slider at zero.
    pub fn zero_label(&self) -> String {
        self.filter.label_text("0")
    }
}
