use std::future::Future;

use formats::{Category, CraterRecord, CraterTableError, Outline, parse_crater_table};
use futures_util::future::{join, try_join};
use tracing::{info, warn};

use crate::config::ViewConfig;
use crate::dataset::Dataset;
use crate::view::ViewData;

/// Somewhere crater tables and outlines can be read from (HTTP, disk, memory).
pub trait TableSource {
    fn fetch_text(&self, location: &str) -> impl Future<Output = Result<String, String>>;
}

#[derive(Debug)]
pub enum LoadError {
    Fetch {
        location: String,
        message: String,
    },
    Table {
        location: String,
        source: CraterTableError,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch { location, message } => {
                write!(f, "failed to fetch {location}: {message}")
            }
            LoadError::Table { location, source } => {
                write!(f, "failed to parse {location}: {source}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Fetch { .. } => None,
            LoadError::Table { source, .. } => Some(source),
        }
    }
}

async fn load_table<S: TableSource>(
    source: &S,
    location: &str,
    category: Category,
) -> Result<Vec<CraterRecord>, LoadError> {
    let text = source
        .fetch_text(location)
        .await
        .map_err(|message| LoadError::Fetch {
            location: location.to_string(),
            message,
        })?;
    parse_crater_table(&text, category).map_err(|source| LoadError::Table {
        location: location.to_string(),
        source,
    })
}

/// Loads both crater tables concurrently. Either failure fails the load.
pub async fn load_dataset<S: TableSource>(
    source: &S,
    survived_location: &str,
    erased_location: &str,
) -> Result<Dataset, LoadError> {
    let (survived, erased) = try_join(
        load_table(source, survived_location, Category::Survived),
        load_table(source, erased_location, Category::Erased),
    )
    .await?;
    info!(
        survived = survived.len(),
        erased = erased.len(),
        "crater tables loaded"
    );
    Ok(Dataset::new(survived, erased))
}

/// Reads an optional outline. `Ok(None)` when no location is configured.
pub async fn load_outline<S: TableSource>(
    source: &S,
    location: Option<&str>,
) -> Result<Option<Outline>, String> {
    let Some(location) = location else {
        return Ok(None);
    };
    let text = source
        .fetch_text(location)
        .await
        .map_err(|message| format!("outline {location} unavailable: {message}"))?;
    Outline::from_geojson_str(&text)
        .map(Some)
        .map_err(|e| format!("outline {location} unreadable: {e}"))
}

/// Loads the tables and the outline for `config`, settling all of them before
/// returning so the first paint is complete. An outline failure does not fail
/// the load; it is logged and kept in [`ViewData::outline_warning`].
pub async fn load_view_data<S: TableSource>(
    source: &S,
    config: &ViewConfig,
) -> Result<ViewData, LoadError> {
    let (dataset, outline) = join(
        load_dataset(source, &config.survived_url, &config.erased_url),
        load_outline(source, config.outline_url.as_deref()),
    )
    .await;
    let (outline, outline_warning) = match outline {
        Ok(outline) => (outline, None),
        Err(message) => {
            warn!(view = %config.prefix, %message, "drawing without outline");
            (None, Some(message))
        }
    };
    Ok(ViewData {
        dataset: dataset?,
        outline,
        outline_warning,
    })
}
