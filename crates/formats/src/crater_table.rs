use std::io::Read;

use foundation::math::wrap_crater_lon;
use serde::{Deserialize, Serialize};

pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_DIAMETER: &str = "diameter";
pub const COL_CREATED: &str = "TimeStepCreated";
pub const COL_SURVIVED: &str = "SurvivedTimeStep";
pub const COL_ID: &str = "id";

/// Which table a crater was read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Survived,
    Erased,
}

impl Category {
    /// CSS class used for markers of this category.
    pub fn class_name(self) -> &'static str {
        match self {
            Category::Survived => "survived",
            Category::Erased => "erased",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.class_name())
    }
}

/// One parsed crater observation.
///
/// Numeric fields are not validated: unparseable text becomes NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct CraterRecord {
    /// Degrees in [-180, 180).
    pub lon: f64,
    pub lat: f64,
    /// Kilometers.
    pub diameter: f64,
    pub created: f64,
    pub survived_time: Option<f64>,
    pub id: Option<String>,
    pub category: Category,
}

#[derive(Debug)]
pub enum CraterTableError {
    Csv(csv::Error),
}

impl std::fmt::Display for CraterTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CraterTableError::Csv(e) => write!(f, "crater table CSV error: {e}"),
        }
    }
}

impl std::error::Error for CraterTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CraterTableError::Csv(e) => Some(e),
        }
    }
}

impl From<csv::Error> for CraterTableError {
    fn from(e: csv::Error) -> Self {
        CraterTableError::Csv(e)
    }
}

/// Text-to-number coercion for table cells.
///
/// Blank text is 0; anything that is not a decimal number is NaN.
pub fn coerce_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    // Rust accepts "inf"/"nan" spellings; table cells never mean those.
    if t
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

#[derive(Debug, Default, Clone, Copy)]
struct Columns {
    lon: Option<usize>,
    lat: Option<usize>,
    diameter: Option<usize>,
    created: Option<usize>,
    survived: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            lon: find(COL_LONGITUDE),
            lat: find(COL_LATITUDE),
            diameter: find(COL_DIAMETER),
            created: find(COL_CREATED),
            survived: find(COL_SURVIVED),
            id: find(COL_ID),
        }
    }
}

fn cell<'a>(row: &'a csv::StringRecord, col: Option<usize>) -> Option<&'a str> {
    col.and_then(|i| row.get(i))
}

fn number(row: &csv::StringRecord, col: Option<usize>) -> f64 {
    cell(row, col).map(coerce_number).unwrap_or(f64::NAN)
}

fn parse_row(row: &csv::StringRecord, cols: Columns, category: Category) -> CraterRecord {
    let survived_time = cell(row, cols.survived)
        .filter(|s| !s.trim().is_empty())
        .map(coerce_number);
    let id = cell(row, cols.id)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    CraterRecord {
        lon: wrap_crater_lon(number(row, cols.lon)),
        lat: number(row, cols.lat),
        diameter: number(row, cols.diameter),
        created: number(row, cols.created),
        survived_time,
        id,
        category,
    }
}

/// Reads a crater table with a header row. Every record is tagged `category`.
pub fn read_crater_table<R: Read>(
    input: R,
    category: Category,
) -> Result<Vec<CraterRecord>, CraterTableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let cols = Columns::from_headers(&headers);

    let mut out = Vec::new();
    for row in reader.records() {
        let row = row?;
        out.push(parse_row(&row, cols, category));
    }
    Ok(out)
}

pub fn parse_crater_table(
    text: &str,
    category: Category,
) -> Result<Vec<CraterRecord>, CraterTableError> {
    read_crater_table(text.as_bytes(), category)
}
