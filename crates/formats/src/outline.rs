use foundation::math::GeoPoint;
use serde_json::Value;

/// Region outline rings, already in the crater-table longitude convention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub rings: Vec<Vec<GeoPoint>>,
}

#[derive(Debug)]
pub enum OutlineError {
    Json(serde_json::Error),
    NotGeoJson,
    InvalidGeometry { index: usize, reason: String },
}

impl std::fmt::Display for OutlineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutlineError::Json(e) => write!(f, "outline JSON parse error: {e}"),
            OutlineError::NotGeoJson => write!(f, "expected a GeoJSON object"),
            OutlineError::InvalidGeometry { index, reason } => {
                write!(f, "invalid outline geometry at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for OutlineError {}

impl Outline {
    pub fn from_geojson_str(payload: &str) -> Result<Self, OutlineError> {
        let value: Value = serde_json::from_str(payload).map_err(OutlineError::Json)?;
        Self::from_geojson_value(&value)
    }

    /// Accepts a FeatureCollection, a single Feature or a bare geometry.
    /// Points are ignored; lines and polygon rings become outline rings.
    pub fn from_geojson_value(value: &Value) -> Result<Self, OutlineError> {
        let obj = value.as_object().ok_or(OutlineError::NotGeoJson)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(OutlineError::NotGeoJson)?;

        let mut rings = Vec::new();
        match ty {
            "FeatureCollection" => {
                let features = obj
                    .get("features")
                    .and_then(|v| v.as_array())
                    .ok_or(OutlineError::NotGeoJson)?;
                for (index, feature) in features.iter().enumerate() {
                    collect_feature(feature, &mut rings)
                        .map_err(|reason| OutlineError::InvalidGeometry { index, reason })?;
                }
            }
            "Feature" => collect_feature(value, &mut rings)
                .map_err(|reason| OutlineError::InvalidGeometry { index: 0, reason })?,
            _ => collect_geometry(value, &mut rings)
                .map_err(|reason| OutlineError::InvalidGeometry { index: 0, reason })?,
        }

        for ring in &mut rings {
            for p in ring.iter_mut() {
                *p = p.with_crater_lon();
            }
        }
        Ok(Self { rings })
    }

    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|r| r.is_empty())
    }
}

fn collect_feature(value: &Value, rings: &mut Vec<Vec<GeoPoint>>) -> Result<(), String> {
    let obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;
    match obj.get("geometry") {
        // GeoJSON allows features without geometry.
        None | Some(Value::Null) => Ok(()),
        Some(geom) => collect_geometry(geom, rings),
    }
}

fn collect_geometry(value: &Value, rings: &mut Vec<Vec<GeoPoint>>) -> Result<(), String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    if ty == "GeometryCollection" {
        let geoms = obj
            .get("geometries")
            .and_then(|v| v.as_array())
            .ok_or("GeometryCollection missing geometries".to_string())?;
        for g in geoms {
            collect_geometry(g, rings)?;
        }
        return Ok(());
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" | "MultiPoint" => {}
        "LineString" => rings.push(parse_points(coords)?),
        "MultiLineString" | "Polygon" => rings.extend(parse_rings(coords)?),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
            for poly in polys {
                rings.extend(parse_rings(poly)?);
            }
        }
        other => return Err(format!("unsupported geometry type: {other}")),
    }
    Ok(())
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn parse_points(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    arr.iter().map(parse_point).collect()
}

fn parse_rings(coords: &Value) -> Result<Vec<Vec<GeoPoint>>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array of rings".to_string())?;
    arr.iter().map(parse_points).collect()
}
