use foundation::math::Vec2;
use formats::CraterRecord;
use serde::{Deserialize, Serialize};

/// Tooltip placement relative to the pointer, in pixels.
pub const TOOLTIP_OFFSET: Vec2 = Vec2 { x: 10.0, y: -28.0 };

/// How much of a crater record the hover tooltip shows.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipDetail {
    /// Diameter only.
    DiameterOnly,
    /// Position, diameter, creation and survival timesteps.
    #[default]
    Full,
}

fn fmt_timestep(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

pub fn tooltip_lines(record: &CraterRecord, detail: TooltipDetail) -> Vec<String> {
    let diameter = format!("Diameter: {:.2} km", record.diameter);
    match detail {
        TooltipDetail::DiameterOnly => vec![diameter],
        TooltipDetail::Full => vec![
            format!("Lat: {:.3}, Lon: {:.3}", record.lat, record.lon),
            diameter,
            format!("Created: {}", fmt_timestep(record.created)),
            format!(
                "Survived: {}",
                record
                    .survived_time
                    .map(fmt_timestep)
                    .unwrap_or_else(|| "n/a".to_string())
            ),
        ],
    }
}

/// Tooltip body as HTML (lines separated by `<br>`).
pub fn tooltip_html(record: &CraterRecord, detail: TooltipDetail) -> String {
    tooltip_lines(record, detail).join("<br>")
}
