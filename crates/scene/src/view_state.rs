/// Current control state of one map view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub show_survived: bool,
    pub show_erased: bool,
    /// Minimum filter-field value a record needs to be shown.
    pub threshold: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            show_survived: true,
            show_erased: true,
            threshold: 0.0,
        }
    }
}

impl ViewState {
    /// Builds the state from raw control readings. Absent controls fall back
    /// to show-all and a zero threshold; so does an unparseable slider value.
    pub fn from_controls(
        show_survived: Option<bool>,
        show_erased: Option<bool>,
        slider_value: Option<&str>,
    ) -> Self {
        let threshold = slider_value
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
            .unwrap_or(0.0);
        Self {
            show_survived: show_survived.unwrap_or(true),
            show_erased: show_erased.unwrap_or(true),
            threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ViewState;

    #[test]
    fn absent_controls_show_everything() {
        assert_eq!(ViewState::from_controls(None, None, None), ViewState::default());
    }

    #[test]
    fn reads_present_controls() {
        let s = ViewState::from_controls(Some(false), Some(true), Some("12"));
        assert!(!s.show_survived);
        assert!(s.show_erased);
        assert_eq!(s.threshold, 12.0);
    }

    #[test]
    fn garbage_slider_value_is_zero() {
        assert_eq!(ViewState::from_controls(None, None, Some("")).threshold, 0.0);
        assert_eq!(ViewState::from_controls(None, None, Some("NaN")).threshold, 0.0);
    }
}
