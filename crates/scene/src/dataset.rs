use formats::{Category, CraterRecord};
use layers::markers::RecordRef;

use crate::config::FilterField;
use crate::view_state::ViewState;

/// Survived and erased crater sequences, loaded once and read by every redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    survived: Vec<CraterRecord>,
    erased: Vec<CraterRecord>,
}

impl Dataset {
    pub fn new(survived: Vec<CraterRecord>, erased: Vec<CraterRecord>) -> Self {
        Self { survived, erased }
    }

    pub fn survived(&self) -> &[CraterRecord] {
        &self.survived
    }

    pub fn erased(&self) -> &[CraterRecord] {
        &self.erased
    }

    pub fn records(&self, category: Category) -> &[CraterRecord] {
        match category {
            Category::Survived => &self.survived,
            Category::Erased => &self.erased,
        }
    }

    pub fn get(&self, r: RecordRef) -> Option<&CraterRecord> {
        self.records(r.category).get(r.index)
    }

    pub fn len(&self) -> usize {
        self.survived.len() + self.erased.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ceiling of the largest `field` value across both sequences.
    ///
    /// NaN values are skipped; `fallback` is used when nothing finite remains.
    pub fn slider_bound(&self, field: FilterField, fallback: f64) -> f64 {
        self.survived
            .iter()
            .chain(&self.erased)
            .map(|r| field.value(r))
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            .map(f64::ceil)
            .unwrap_or(fallback)
    }

    /// Records passing the current filter: matching survived records first,
    /// then matching erased records, each in their original order.
    pub fn filtered(&self, field: FilterField, state: &ViewState) -> Vec<RecordRef> {
        let mut out = Vec::new();
        for (category, shown) in [
            (Category::Survived, state.show_survived),
            (Category::Erased, state.show_erased),
        ] {
            if !shown {
                continue;
            }
            out.extend(
                self.records(category)
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| field.value(r) >= state.threshold)
                    .map(|(index, _)| RecordRef { category, index }),
            );
        }
        out
    }
}
