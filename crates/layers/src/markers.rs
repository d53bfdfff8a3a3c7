use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use foundation::math::Vec2;
use formats::{Category, CraterRecord};

/// Stable identity of a rendered crater marker.
///
/// `{category}:{id}` when the record has an explicit id, otherwise
/// `{category}:{lon},{lat},{diameter}`; repeated keys within one redraw get a
/// `#n` suffix so every filtered record owns exactly one marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerKey(String);

impl MarkerKey {
    pub fn base(record: &CraterRecord) -> String {
        match &record.id {
            Some(id) => format!("{}:{id}", record.category),
            None => format!(
                "{}:{},{},{}",
                record.category, record.lon, record.lat, record.diameter
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MarkerKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out keys for one redraw pass, numbering repeated base keys.
#[derive(Debug, Default)]
pub struct KeyAllocator {
    seen: HashMap<String, u32>,
}

impl KeyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_for(&mut self, record: &CraterRecord) -> MarkerKey {
        let base = MarkerKey::base(record);
        let n = self.seen.entry(base.clone()).or_insert(0);
        let key = if *n == 0 {
            MarkerKey(base)
        } else {
            MarkerKey(format!("{base}#{n}"))
        };
        *n += 1;
        key
    }
}

/// Position of a record inside its dataset sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RecordRef {
    pub category: Category,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: MarkerKey,
    pub record: RecordRef,
    pub center: Vec2,
    pub radius: f64,
}

impl Marker {
    pub fn class_name(&self) -> &'static str {
        self.record.category.class_name()
    }
}

/// Outcome of binding a new marker sequence to the layer.
///
/// `enter` and `update` follow the new sequence order; `exit` follows the
/// previous order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarkerJoin {
    pub enter: Vec<MarkerKey>,
    pub update: Vec<MarkerKey>,
    pub exit: Vec<MarkerKey>,
}

impl MarkerJoin {
    pub fn is_noop(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Keyed set of crater markers, reconciled against each filtered sequence.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    index: HashMap<MarkerKey, usize>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Looks a marker up by its key string (e.g. a DOM `data-key`).
    pub fn get(&self, key: &str) -> Option<&Marker> {
        self.index.get(key).and_then(|&i| self.markers.get(i))
    }

    /// Replaces the marker set with `next`, reporting which keys were
    /// created, kept or dropped.
    pub fn join(&mut self, next: Vec<Marker>) -> MarkerJoin {
        let next_keys: HashSet<&MarkerKey> = next.iter().map(|m| &m.key).collect();

        let exit: Vec<MarkerKey> = self
            .markers
            .iter()
            .filter(|m| !next_keys.contains(&m.key))
            .map(|m| m.key.clone())
            .collect();

        let mut join = MarkerJoin {
            exit,
            ..MarkerJoin::default()
        };
        for m in &next {
            if self.index.contains_key(&m.key) {
                join.update.push(m.key.clone());
            } else {
                join.enter.push(m.key.clone());
            }
        }

        self.index = next
            .iter()
            .enumerate()
            .map(|(i, m)| (m.key.clone(), i))
            .collect();
        self.markers = next;
        join
    }

    pub fn clear(&mut self) -> MarkerJoin {
        self.join(Vec::new())
    }
}
