// Author: Dustin Pilgrim
// License: MIT
//
// Canvas-wide index of delete affordances. Lets callers enumerate every
// affordance sharing a tag and read the ROI geometry cached on it, without
// holding any ROI handle.

use std::collections::BTreeMap;
use std::rc::Rc;

use roiguard_core::{Point, Position};

use crate::affordance::MarkerStyle;
use crate::ids::{AffordanceId, RoiId};

pub type ActivateFn = Rc<dyn Fn()>;

/// Public, cloneable view of one affordance.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordanceRecord {
    pub id: AffordanceId,
    pub tag: String,
    /// ROI this marker was attached to. Relation only.
    pub roi: RoiId,
    pub anchor: Point,
    pub visible: bool,
    pub style: MarkerStyle,
    metadata: BTreeMap<String, Position>,
}

impl AffordanceRecord {
    pub fn new(id: AffordanceId, tag: &str, roi: RoiId, style: MarkerStyle) -> Self {
        Self {
            id,
            tag: tag.to_string(),
            roi,
            anchor: Point::default(),
            visible: false,
            style,
            metadata: BTreeMap::new(),
        }
    }

    pub fn metadata(&self, key: &str) -> Option<Position> {
        self.metadata.get(key).copied()
    }

    pub fn set_metadata(&mut self, key: &str, value: Position) {
        self.metadata.insert(key.to_string(), value);
    }

    /// Marker hit box, centred on the anchor.
    pub fn hit(&self, p: Point) -> bool {
        let r = self.style.hit_radius;
        (p.x - self.anchor.x).abs() <= r && (p.y - self.anchor.y).abs() <= r
    }
}

struct Entry {
    record: AffordanceRecord,
    on_activate: Option<ActivateFn>,
}

#[derive(Default)]
pub struct AffordanceRegistry {
    entries: BTreeMap<AffordanceId, Entry>,
}

impl AffordanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: AffordanceRecord) {
        self.entries.insert(
            record.id,
            Entry {
                record,
                on_activate: None,
            },
        );
    }

    pub fn set_on_activate(&mut self, id: AffordanceId, f: ActivateFn) -> bool {
        match self.entries.get_mut(&id) {
            Some(e) => {
                e.on_activate = Some(f);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: AffordanceId) -> Option<AffordanceRecord> {
        self.entries.remove(&id).map(|e| e.record)
    }

    pub fn contains(&self, id: AffordanceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: AffordanceId) -> Option<&AffordanceRecord> {
        self.entries.get(&id).map(|e| &e.record)
    }

    pub fn get_mut(&mut self, id: AffordanceId) -> Option<&mut AffordanceRecord> {
        self.entries.get_mut(&id).map(|e| &mut e.record)
    }

    pub fn activation(&self, id: AffordanceId) -> Option<ActivateFn> {
        self.entries.get(&id).and_then(|e| e.on_activate.clone())
    }

    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a AffordanceRecord> + 'a {
        self.entries
            .values()
            .map(|e| &e.record)
            .filter(move |r| r.tag == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, tag: &str) -> AffordanceRecord {
        AffordanceRecord::new(AffordanceId(id), tag, RoiId(id), MarkerStyle::default())
    }

    #[test]
    fn tagged_filters_by_tag() {
        let mut reg = AffordanceRegistry::new();
        reg.insert(record(1, "roi-delete"));
        reg.insert(record(2, "other"));
        reg.insert(record(3, "roi-delete"));

        let ids: Vec<_> = reg.tagged("roi-delete").map(|r| r.id).collect();
        assert_eq!(ids, vec![AffordanceId(1), AffordanceId(3)]);
    }

    #[test]
    fn metadata_survives_until_removal() {
        let mut reg = AffordanceRegistry::new();
        reg.insert(record(7, "roi-delete"));
        let pos = Position::new(1.0, 2.0, 3.0, 4.0);
        reg.get_mut(AffordanceId(7))
            .expect("inserted")
            .set_metadata("roi_position", pos);

        assert_eq!(
            reg.get(AffordanceId(7)).and_then(|r| r.metadata("roi_position")),
            Some(pos)
        );
        let removed = reg.remove(AffordanceId(7)).expect("present");
        assert_eq!(removed.metadata("roi_position"), Some(pos));
        assert!(reg.is_empty());
    }

    #[test]
    fn activation_requires_known_id() {
        let mut reg = AffordanceRegistry::new();
        assert!(!reg.set_on_activate(AffordanceId(1), Rc::new(|| {})));
        reg.insert(record(1, "t"));
        assert!(reg.set_on_activate(AffordanceId(1), Rc::new(|| {})));
        assert!(reg.activation(AffordanceId(1)).is_some());
    }
}
