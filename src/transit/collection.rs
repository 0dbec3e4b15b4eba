//! Ordered collections of saved objects

use tracing::debug;

use super::{Agency, Line, ObjectId, TransitObject};

/// Saved objects in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    features: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { features: Vec::new() }
    }
}

impl<T: TransitObject> Collection<T> {
    pub fn features(&self) -> &[T] {
        &self.features
    }

    pub fn size(&self) -> usize {
        self.features.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.features.iter().find(|f| f.id() == id)
    }

    /// Replace the object with the same id in place, or append it
    pub fn upsert(&mut self, feature: T) {
        match self.features.iter_mut().find(|f| f.id() == feature.id()) {
            Some(existing) => *existing = feature,
            None => self.features.push(feature),
        }
    }
}

pub type AgencyCollection = Collection<Agency>;
pub type LineCollection = Collection<Line>;

impl LineCollection {
    pub fn count_for_agency(&self, agency_id: ObjectId) -> usize {
        self.features
            .iter()
            .filter(|l| l.agency_id() == Some(agency_id))
            .count()
    }
}

/// Owner of the agency and line collections; also hands out object ids
#[derive(Debug, Default)]
pub struct CollectionManager {
    agencies: AgencyCollection,
    lines: LineCollection,
    last_id: ObjectId,
}

impl CollectionManager {
    pub(crate) fn next_id(&mut self) -> ObjectId {
        self.last_id += 1;
        self.last_id
    }

    pub fn agencies(&self) -> &AgencyCollection {
        &self.agencies
    }

    pub fn lines(&self) -> &LineCollection {
        &self.lines
    }

    pub fn save_agency(&mut self, mut agency: Agency) {
        agency.mark_saved();
        debug!(id = agency.id(), label = %agency.label(), "Agency saved");
        self.agencies.upsert(agency);
    }

    pub fn save_line(&mut self, mut line: Line) {
        line.mark_saved();
        debug!(id = line.id(), agency_id = ?line.agency_id(), "Line saved");
        self.lines.upsert(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transit::{AgencyAttributes, LineAttributes};

    #[test]
    fn upsert_keeps_insertion_order() {
        let mut manager = CollectionManager::default();
        let a = Agency::new(AgencyAttributes::with_color("#111111"), true, &mut manager);
        let b = Agency::new(AgencyAttributes::with_color("#222222"), true, &mut manager);
        let (a_id, b_id) = (a.id(), b.id());
        manager.save_agency(a);
        manager.save_agency(b);

        let mut edited = manager.agencies().get(a_id).cloned().unwrap();
        edited.attributes_mut().acronym = "AAA".into();
        manager.save_agency(edited);

        let ids: Vec<_> = manager.agencies().features().iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec![a_id, b_id]);
        assert_eq!(manager.agencies().size(), 2);
        assert_eq!(manager.agencies().get(a_id).unwrap().label(), "AAA");
    }

    #[test]
    fn saved_objects_are_not_new() {
        let mut manager = CollectionManager::default();
        let mut line = Line::new(LineAttributes::with_color("#0086FF"), true, &mut manager);
        line.start_editing();
        let id = line.id();
        manager.save_line(line);
        let saved = manager.lines().get(id).unwrap();
        assert!(!saved.is_new());
        assert!(!saved.is_editing());
    }

    #[test]
    fn count_lines_per_agency() {
        let mut manager = CollectionManager::default();
        let agency = Agency::new(AgencyAttributes::default(), true, &mut manager);
        let agency_id = agency.id();
        manager.save_agency(agency);
        for agency_id in [Some(agency_id), Some(agency_id), None] {
            let attributes = LineAttributes {
                agency_id,
                ..Default::default()
            };
            let line = Line::new(attributes, true, &mut manager);
            manager.save_line(line);
        }
        assert_eq!(manager.lines().count_for_agency(agency_id), 2);
    }
}
