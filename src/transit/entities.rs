//! Agency and line entities

use serde::{Deserialize, Serialize};

use super::CollectionManager;

pub type ObjectId = u64;

/// Shared surface of objects stored in a [`super::Collection`]
pub trait TransitObject {
    fn id(&self) -> ObjectId;
    fn color(&self) -> &str;
    fn is_new(&self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencyAttributes {
    pub color: String,
    #[serde(default)]
    pub acronym: String,
    #[serde(default)]
    pub name: String,
}

impl AgencyAttributes {
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Default::default()
        }
    }
}

/// Transit operator
#[derive(Debug, Clone, PartialEq)]
pub struct Agency {
    id: ObjectId,
    attributes: AgencyAttributes,
    is_new: bool,
    editing: bool,
}

impl Agency {
    /// Build an agency; the manager hands out its id
    pub fn new(attributes: AgencyAttributes, is_new: bool, manager: &mut CollectionManager) -> Self {
        Self {
            id: manager.next_id(),
            attributes,
            is_new,
            editing: false,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut AgencyAttributes {
        &mut self.attributes
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    /// Leave edit mode after a save; the object is no longer new
    pub(crate) fn mark_saved(&mut self) {
        self.editing = false;
        self.is_new = false;
    }

    /// Acronym, then name, then the id
    pub fn label(&self) -> String {
        if !self.attributes.acronym.is_empty() {
            self.attributes.acronym.clone()
        } else if !self.attributes.name.is_empty() {
            self.attributes.name.clone()
        } else {
            format!("#{}", self.id)
        }
    }
}

impl TransitObject for Agency {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn color(&self) -> &str {
        &self.attributes.color
    }

    fn is_new(&self) -> bool {
        self.is_new
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineAttributes {
    pub color: String,
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub longname: String,
    #[serde(default)]
    pub agency_id: Option<ObjectId>,
}

impl LineAttributes {
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Default::default()
        }
    }
}

/// Route operated by an agency
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: ObjectId,
    attributes: LineAttributes,
    is_new: bool,
    editing: bool,
}

impl Line {
    pub fn new(attributes: LineAttributes, is_new: bool, manager: &mut CollectionManager) -> Self {
        Self {
            id: manager.next_id(),
            attributes,
            is_new,
            editing: false,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut LineAttributes {
        &mut self.attributes
    }

    pub fn agency_id(&self) -> Option<ObjectId> {
        self.attributes.agency_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.editing = false;
        self.is_new = false;
    }

    pub fn label(&self) -> String {
        match (
            self.attributes.shortname.is_empty(),
            self.attributes.longname.is_empty(),
        ) {
            (false, false) => format!("{} {}", self.attributes.shortname, self.attributes.longname),
            (false, true) => self.attributes.shortname.clone(),
            (true, false) => self.attributes.longname.clone(),
            (true, true) => format!("#{}", self.id),
        }
    }
}

impl TransitObject for Line {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn color(&self) -> &str {
        &self.attributes.color
    }

    fn is_new(&self) -> bool {
        self.is_new
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_objects_get_distinct_ids() {
        let mut manager = CollectionManager::default();
        let a = Agency::new(AgencyAttributes::with_color("#0086FF"), true, &mut manager);
        let l = Line::new(LineAttributes::with_color("#0086FF"), true, &mut manager);
        assert_ne!(a.id(), l.id());
        assert!(a.is_new());
        assert!(!a.is_editing());
    }

    #[test]
    fn start_editing_sets_flag() {
        let mut manager = CollectionManager::default();
        let mut agency = Agency::new(AgencyAttributes::default(), true, &mut manager);
        agency.start_editing();
        assert!(agency.is_editing());
        agency.mark_saved();
        assert!(!agency.is_editing());
        assert!(!agency.is_new());
    }

    #[test]
    fn labels_fall_back_to_id() {
        let mut manager = CollectionManager::default();
        let mut agency = Agency::new(AgencyAttributes::default(), false, &mut manager);
        assert_eq!(agency.label(), format!("#{}", agency.id()));
        agency.attributes_mut().name = "Société de transport".into();
        assert_eq!(agency.label(), "Société de transport");
        agency.attributes_mut().acronym = "STM".into();
        assert_eq!(agency.label(), "STM");

        let mut line = Line::new(LineAttributes::default(), false, &mut manager);
        line.attributes_mut().shortname = "24".into();
        assert_eq!(line.label(), "24");
        line.attributes_mut().longname = "Sherbrooke".into();
        assert_eq!(line.label(), "24 Sherbrooke");
    }
}
