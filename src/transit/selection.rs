//! Selection registry: at most one selected object per kind

use std::collections::HashMap;
use tracing::debug;

use super::{Agency, Line, TransitObject};
use crate::types::ObjectKind;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectedObject {
    Agency(Agency),
    Line(Line),
}

impl SelectedObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SelectedObject::Agency(_) => ObjectKind::Agency,
            SelectedObject::Line(_) => ObjectKind::Line,
        }
    }
}

impl From<Agency> for SelectedObject {
    fn from(agency: Agency) -> Self {
        SelectedObject::Agency(agency)
    }
}

impl From<Line> for SelectedObject {
    fn from(line: Line) -> Self {
        SelectedObject::Line(line)
    }
}

#[derive(Debug, Default)]
pub struct SelectedObjects {
    selected: HashMap<ObjectKind, SelectedObject>,
}

impl SelectedObjects {
    /// Register `object` as the selected object of its kind, replacing any previous one
    pub fn select(&mut self, object: impl Into<SelectedObject>) {
        let object = object.into();
        let kind = object.kind();
        let id = match &object {
            SelectedObject::Agency(a) => a.id(),
            SelectedObject::Line(l) => l.id(),
        };
        debug!(kind = kind.as_str(), id, "Object selected");
        self.selected.insert(kind, object);
    }

    pub fn deselect(&mut self, kind: ObjectKind) -> Option<SelectedObject> {
        let removed = self.selected.remove(&kind);
        if removed.is_some() {
            debug!(kind = kind.as_str(), "Object deselected");
        }
        removed
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_agency(&self) -> Option<&Agency> {
        match self.selected.get(&ObjectKind::Agency) {
            Some(SelectedObject::Agency(agency)) => Some(agency),
            _ => None,
        }
    }

    pub fn selected_line(&self) -> Option<&Line> {
        match self.selected.get(&ObjectKind::Line) {
            Some(SelectedObject::Line(line)) => Some(line),
            _ => None,
        }
    }

    pub fn selected_agency_mut(&mut self) -> Option<&mut Agency> {
        match self.selected.get_mut(&ObjectKind::Agency) {
            Some(SelectedObject::Agency(agency)) => Some(agency),
            _ => None,
        }
    }

    pub fn selected_line_mut(&mut self) -> Option<&mut Line> {
        match self.selected.get_mut(&ObjectKind::Line) {
            Some(SelectedObject::Line(line)) => Some(line),
            _ => None,
        }
    }
}
