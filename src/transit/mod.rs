//! Transit domain objects
//!
//! Agencies and lines, the ordered collections that hold saved objects, and
//! the selection registry recording which object is being edited. All of it
//! is owned by the app and handed to views explicitly.

mod collection;
mod entities;
mod selection;

pub use collection::{AgencyCollection, CollectionManager, LineCollection};
pub use entities::{Agency, AgencyAttributes, Line, LineAttributes, ObjectId, TransitObject};
pub use selection::{SelectedObject, SelectedObjects};
