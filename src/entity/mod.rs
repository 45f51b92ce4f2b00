//! # Bicycle Entity
//!
//! The single entity type of the catalog together with its identifier and
//! stored (versioned) form.

mod fahrrad;
mod id;

pub use fahrrad::{Fahrrad, FahrradDocument, FahrradKind};
pub use id::{FahrradId, InvalidFahrradId};
