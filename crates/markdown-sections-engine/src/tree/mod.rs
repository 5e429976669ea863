//! # Section Tree
//!
//! The in-memory model of a heading-structured document.
//!
//! - **`section`**: [`Section`] nodes and their [`SectionId`] handles
//! - **`document`**: [`Document`], the arena that owns every section plus the
//!   flat case-insensitive name index
//! - **`names`**: [`NameStyle`] for stored vs displayed names
//! - **`invariants`**: [`invariants::validate`], run after every mutation
//!
//! ## Key Invariants
//!
//! - Exactly one level-1 root
//! - Every child is exactly one level below its parent
//! - Names are unique across the whole document, ignoring case
//! - Content never contains a heading line outside a code fence

pub mod document;
pub mod invariants;
pub mod names;
pub mod section;

pub use document::{Document, PATH_DELIMITER};
pub use names::NameStyle;
pub use section::{Section, SectionId};
