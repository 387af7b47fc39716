//! The append-only annotation store and its record format.

mod normalize;
mod record;
mod store;

pub use normalize::{normalize_link, EMPTY_LINK, WIKIPEDIA_BASE};
pub use record::LinkAnnotation;
pub use store::LinkAnnotations;
