pub mod fields;
pub mod listing;
pub mod model;

pub use listing::{ListingService, UpdateMode};
