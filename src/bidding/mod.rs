pub mod commands;
pub mod locks;

pub use commands::{BidProcessor, PlaceBidCommand};
