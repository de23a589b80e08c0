//! Outbound ports and their adapters

mod adapters;
mod outbound;

pub use outbound::*;
