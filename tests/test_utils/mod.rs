pub mod collector;

pub mod fixtures;

pub use collector::{CollectorEvent, LineCollector};
