//! Location resolution and per-category depot aggregation.
//!
//! Every collaborator is injected as an `Arc<dyn …>` port from
//! `nbdepots-core`; this crate performs no I/O of its own.

mod budget;

pub mod aggregator;
pub mod envelope;
pub mod resolver;
pub mod settings;

pub use aggregator::{
    geocode_query_for_address, DepotAggregator, DepotQuery, DepotSearch, PaintMode, Sources,
};
pub use envelope::{DepotJson, Envelope};
pub use resolver::LocationResolver;
pub use settings::LocatorSettings;
