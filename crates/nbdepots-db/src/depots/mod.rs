//! Database operations for the `oil_depots` table.

mod read;
mod types;
mod write;

pub use read::find_oil_depot;
pub use types::OilDepotRow;
pub use write::insert_oil_depot;
