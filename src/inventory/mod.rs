//! Rolling-horizon inventory state.

mod projector;

pub use projector::InventoryProjector;
