//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the selection/dispatch layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod dispatcher;
pub mod event_bus;
pub mod state_lookup;

pub use dispatcher::Dispatcher;
pub use event_bus::EventPublisher;
pub use state_lookup::{StateLookup, StateStore};
