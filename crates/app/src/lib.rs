//! # notigate-app
//!
//! Application layer — the selection engines and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StateLookup` / `StateStore` — read and feed live state readings
//!   - `Dispatcher` — forward a notification to a downstream service
//!   - `EventPublisher` — publish domain events
//! - Implement the **selection engines** as pure functions:
//!   - `engine::evaluator` — one condition against one state reading
//!   - `engine::matcher` — match-mode combination across a target's conditions
//!   - `engine::router` — priority walk, first match wins, else fallback
//!   - `engine::smart` — fixed PC/phone topology under a selection policy
//! - Provide the **dispatch layer** (`NotifyService`) and the route-tracking
//!   read model (`RouteTracker`)
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `notigate-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod engine;
pub mod event_bus;
pub mod ports;
pub mod services;
