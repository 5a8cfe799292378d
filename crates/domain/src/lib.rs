//! # notigate-domain
//!
//! Pure domain model for the notigate notification router.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **State readings** (live sensor values with a last-changed time)
//! - Define **Conditions** (entity / operator / value predicates)
//! - Define **Targets** (delivery services guarded by a condition set)
//! - Define **Routing configurations** (priority order + fallback)
//! - Define **Smart-selection parameters** (PC/phone topology, freshness
//!   windows, battery and lock gates, selection policy)
//! - Define **Notifications** (the payload forwarded to the chosen target)
//! - Define **Events** (state-change records for the in-process bus)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod condition;
pub mod event;
pub mod notification;
pub mod routing;
pub mod smart;
pub mod state;
pub mod target;
