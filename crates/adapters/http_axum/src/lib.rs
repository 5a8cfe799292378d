//! # notigate-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **REST JSON API** for programmatic access:
//!   push state readings (`PUT /api/states/{entity}`), trigger sends
//!   (`POST /api/notify`), and inspect the current route (`GET /api/route`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `notigate-app` (for port traits and services) and
//! `notigate-domain` (for types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
