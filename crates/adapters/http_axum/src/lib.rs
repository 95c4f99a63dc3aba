//! # wirelessmesh-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** mapping each location command and query to a
//!   route under `/api/locations`
//! - Stream published events to clients over SSE (`/api/events/stream`)
//! - Map application results and rejections into HTTP responses
//!
//! ## Dependency rule
//! Depends on `wirelessmesh-app` (for port traits and services) and
//! `wirelessmesh-domain` (for domain types used in request/response
//! mapping). Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
