//! # wirelessmesh-domain
//!
//! Pure domain model for a customer location and its wireless mesh devices,
//! modelled as an event-sourced aggregate.
//!
//! ## Responsibilities
//! - Foundational types: validated identifiers, error taxonomy
//! - Define the **aggregate state** ([`location::Location`] and its devices)
//! - Define **commands** (intents) and **events** (recorded facts)
//! - [`decide`](decide::decide): validate a command against the current state
//!   and produce the event it implies, or a [`Rejection`](error::Rejection)
//! - [`evolve`](evolve::evolve): apply an event to the state; the same
//!   function drives replay from the log and live mutation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod command;
pub mod decide;
pub mod event;
pub mod evolve;
pub mod location;
