//! # wirelessmesh-app
//!
//! Application layer: the runtime that hosts location aggregates, plus the
//! **port definitions** (traits) it drives.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `EventStore`: append-only, per-location sequenced event log
//!   - `PublishPort`: fire-and-forget publication of recorded events
//!   - `DeviceControlPort`: physical device calls (nightlight toggle)
//! - Run the command cycle for each location, one command at a time:
//!   decide → persist → evolve → dispatch side effects (`LocationService`)
//! - Execute side effects after persistence without letting their failures
//!   reach the caller (`SideEffectDispatcher`)
//! - Provide **in-process infrastructure** (event bus, publisher fan-out)
//!   that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `wirelessmesh-domain` only (plus `tokio::sync` for locks and
//! channels). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod dispatcher;
pub mod event_bus;
pub mod ports;
pub mod publisher;
pub mod services;
