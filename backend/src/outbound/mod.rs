//! Outbound adapters implementing driven ports.
//!
//! - **persistence**: PostgreSQL repositories and the store probe.

pub mod persistence;
