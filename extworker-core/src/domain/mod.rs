//! Core domain types
//!
//! These types mirror the payloads of the external job REST API and are
//! shared between the REST client (which decodes them) and the runner
//! (which hands them to job handlers).

pub mod job;
pub mod list;
pub mod variable;
