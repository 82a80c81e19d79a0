//! Data Transfer Objects for job lifecycle calls
//!
//! Parameter objects passed to the gateway. Optional fields are resolved to
//! their defaults by the gateway, not by the caller.

pub mod job;
