//! External Worker Core
//!
//! Core types for the external worker runtime.
//!
//! This crate contains:
//! - Domain types: jobs, variables and paged list results as the
//!   external job REST API returns them
//! - DTOs: parameter objects for the job lifecycle calls (acquire,
//!   complete, fail, BPMN error, CMMN terminate)

pub mod domain;
pub mod dto;
