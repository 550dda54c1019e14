//! Service modules around the alignment core.
//!
//! Retrieval of raw corpus text and the orchestration of a full testament pass.

pub mod pass;
pub mod retrieval;
