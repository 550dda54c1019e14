//! `Interlinear` - word-for-word alignment of Strong's-tagged Bible editions.
//!
//! Raw verse text from an original-language edition and a translation is
//! segmented into verses, split into concordance-annotated tokens and aligned
//! so each original word group sits above the translated words sharing its
//! Strong's number.

pub mod concordance;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod error;
pub mod interlinear;
pub mod render;
pub mod services;
pub mod types;
