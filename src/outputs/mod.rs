//! Output generation for run results.
//!
//! - [`json`]: writes the [`crate::models::RunReport`] for a run next to
//!   the downloaded images

pub mod json;
