//! genolens-stats — Cohort-level expression statistics.
//!
//! Pure functions, no I/O. The Firebrowse client feeds (cohort, value)
//! samples through `aggregate` and `classify` to turn raw expression rows
//! into high/low expression calls per cancer type.

pub mod aggregate;
pub mod classify;

pub use aggregate::{aggregate, sample_std, CohortStats};
pub use classify::{classify, CohortSummary, ExpressionClassification};
