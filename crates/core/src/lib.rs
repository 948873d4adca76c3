//! Domain core for the assessment administration backend.
//!
//! Pure, synchronous logic with no I/O: hierarchical tree reconstruction
//! over flat parent-linked records, assessment scoring against frozen rule
//! trees, grade derivation, and task-detail statistics. Persistence and
//! transport live in outer layers and reach this crate only through plain
//! data.

pub mod assessment;
pub mod error;
pub mod hierarchy;
pub mod org;
pub mod scoring;
pub mod statistics;
pub mod types;
