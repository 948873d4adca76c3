//! Service layer for the assessment administration backend.
//!
//! Orchestrates the pure domain logic in `aegis-core` over storage ports:
//! task creation and publication fan-out, the evaluation flow with its
//! state guard, reviewer transitions, completion statistics, and the
//! keyword-filtered hierarchy queries. HTTP controllers and the concrete
//! persistence layer sit outside this crate and meet it at [`store`]'s
//! traits.

pub mod assessment_service;
pub mod dto;
pub mod error;
pub mod hierarchy_service;
pub mod store;

pub use assessment_service::AssessmentService;
pub use error::{ServiceError, ServiceResult};
pub use hierarchy_service::HierarchyService;
