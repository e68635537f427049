//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a layered solution".

pub mod scaffold_service;

pub use scaffold_service::{ProjectReference, ScaffoldReport, ScaffoldService};
