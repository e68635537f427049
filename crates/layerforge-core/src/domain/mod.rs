//! Domain layer: pure scaffolding rules.
//!
//! Nothing in here performs I/O. The domain decides *what* a layered
//! solution looks like (names, layers, projects, references, and the order of
//! steps); the application layer decides *how* to carry it out through ports.

pub mod error;
pub mod layer;
pub mod names;
pub mod plan;
pub mod request;
pub mod validation;

pub use error::{DomainError, ErrorCategory};
pub use layer::{Layer, LayerSet, ProjectKind};
pub use names::{MAX_NAME_LEN, ProjectName, SolutionName};
pub use plan::{Project, Reference, ReferencePlan, ScaffoldPlan, Step};
pub use request::{ScaffoldRequest, ScaffoldRequestBuilder};
pub use validation::DomainValidator;
