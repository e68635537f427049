//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `layerforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory creation
//!   - `ProjectToolchain`: solution/project creation and wiring
//!   - `ProgressReporter`: step-by-step progress for the driving side
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, NoopProgress, ProgressReporter, ProjectToolchain};

#[cfg(test)]
pub use output::{MockFilesystem, MockProgressReporter, MockProjectToolchain};
