//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `layerforge-adapters` crate provides implementations.

use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::application::services::ScaffoldReport;
use crate::domain::Step;
use crate::error::LayerforgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `layerforge_adapters::filesystem::LocalFilesystem` (production)
/// - `layerforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    ///
    /// Must succeed when the directory already exists.
    fn create_dir_all(&self, path: &Path) -> LayerforgeResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for the external project toolchain (e.g. the `dotnet` CLI).
///
/// Every call names the solution directory explicitly; implementations must
/// not depend on the process working directory. Project arguments are full
/// project names (`Shop.Api`); mapping them to manifest files is the
/// toolchain's business.
///
/// Implemented by:
/// - `layerforge_adapters::toolchain::DotnetToolchain` (production)
/// - `layerforge_adapters::toolchain::RecordingToolchain` (testing)
#[cfg_attr(test, automock)]
pub trait ProjectToolchain: Send + Sync {
    /// Create an empty solution named `name` inside `solution_dir`.
    fn create_solution(&self, solution_dir: &Path, name: &str) -> LayerforgeResult<()>;

    /// Create a web-API project in `solution_dir/<project>`.
    fn create_web_api_project(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()>;

    /// Create a class-library project in `solution_dir/<project>`.
    fn create_class_library(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()>;

    /// Register an existing project with the solution.
    fn add_to_solution(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()>;

    /// Declare that `from` depends on `to`.
    fn add_reference(&self, solution_dir: &Path, from: &str, to: &str) -> LayerforgeResult<()>;
}

/// Port for reporting progress while a plan executes.
///
/// Indices are 1-based.
#[cfg_attr(test, automock)]
pub trait ProgressReporter: Send + Sync {
    fn step_started(&self, index: usize, total: usize, step: &Step);

    fn step_finished(&self, index: usize, total: usize, step: &Step);

    /// Called once after the last step succeeded.
    fn finished(&self, report: &ScaffoldReport);

    /// Called once when a step failed and the run is aborted.
    fn failed(&self, index: usize, total: usize, step: &Step);
}

/// Reporter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn step_started(&self, _index: usize, _total: usize, _step: &Step) {}

    fn step_finished(&self, _index: usize, _total: usize, _step: &Step) {}

    fn finished(&self, _report: &ScaffoldReport) {}

    fn failed(&self, _index: usize, _total: usize, _step: &Step) {}
}
