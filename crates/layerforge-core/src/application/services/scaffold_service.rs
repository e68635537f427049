//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Build and validate a plan for the request
//! 2. Walk the plan, handing each step to the filesystem or toolchain port
//! 3. Stop at the first failure and report which step broke
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, NoopProgress, ProgressReporter, ProjectToolchain},
    },
    domain::{DomainValidator as validator, ProjectKind, ScaffoldPlan, ScaffoldRequest, Step},
    error::{LayerforgeError, LayerforgeResult},
};

/// A reference edge between two concrete projects, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReference {
    pub from: String,
    pub to: String,
}

/// Outcome of a completed scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub solution: String,
    pub solution_dir: PathBuf,
    pub projects: Vec<String>,
    pub references: Vec<ProjectReference>,
    pub steps_completed: usize,
}

impl ScaffoldReport {
    fn from_plan(plan: &ScaffoldPlan, steps_completed: usize) -> Self {
        let references = plan
            .steps()
            .iter()
            .filter_map(|step| match step {
                Step::AddReference { from, to } => Some(ProjectReference {
                    from: from.clone(),
                    to: to.clone(),
                }),
                _ => None,
            })
            .collect();

        Self {
            solution: plan.solution().to_string(),
            solution_dir: plan.solution_dir().to_path_buf(),
            projects: plan.projects().iter().map(|p| p.name.clone()).collect(),
            references,
            steps_completed,
        }
    }
}

/// Main scaffolding service.
///
/// Orchestrates plan execution against the toolchain and filesystem ports.
pub struct ScaffoldService {
    toolchain: Box<dyn ProjectToolchain>,
    filesystem: Box<dyn Filesystem>,
    progress: Box<dyn ProgressReporter>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use layerforge_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     toolchain,  // impl ProjectToolchain
    ///     filesystem, // impl Filesystem
    /// );
    /// ```
    pub fn new(toolchain: Box<dyn ProjectToolchain>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            toolchain,
            filesystem,
            progress: Box::new(NoopProgress),
        }
    }

    /// Replace the progress reporter.
    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Build and validate the plan for a request without executing it.
    pub fn plan(
        request: &ScaffoldRequest,
        output_root: impl AsRef<Path>,
    ) -> LayerforgeResult<ScaffoldPlan> {
        let plan = ScaffoldPlan::build(request, output_root.as_ref());
        validator::validate_plan(&plan)?;
        Ok(plan)
    }

    /// Scaffold a new solution.
    ///
    /// This is the main use case - plans the request, then executes the plan.
    #[instrument(
        skip_all,
        fields(
            request = %request,
            output_root = %output_root.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        request: &ScaffoldRequest,
        output_root: impl AsRef<Path>,
    ) -> LayerforgeResult<ScaffoldReport> {
        let plan = Self::plan(request, output_root)?;
        info!(
            projects = plan.projects().len(),
            references = plan.references().len(),
            "Plan built"
        );
        self.execute(&plan)
    }

    /// Execute a plan step by step.
    ///
    /// The first failing step aborts the run. Steps already carried out are
    /// left in place.
    #[instrument(
        skip_all,
        fields(solution = %plan.solution(), steps = plan.steps().len())
    )]
    pub fn execute(&self, plan: &ScaffoldPlan) -> LayerforgeResult<ScaffoldReport> {
        let total = plan.steps().len();
        let solution_dir = plan.solution_dir();

        for (i, step) in plan.steps().iter().enumerate() {
            let index = i + 1;
            self.progress.step_started(index, total, step);
            debug!(index, total, step = %step, "Running step");

            if let Err(e) = self.apply(solution_dir, step) {
                warn!(index, total, step = %step, error = %e, "Step failed, aborting");
                self.progress.failed(index, total, step);
                return Err(ApplicationError::StepFailed {
                    index,
                    total,
                    step: step.to_string(),
                    reason: reason_of(&e),
                }
                .into());
            }

            self.progress.step_finished(index, total, step);
        }

        let report = ScaffoldReport::from_plan(plan, total);
        self.progress.finished(&report);
        info!(solution_dir = %solution_dir.display(), "Scaffold completed successfully");
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn apply(&self, solution_dir: &Path, step: &Step) -> LayerforgeResult<()> {
        match step {
            Step::CreateDirectory { path } => self.filesystem.create_dir_all(path),
            Step::CreateSolution { name } => self.toolchain.create_solution(solution_dir, name),
            Step::CreateProject { project } => match project.kind {
                ProjectKind::WebApi => self
                    .toolchain
                    .create_web_api_project(solution_dir, &project.name),
                ProjectKind::ClassLibrary => self
                    .toolchain
                    .create_class_library(solution_dir, &project.name),
            },
            Step::AddToSolution { project } => self.toolchain.add_to_solution(solution_dir, project),
            Step::AddReference { from, to } => self.toolchain.add_reference(solution_dir, from, to),
        }
    }
}

/// Error text without the layer prefix of the wrapping error.
fn reason_of(err: &LayerforgeError) -> String {
    match err {
        LayerforgeError::Application(e) => e.to_string(),
        LayerforgeError::Domain(e) => e.to_string(),
        other => other.to_string(),
    }
}
