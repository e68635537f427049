//! Recording toolchain for tests.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use layerforge_core::{
    application::{ApplicationError, ports::ProjectToolchain},
    error::LayerforgeResult,
};

/// A single call made against a [`RecordingToolchain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainCall {
    CreateSolution { dir: PathBuf, name: String },
    CreateWebApi { dir: PathBuf, project: String },
    CreateClassLibrary { dir: PathBuf, project: String },
    AddToSolution { dir: PathBuf, project: String },
    AddReference { dir: PathBuf, from: String, to: String },
}

impl ToolchainCall {
    pub fn dir(&self) -> &Path {
        match self {
            Self::CreateSolution { dir, .. }
            | Self::CreateWebApi { dir, .. }
            | Self::CreateClassLibrary { dir, .. }
            | Self::AddToSolution { dir, .. }
            | Self::AddReference { dir, .. } => dir,
        }
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<ToolchainCall>,
    fail_on: Option<ToolchainCall>,
}

/// Fake toolchain that records every call instead of running a process.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingToolchain {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the given call fail with `CommandFailed`. It is still recorded.
    pub fn failing_on(self, call: ToolchainCall) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.fail_on = Some(call);
        }
        self
    }

    /// Every call, in order.
    pub fn calls(&self) -> Vec<ToolchainCall> {
        self.state
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }

    /// Names of projects created, web API and class libraries alike.
    pub fn created_projects(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ToolchainCall::CreateWebApi { project, .. }
                | ToolchainCall::CreateClassLibrary { project, .. } => Some(project),
                _ => None,
            })
            .collect()
    }

    /// Names of projects added to the solution.
    pub fn solution_entries(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ToolchainCall::AddToSolution { project, .. } => Some(project),
                _ => None,
            })
            .collect()
    }

    /// `(from, to)` pairs, in call order.
    pub fn references(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ToolchainCall::AddReference { from, to, .. } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ToolchainCall) -> LayerforgeResult<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let fail = state.fail_on.as_ref() == Some(&call);
        let description = format!("{call:?}");
        state.calls.push(call);

        if fail {
            return Err(ApplicationError::CommandFailed {
                command: description,
                status: "exit status: 1".into(),
                stderr: "injected failure".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl ProjectToolchain for RecordingToolchain {
    fn create_solution(&self, solution_dir: &Path, name: &str) -> LayerforgeResult<()> {
        self.record(ToolchainCall::CreateSolution {
            dir: solution_dir.to_path_buf(),
            name: name.into(),
        })
    }

    fn create_web_api_project(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()> {
        self.record(ToolchainCall::CreateWebApi {
            dir: solution_dir.to_path_buf(),
            project: project.into(),
        })
    }

    fn create_class_library(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()> {
        self.record(ToolchainCall::CreateClassLibrary {
            dir: solution_dir.to_path_buf(),
            project: project.into(),
        })
    }

    fn add_to_solution(&self, solution_dir: &Path, project: &str) -> LayerforgeResult<()> {
        self.record(ToolchainCall::AddToSolution {
            dir: solution_dir.to_path_buf(),
            project: project.into(),
        })
    }

    fn add_reference(&self, solution_dir: &Path, from: &str, to: &str) -> LayerforgeResult<()> {
        self.record(ToolchainCall::AddReference {
            dir: solution_dir.to_path_buf(),
            from: from.into(),
            to: to.into(),
        })
    }
}
