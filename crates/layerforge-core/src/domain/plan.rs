//! Scaffold plan: the full, ordered list of effects for one request.
//!
//! Building a plan is pure. The application layer walks `steps()` and hands
//! each one to a port; nothing here touches the filesystem or a process.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    layer::{Layer, LayerSet, ProjectKind},
    names::SolutionName,
    request::ScaffoldRequest,
};

// ── Project ───────────────────────────────────────────────────────────────────

/// A project inside the solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub layer: Layer,
    pub name: String,
    pub kind: ProjectKind,
}

impl Project {
    pub fn new(base: &str, layer: Layer) -> Self {
        Self {
            layer,
            name: layer.project_name(base),
            kind: layer.project_kind(),
        }
    }

    /// Directory the project lives in, under the solution directory.
    pub fn directory(&self, solution_dir: &Path) -> PathBuf {
        solution_dir.join(&self.name)
    }
}

// ── References ────────────────────────────────────────────────────────────────

/// Compile-time dependency edge between two layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Reference {
    pub from: Layer,
    pub to: Layer,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Insertion-ordered set of references.
///
/// Re-inserting an existing edge is a no-op, so each `(from, to)` pair is
/// requested from the toolchain at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferencePlan(Vec<Reference>);

impl ReferencePlan {
    /// Wire the fixed layered convention for the given class-library layers.
    ///
    /// Api sits on top of every other present layer; outer layers depend on
    /// Application; Application depends on Domain; Domain depends on nothing.
    pub fn for_layers(layers: &LayerSet) -> Self {
        let mut plan = Self::default();

        if layers.contains(Layer::Persistence) {
            plan.insert(Layer::Api, Layer::Persistence);
        }
        if layers.contains(Layer::Infrastructure) {
            plan.insert(Layer::Api, Layer::Infrastructure);
        }
        if layers.contains(Layer::Application) {
            plan.insert(Layer::Api, Layer::Application);
            for outer in [Layer::Persistence, Layer::Infrastructure] {
                if layers.contains(outer) {
                    plan.insert(outer, Layer::Application);
                }
            }
            plan.insert(Layer::Application, Layer::Domain);
        }

        plan
    }

    /// Add an edge. Returns `false` if it was already present.
    pub fn insert(&mut self, from: Layer, to: Layer) -> bool {
        let reference = Reference { from, to };
        if self.0.contains(&reference) {
            return false;
        }
        self.0.push(reference);
        true
    }

    pub fn contains(&self, from: Layer, to: Layer) -> bool {
        self.0.contains(&Reference { from, to })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// References leaving `layer`.
    pub fn outgoing(&self, layer: Layer) -> impl Iterator<Item = &Reference> {
        self.0.iter().filter(move |r| r.from == layer)
    }
}

// ── Steps ─────────────────────────────────────────────────────────────────────

/// One externally visible effect of a scaffold run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    CreateDirectory { path: PathBuf },
    CreateSolution { name: String },
    CreateProject { project: Project },
    AddToSolution { project: String },
    AddReference { from: String, to: String },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDirectory { path } => write!(f, "create directory {}", path.display()),
            Self::CreateSolution { name } => write!(f, "create solution {name}"),
            Self::CreateProject { project } => {
                write!(f, "create {} project {}", project.kind, project.name)
            }
            Self::AddToSolution { project } => write!(f, "add {project} to solution"),
            Self::AddReference { from, to } => write!(f, "add reference {from} -> {to}"),
        }
    }
}

// ── ScaffoldPlan ──────────────────────────────────────────────────────────────

/// Everything a scaffold run will do, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldPlan {
    solution: SolutionName,
    solution_dir: PathBuf,
    projects: Vec<Project>,
    references: ReferencePlan,
    steps: Vec<Step>,
}

impl ScaffoldPlan {
    /// Build the plan for `request`, rooted at `output_root/<solution>`.
    pub fn build(request: &ScaffoldRequest, output_root: &Path) -> Self {
        let base = request.project().as_str();
        let solution_dir = output_root.join(request.solution().as_str());
        let layers = request.layers();

        let projects: Vec<Project> = std::iter::once(Layer::Api)
            .chain(layers.iter())
            .map(|layer| Project::new(base, layer))
            .collect();
        let references = ReferencePlan::for_layers(&layers);

        let mut steps = vec![
            Step::CreateDirectory {
                path: solution_dir.clone(),
            },
            Step::CreateSolution {
                name: request.solution().to_string(),
            },
        ];

        for project in &projects {
            steps.push(Step::CreateDirectory {
                path: project.directory(&solution_dir),
            });
            steps.push(Step::CreateProject {
                project: project.clone(),
            });
            steps.push(Step::AddToSolution {
                project: project.name.clone(),
            });
        }

        steps.extend(references.iter().map(|r| Step::AddReference {
            from: r.from.project_name(base),
            to: r.to.project_name(base),
        }));

        Self {
            solution: request.solution().clone(),
            solution_dir,
            projects,
            references,
            steps,
        }
    }

    /// Check the reference graph against the layering rules.
    pub fn validate(&self) -> Result<(), DomainError> {
        let present = |layer: Layer| self.projects.iter().any(|p| p.layer == layer);

        for reference in self.references.iter() {
            if reference.from == reference.to {
                return Err(DomainError::SelfReference {
                    layer: reference.from.to_string(),
                });
            }
            if reference.from == Layer::Domain {
                return Err(DomainError::DomainHasReferences {
                    to: reference.to.to_string(),
                });
            }
            if !present(reference.from) || !present(reference.to) {
                return Err(DomainError::DanglingReference {
                    from: reference.from.to_string(),
                    to: reference.to.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn solution(&self) -> &SolutionName {
        &self.solution
    }

    pub fn solution_dir(&self) -> &Path {
        &self.solution_dir
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn references(&self) -> &ReferencePlan {
        &self.references
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[cfg(test)]
    pub(crate) fn references_mut(&mut self) -> &mut ReferencePlan {
        &mut self.references
    }
}
