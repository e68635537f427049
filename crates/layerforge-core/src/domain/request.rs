//! The scaffold request: what the user asked for.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    layer::LayerSet,
    names::{ProjectName, SolutionName},
    validation::DomainValidator,
};

/// A validated request to scaffold a layered solution.
///
/// Both names are validated on construction; a `ScaffoldRequest` can always
/// be turned into a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldRequest {
    solution: SolutionName,
    project: ProjectName,
    include_infrastructure: bool,
    include_persistence: bool,
}

impl ScaffoldRequest {
    pub fn new(
        solution: SolutionName,
        project: ProjectName,
        include_infrastructure: bool,
        include_persistence: bool,
    ) -> Self {
        Self {
            solution,
            project,
            include_infrastructure,
            include_persistence,
        }
    }

    pub fn builder() -> ScaffoldRequestBuilder {
        ScaffoldRequestBuilder::default()
    }

    pub fn solution(&self) -> &SolutionName {
        &self.solution
    }

    pub fn project(&self) -> &ProjectName {
        &self.project
    }

    pub fn include_infrastructure(&self) -> bool {
        self.include_infrastructure
    }

    pub fn include_persistence(&self) -> bool {
        self.include_persistence
    }

    /// Class-library layers this request produces.
    pub fn layers(&self) -> LayerSet {
        LayerSet::new(self.include_infrastructure, self.include_persistence)
    }
}

impl fmt::Display for ScaffoldRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.solution, self.project)?;
        if self.include_infrastructure {
            f.write_str(", +infrastructure")?;
        }
        if self.include_persistence {
            f.write_str(", +persistence")?;
        }
        f.write_str(")")
    }
}

/// Builder accepting raw strings; names are validated in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ScaffoldRequestBuilder {
    solution: Option<String>,
    project: Option<String>,
    include_infrastructure: bool,
    include_persistence: bool,
}

impl ScaffoldRequestBuilder {
    pub fn solution(mut self, name: impl Into<String>) -> Self {
        self.solution = Some(name.into());
        self
    }

    pub fn project(mut self, name: impl Into<String>) -> Self {
        self.project = Some(name.into());
        self
    }

    pub fn infrastructure(mut self, include: bool) -> Self {
        self.include_infrastructure = include;
        self
    }

    pub fn persistence(mut self, include: bool) -> Self {
        self.include_persistence = include;
        self
    }

    pub fn build(self) -> Result<ScaffoldRequest, DomainError> {
        let solution =
            DomainValidator::validate_solution_name(self.solution.as_deref().unwrap_or_default())?;
        let project =
            DomainValidator::validate_project_name(self.project.as_deref().unwrap_or_default())?;
        Ok(ScaffoldRequest::new(
            solution,
            project,
            self.include_infrastructure,
            self.include_persistence,
        ))
    }
}
