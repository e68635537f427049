use crate::domain::{
    error::DomainError,
    names::{ProjectName, SolutionName},
    plan::ScaffoldPlan,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_solution_name(raw: &str) -> Result<SolutionName, DomainError> {
        SolutionName::new(raw)
    }

    pub fn validate_project_name(raw: &str) -> Result<ProjectName, DomainError> {
        ProjectName::new(raw)
    }

    pub fn validate_plan(plan: &ScaffoldPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}
