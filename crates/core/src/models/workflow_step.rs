//! Bike-resale workflow step records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::validation::{Entity, ValidationError};

/// Workflow type string the server uses for the retrospec resale flow.
pub const WORKFLOW_BIKE_SALES: &str = "bike_sales";

/// Named steps of the bike-resale workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepName {
    BikeSpec,
    Build,
    Creation,
    Reservation,
    Checkout,
}

impl StepName {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            "BikeSpec" => Ok(Self::BikeSpec),
            "Build" => Ok(Self::Build),
            "Creation" => Ok(Self::Creation),
            "Reservation" => Ok(Self::Reservation),
            "Checkout" => Ok(Self::Checkout),
            _ => Err(CoreError::Validation(format!(
                "Invalid step name '{s}'. Must be one of: BikeSpec, Build, Creation, Reservation, Checkout"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BikeSpec => "BikeSpec",
            Self::Build => "Build",
            Self::Creation => "Creation",
            Self::Reservation => "Reservation",
            Self::Checkout => "Checkout",
        }
    }

    /// Human-readable label for the step.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BikeSpec => "Bike Specification",
            Self::Build => "Build",
            Self::Creation => "Safety Check",
            Self::Reservation => "Reservation",
            Self::Checkout => "Checkout",
        }
    }
}

impl std::fmt::Display for StepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StepName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_value(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub step_id: Uuid,
    /// UUID of the owning transaction (not its sequence number).
    pub transaction_id: Uuid,
    pub workflow_type: String,
    pub step_name: StepName,
    pub step_order: i32,
    pub is_completed: bool,
    pub completed_by: Option<Uuid>,
    pub completed_at: Option<Timestamp>,
    pub created_by: Option<Uuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for WorkflowStep {
    const NAME: &'static str = "workflow step";
}

/// Server-computed progress for a transaction's workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowProgress {
    pub total_steps: i64,
    pub completed_steps: i64,
    pub progress_percentage: f64,
    pub current_step: Option<StepName>,
    pub steps: Vec<WorkflowStep>,
}

impl Entity for WorkflowProgress {
    const NAME: &'static str = "workflow progress";

    fn check(&self) -> Result<(), ValidationError> {
        if self.completed_steps > self.total_steps {
            return Err(ValidationError::field(
                Self::NAME,
                "completed_steps",
                "exceeds total_steps",
            ));
        }
        self.steps.iter().try_for_each(|step| step.check())
    }
}

/// Body for the step complete endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StepCompletion {
    pub completed_by: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_name_roundtrip() {
        for name in [
            StepName::BikeSpec,
            StepName::Build,
            StepName::Creation,
            StepName::Reservation,
            StepName::Checkout,
        ] {
            assert_eq!(StepName::from_str_value(name.as_str()).unwrap(), name);
        }
    }

    #[test]
    fn step_name_invalid() {
        assert!(StepName::from_str_value("Painting").is_err());
        assert!("build".parse::<StepName>().is_err());
    }

    #[test]
    fn completed_step_without_timestamp_decodes() {
        let step: WorkflowStep = crate::validation::decode(serde_json::json!({
            "step_id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "transaction_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "workflow_type": "bike_sales",
            "step_name": "BikeSpec",
            "step_order": 1,
            "is_completed": true,
            "completed_by": null,
            "completed_at": null,
            "created_by": null,
            "created_at": "2025-03-01T09:00:00Z",
            "updated_at": "2025-03-01T09:00:00Z"
        }))
        .unwrap();
        assert!(step.is_completed);
        assert!(step.completed_at.is_none());
    }

    #[test]
    fn step_name_serializes_as_wire_string() {
        assert_eq!(
            serde_json::to_value(StepName::BikeSpec).unwrap(),
            serde_json::json!("BikeSpec")
        );
    }
}
