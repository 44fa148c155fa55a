//! Workflow sub-API. Every route is keyed by the transaction UUID, never
//! the shop number.

use reqwest::Method;
use uuid::Uuid;
use wheelhouse_core::models::workflow_step::WORKFLOW_BIKE_SALES;
use wheelhouse_core::models::{StepCompletion, WorkflowProgress, WorkflowStep};

use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Create the bike-sales step records for a transaction.
    pub async fn initialize_workflow(
        &self,
        transaction_id: Uuid,
    ) -> Result<Vec<WorkflowStep>, ClientError> {
        self.send_list(
            "Failed to initialize workflow",
            Method::POST,
            &format!("/workflow-steps/initialize/{transaction_id}"),
            &serde_json::json!({ "workflow_type": WORKFLOW_BIKE_SALES }),
        )
        .await
    }

    pub async fn fetch_workflow_steps(
        &self,
        transaction_id: Uuid,
    ) -> Result<Vec<WorkflowStep>, ClientError> {
        self.get_list(
            "Failed to load workflow steps",
            &format!("/workflow-steps/transaction/{transaction_id}"),
        )
        .await
    }

    pub async fn complete_workflow_step(
        &self,
        step_id: Uuid,
        completed_by: Uuid,
    ) -> Result<WorkflowStep, ClientError> {
        self.send_one(
            "Failed to complete workflow step",
            Method::PUT,
            &format!("/workflow-steps/{step_id}/complete"),
            &StepCompletion { completed_by },
        )
        .await
    }

    pub async fn uncomplete_workflow_step(&self, step_id: Uuid) -> Result<WorkflowStep, ClientError> {
        self.send_one(
            "Failed to revert workflow step",
            Method::PUT,
            &format!("/workflow-steps/{step_id}/uncomplete"),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn fetch_workflow_progress(
        &self,
        transaction_id: Uuid,
    ) -> Result<WorkflowProgress, ClientError> {
        self.get_one(
            "Failed to load workflow progress",
            &format!("/workflow-steps/progress/{transaction_id}"),
        )
        .await
    }

    /// Delete every step record of a transaction's workflow.
    pub async fn reset_workflow(&self, transaction_id: Uuid) -> Result<(), ClientError> {
        self.delete(
            "Failed to reset workflow",
            &format!("/workflow-steps/reset/{transaction_id}"),
        )
        .await
    }
}
