//! Bike-resale workflow operations.
//!
//! [`WorkflowService`] ties the step engine to the API and the notification
//! sink. Every mutation runs in the same order: the engine checks the
//! transition on a working copy, the API persists it, and the server's copy
//! of the step replaces the local one. Notifications go out afterwards on a
//! detached task; a failed delivery never undoes a step.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use uuid::Uuid;
use wheelhouse_core::error::CoreError;
use wheelhouse_core::models::{StepName, Transaction, User};
use wheelhouse_core::permissions::{require_permission, PERM_ADMIN, PERM_SAFETY_CHECK};
use wheelhouse_core::types::DbId;
use wheelhouse_core::workflow::{
    build_checklist_complete, NotificationTrigger, StepTransition, WorkflowSteps,
};
use wheelhouse_events::{dispatch_detached, Notification, NotificationSink};

use crate::api::ApiClient;
use crate::cache::{QueryCache, QueryKey};
use crate::error::ClientError;

/// A transaction and its workflow, `None` until one is initialized.
#[derive(Debug)]
pub struct LoadedWorkflow {
    pub transaction: Transaction,
    pub steps: Option<WorkflowSteps>,
}

impl LoadedWorkflow {
    pub fn is_initialized(&self) -> bool {
        self.steps.is_some()
    }
}

/// Result of completing or reverting a step.
#[derive(Debug)]
pub struct StepOutcome {
    pub transition: StepTransition,
    pub steps: WorkflowSteps,
    /// The detached notification task, when the transition fired one.
    pub notification: Option<JoinHandle<()>>,
}

pub struct WorkflowService<S> {
    api: ApiClient,
    sink: Arc<S>,
    cache: Option<Arc<QueryCache>>,
}

impl<S: NotificationSink + 'static> WorkflowService<S> {
    pub fn new(api: ApiClient, sink: Arc<S>) -> Self {
        Self {
            api,
            sink,
            cache: None,
        }
    }

    /// Invalidate cached workflow steps after every mutation.
    pub fn with_cache(mut self, cache: Arc<QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn invalidate_steps(&self, transaction_id: Uuid) {
        if let Some(cache) = &self.cache {
            cache.invalidate(QueryKey::WorkflowSteps(transaction_id)).await;
        }
    }

    /// Load a transaction's workflow by shop number.
    ///
    /// Legacy `Reservation` steps are completed on the way, attributed to
    /// `actor`.
    pub async fn load(
        &self,
        transaction_num: DbId,
        actor: &User,
    ) -> Result<LoadedWorkflow, ClientError> {
        let transaction = self.api.fetch_transaction(transaction_num).await?;
        let records = match self.api.fetch_workflow_steps(transaction.transaction_id).await {
            Ok(records) => records,
            Err(e) if e.is_missing_workflow() => {
                tracing::debug!(transaction_num, "No workflow initialized");
                return Ok(LoadedWorkflow {
                    transaction,
                    steps: None,
                });
            }
            Err(e) => return Err(e),
        };
        if records.is_empty() {
            return Ok(LoadedWorkflow {
                transaction,
                steps: None,
            });
        }

        let mut steps = WorkflowSteps::new(records);
        if self.auto_complete(transaction_num, &mut steps, actor).await? {
            self.invalidate_steps(transaction.transaction_id).await;
        }
        Ok(LoadedWorkflow {
            transaction,
            steps: Some(steps),
        })
    }

    async fn auto_complete(
        &self,
        transaction_num: DbId,
        steps: &mut WorkflowSteps,
        actor: &User,
    ) -> Result<bool, ClientError> {
        let pending = steps.pending_auto_completions();
        for &step_id in &pending {
            let updated = self.api.complete_workflow_step(step_id, actor.user_id).await?;
            steps.replace_step(updated)?;
            tracing::info!(transaction_num, %step_id, "Auto-completed reservation step");
        }
        Ok(!pending.is_empty())
    }

    async fn load_initialized(
        &self,
        transaction_num: DbId,
        actor: &User,
    ) -> Result<(Transaction, WorkflowSteps), ClientError> {
        let loaded = self.load(transaction_num, actor).await?;
        match loaded.steps {
            Some(steps) => Ok((loaded.transaction, steps)),
            None => Err(CoreError::NotFound {
                entity: "workflow",
                id: transaction_num,
            }
            .into()),
        }
    }

    /// Create the workflow for a retrospec transaction.
    pub async fn initialize(
        &self,
        transaction_num: DbId,
        actor: &User,
    ) -> Result<WorkflowSteps, ClientError> {
        let transaction = self.api.fetch_transaction(transaction_num).await?;
        if !transaction.is_retrospec() {
            return Err(CoreError::Validation(format!(
                "Transaction #{transaction_num} is not a retrospec sale"
            ))
            .into());
        }
        let records = self
            .api
            .initialize_workflow(transaction.transaction_id)
            .await?;
        tracing::info!(transaction_num, steps = records.len(), "Workflow initialized");

        let mut steps = WorkflowSteps::new(records);
        self.auto_complete(transaction_num, &mut steps, actor).await?;
        self.invalidate_steps(transaction.transaction_id).await;
        Ok(steps)
    }

    /// Delete every step of a workflow. Admin only.
    pub async fn reset(&self, transaction_num: DbId, actor: &User) -> Result<(), ClientError> {
        require_permission(Some(actor), PERM_ADMIN)?;
        let transaction = self.api.fetch_transaction(transaction_num).await?;
        self.api.reset_workflow(transaction.transaction_id).await?;
        self.invalidate_steps(transaction.transaction_id).await;
        tracing::warn!(transaction_num, by = %actor.username, "Workflow reset");
        Ok(())
    }

    /// Reset, then initialize a fresh workflow. Admin only.
    pub async fn reinitialize(
        &self,
        transaction_num: DbId,
        actor: &User,
    ) -> Result<WorkflowSteps, ClientError> {
        self.reset(transaction_num, actor).await?;
        self.initialize(transaction_num, actor).await
    }

    /// Complete a step and fire its notification, if it has one.
    ///
    /// Completing `Build` requires every build checklist line to be done;
    /// completing `Creation` (the safety check) requires the safety-check
    /// permission.
    pub async fn complete_step(
        &self,
        transaction_num: DbId,
        step_id: Uuid,
        actor: &User,
        note: Option<&str>,
    ) -> Result<StepOutcome, ClientError> {
        let (transaction, steps) = self.load_initialized(transaction_num, actor).await?;

        let mut next = steps;
        let transition = next.mark_complete(step_id, actor.user_id, Utc::now())?;
        match transition.step {
            StepName::Creation => require_permission(Some(actor), PERM_SAFETY_CHECK)?,
            StepName::Build => {
                let checklist = self
                    .api
                    .fetch_repair_details(transaction.transaction_id)
                    .await?;
                if !build_checklist_complete(&checklist) {
                    return Err(CoreError::Validation(
                        "Finish the build checklist before completing the build".into(),
                    )
                    .into());
                }
            }
            _ => {}
        }

        let updated = self.api.complete_workflow_step(step_id, actor.user_id).await?;
        next.replace_step(updated)?;
        self.invalidate_steps(transaction.transaction_id).await;
        tracing::info!(
            transaction_num,
            step = transition.step.as_str(),
            by = %actor.username,
            "Workflow step completed"
        );

        let notification = transition
            .notification_trigger()
            .and_then(|trigger| self.notify(&transaction, trigger, actor, note));

        Ok(StepOutcome {
            transition,
            steps: next,
            notification,
        })
    }

    /// Revert a completed step, moving the current step back to it.
    pub async fn uncomplete_step(
        &self,
        transaction_num: DbId,
        step_id: Uuid,
        actor: &User,
    ) -> Result<StepOutcome, ClientError> {
        let (transaction, steps) = self.load_initialized(transaction_num, actor).await?;

        let mut next = steps;
        let transition = next.mark_incomplete(step_id, Utc::now())?;
        let updated = self.api.uncomplete_workflow_step(step_id).await?;
        next.replace_step(updated)?;
        self.invalidate_steps(transaction.transaction_id).await;
        tracing::info!(
            transaction_num,
            step = transition.step.as_str(),
            by = %actor.username,
            "Workflow step reverted"
        );

        Ok(StepOutcome {
            transition,
            steps: next,
            notification: None,
        })
    }

    fn notify(
        &self,
        transaction: &Transaction,
        trigger: NotificationTrigger,
        actor: &User,
        note: Option<&str>,
    ) -> Option<JoinHandle<()>> {
        let bike_id = transaction
            .bike_id
            .or_else(|| transaction.bike.as_ref().map(|b| b.bike_id));
        let Some(bike_id) = bike_id else {
            tracing::warn!(
                transaction_num = transaction.transaction_num,
                "No bike attached, skipping workflow notification"
            );
            return None;
        };

        let mut notification = Notification::new(
            trigger.into(),
            bike_id,
            transaction.transaction_num,
            actor.full_name(),
        );
        if let Some(bike) = &transaction.bike {
            notification = notification.with_bike_model(bike.display_name());
        }
        if let Some(note) = note {
            notification = notification.with_note(note);
        }
        Some(dispatch_detached(Arc::clone(&self.sink), notification))
    }
}
