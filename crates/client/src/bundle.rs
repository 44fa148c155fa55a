//! Everything the transaction detail view needs, loaded in one go.

use wheelhouse_core::models::{ItemDetail, RepairDetail, Transaction, WorkflowStep};
use wheelhouse_core::pricing::{calculate_total_with_tax, transaction_subtotal};
use wheelhouse_core::types::DbId;

use crate::api::ApiClient;
use crate::error::ClientError;

/// A transaction with its dependent queries.
///
/// Each dependent part keeps its own result so a view can render what
/// loaded and report what did not.
#[derive(Debug)]
pub struct TransactionBundle {
    pub transaction: Transaction,
    pub items: Result<Vec<ItemDetail>, ClientError>,
    pub repairs: Result<Vec<RepairDetail>, ClientError>,
    /// Only fetched for retrospec transactions.
    pub workflow: Option<Result<Vec<WorkflowStep>, ClientError>>,
}

impl TransactionBundle {
    /// Subtotal, once both detail lists have loaded.
    pub fn subtotal(&self) -> Option<f64> {
        let (Ok(items), Ok(repairs)) = (&self.items, &self.repairs) else {
            return None;
        };
        Some(transaction_subtotal(&self.transaction, repairs, items))
    }

    pub fn total_with_tax(&self) -> Option<f64> {
        self.subtotal().map(calculate_total_with_tax)
    }

    /// Dependent parts that failed to load. A workflow that was never
    /// initialized is not a failure.
    pub fn failures(&self) -> Vec<&ClientError> {
        let workflow = self
            .workflow
            .as_ref()
            .and_then(|result| result.as_ref().err())
            .filter(|err| !err.is_missing_workflow());
        [self.items.as_ref().err(), self.repairs.as_ref().err(), workflow]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Load a transaction, then its details and workflow concurrently.
///
/// The transaction fetch comes first because the dependent routes are
/// keyed by its UUID. A failure there fails the whole bundle.
pub async fn fetch_transaction_bundle(
    api: &ApiClient,
    transaction_num: DbId,
) -> Result<TransactionBundle, ClientError> {
    let transaction = api.fetch_transaction(transaction_num).await?;
    let uuid = transaction.transaction_id;
    let with_workflow = transaction.is_retrospec();

    let (items, repairs, workflow) = tokio::join!(
        api.fetch_item_details(uuid),
        api.fetch_repair_details(uuid),
        async {
            if with_workflow {
                Some(api.fetch_workflow_steps(uuid).await)
            } else {
                None
            }
        },
    );

    let bundle = TransactionBundle {
        transaction,
        items,
        repairs,
        workflow,
    };
    for err in bundle.failures() {
        tracing::warn!(transaction_num, error = %err, "Partial transaction bundle");
    }
    Ok(bundle)
}
