//! Subcommand handlers. Each prints its result to stdout.

use anyhow::Context;
use chrono::Utc;
use uuid::Uuid;
use wheelhouse_client::{fetch_transaction_bundle, Repository, WorkflowService};
use wheelhouse_core::filter::{check_status_of_retrospec, filter_transactions, TransactionView};
use wheelhouse_core::models::{StepName, Transaction, User};
use wheelhouse_core::types::DbId;
use wheelhouse_core::workflow::WorkflowSteps;

use crate::sink::ConfiguredSink;
use crate::WorkflowAction;

fn customer_label(transaction: &Transaction) -> String {
    transaction
        .customer
        .as_ref()
        .map(|c| c.full_name())
        .unwrap_or_else(|| "-".into())
}

fn print_row(transaction: &Transaction) {
    let status = if transaction.is_retrospec() {
        check_status_of_retrospec(&transaction.flags).label()
    } else {
        ""
    };
    println!(
        "#{:<6} {:<11} {:<24} ${:>9.2}  {}",
        transaction.transaction_num,
        transaction.transaction_type,
        customer_label(transaction),
        transaction.total_cost,
        status
    );
}

pub async fn transactions(repo: &Repository, view: &str, search: &str) -> anyhow::Result<()> {
    let view = TransactionView::from_str_value(view)?;
    let transactions = repo.transactions().await?;
    let rows = filter_transactions(&transactions, view, search, Utc::now());
    for transaction in &rows {
        print_row(transaction);
    }
    println!("{} of {} transactions in '{}'", rows.len(), transactions.len(), view.as_str());
    Ok(())
}

pub async fn transaction(repo: &Repository, transaction_num: DbId) -> anyhow::Result<()> {
    let bundle = fetch_transaction_bundle(repo.api(), transaction_num).await?;
    print_row(&bundle.transaction);
    if let Some(description) = &bundle.transaction.description {
        println!("  {description}");
    }

    match &bundle.repairs {
        Ok(repairs) => {
            for detail in repairs {
                let mark = if detail.completed { "x" } else { " " };
                println!("  [{mark}] {:<30} ${:>8.2}", detail.repair.name, detail.repair.price);
            }
        }
        Err(e) => println!("  repairs unavailable: {e}"),
    }
    match &bundle.items {
        Ok(items) => {
            for detail in items {
                println!(
                    "  {:>3} x {:<26} ${:>8.2}",
                    detail.quantity, detail.item.name, detail.item.standard_price
                );
            }
        }
        Err(e) => println!("  parts unavailable: {e}"),
    }
    if let Some(Ok(steps)) = &bundle.workflow {
        print_steps(&WorkflowSteps::new(steps.clone()));
    }

    match (bundle.subtotal(), bundle.total_with_tax()) {
        (Some(subtotal), Some(total)) => {
            println!("  Subtotal: ${subtotal:.2}");
            println!("  Total:    ${total:.2}");
        }
        _ => println!("  Total unavailable: details failed to load"),
    }
    Ok(())
}

pub async fn summary(repo: &Repository) -> anyhow::Result<()> {
    let summary = repo.summary().await?;
    println!("Incomplete:              {}", summary.quantity_incomplete);
    println!("Waiting on pickup:       {}", summary.quantity_waiting_on_pickup);
    println!(
        "Waiting on safety check: {}",
        summary.quantity_waiting_on_safety_check
    );
    Ok(())
}

fn print_steps(steps: &WorkflowSteps) {
    let current = steps.current_step().map(|s| s.step_id);
    for step in steps.visible() {
        let mark = if step.is_completed { "x" } else { " " };
        let pointer = if Some(step.step_id) == current { "<-" } else { "" };
        println!("  [{mark}] {:<20} {pointer}", step.step_name.label());
    }
    let progress = steps.progress();
    println!(
        "  {}/{} steps complete ({}%)",
        progress.completed_steps, progress.total_steps, progress.percentage
    );
}

fn step_id(steps: &WorkflowSteps, name: StepName) -> anyhow::Result<Uuid> {
    steps
        .find_by_name(name)
        .map(|s| s.step_id)
        .with_context(|| format!("workflow has no {} step", name.label()))
}

async fn load_steps(
    service: &WorkflowService<ConfiguredSink>,
    transaction_num: DbId,
    actor: &User,
) -> anyhow::Result<WorkflowSteps> {
    service
        .load(transaction_num, actor)
        .await?
        .steps
        .with_context(|| {
            format!(
                "transaction #{transaction_num} has no workflow; \
                 run `wheelhouse workflow {transaction_num} init`"
            )
        })
}

pub async fn workflow(
    service: &WorkflowService<ConfiguredSink>,
    transaction_num: DbId,
    actor: &User,
    action: WorkflowAction,
) -> anyhow::Result<()> {
    match action {
        WorkflowAction::Show => {
            let loaded = service.load(transaction_num, actor).await?;
            match loaded.steps {
                Some(steps) => print_steps(&steps),
                None => println!("No workflow yet for transaction #{transaction_num}"),
            }
        }
        WorkflowAction::Init => {
            let steps = service.initialize(transaction_num, actor).await?;
            print_steps(&steps);
        }
        WorkflowAction::Reinit => {
            let steps = service.reinitialize(transaction_num, actor).await?;
            print_steps(&steps);
        }
        WorkflowAction::Reset => {
            service.reset(transaction_num, actor).await?;
            println!("Workflow for transaction #{transaction_num} deleted");
        }
        WorkflowAction::Complete { step, note } => {
            let steps = load_steps(service, transaction_num, actor).await?;
            let id = step_id(&steps, step)?;
            let outcome = service
                .complete_step(transaction_num, id, actor, note.as_deref())
                .await?;
            print_steps(&outcome.steps);
            // Let the detached delivery finish before the process exits.
            if let Some(handle) = outcome.notification {
                handle.await.context("notification task panicked")?;
            }
        }
        WorkflowAction::Uncomplete { step } => {
            let steps = load_steps(service, transaction_num, actor).await?;
            let id = step_id(&steps, step)?;
            let outcome = service.uncomplete_step(transaction_num, id, actor).await?;
            print_steps(&outcome.steps);
        }
    }
    Ok(())
}
