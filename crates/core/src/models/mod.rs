//! Wire entities exchanged with the shop API.
//!
//! Field names follow the server's JSON exactly. Embedded relations use the
//! server's capitalised keys (`Customer`, `Bike`, `Item`, ...).

pub mod bike;
pub mod customer;
pub mod detail;
pub mod item;
pub mod order_request;
pub mod repair;
pub mod transaction;
pub mod transaction_log;
pub mod user;
pub mod workflow_step;

pub use bike::{Bike, BikeCondition, CreateBike};
pub use customer::{CreateCustomer, Customer};
pub use detail::{
    CreateTransactionDetail, DetailType, ItemDetail, RepairDetail, TransactionDetailRecord,
    UpdateTransactionDetail,
};
pub use item::{CreateItem, Item};
pub use order_request::{CreateOrderRequest, ExtractedOrderRow, OrderRequest, UpdateOrderRequest};
pub use repair::{CreateRepair, Repair};
pub use transaction::{
    CreateTransaction, Lifecycle, Transaction, TransactionDescriptionPatch, TransactionFlags,
    TransactionSummary, TransactionType, UpdateTransaction,
};
pub use transaction_log::{CreateTransactionLog, TransactionLog};
pub use user::{CreatePermission, CreateRole, CreateUser, Permission, Role, User};
pub use workflow_step::{StepCompletion, StepName, WorkflowProgress, WorkflowStep};
