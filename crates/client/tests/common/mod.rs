//! In-process mock of the shop API for client integration tests.
//!
//! [`spawn_mock_api`] serves a fixed data set on `127.0.0.1:0` with a small
//! amount of mutable workflow state, and returns the base URL plus a handle
//! to that state.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;

use wheelhouse_core::models::User;

pub const RETRO_NUM: i64 = 1042;
pub const REPAIR_NUM: i64 = 7;
pub const RETRO_UUID: &str = "9b2f7c3e-1a4d-4e5f-8a6b-7c8d9e0f1a2b";
pub const REPAIR_UUID: &str = "5c1d2e3f-4a5b-4c6d-8e7f-9a0b1c2d3e4f";
pub const BIKE_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";
pub const CUSTOMER_ID: &str = "3e1b2c4d-5f6a-4b7c-8d9e-0a1b2c3d4e5f";
pub const ADMIN_ID: &str = "11111111-1111-4111-8111-111111111111";
pub const MECHANIC_ID: &str = "22222222-2222-4222-8222-222222222222";

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

pub fn ok(response_object: Value) -> Response {
    Json(json!({
        "message": "ok",
        "responseObject": response_object,
        "statusCode": 200,
        "success": true
    }))
    .into_response()
}

pub fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "message": message,
            "responseObject": null,
            "statusCode": status.as_u16(),
            "success": false
        })),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn transaction_json(num: i64) -> Value {
    let retro = num == RETRO_NUM;
    let mut value = json!({
        "transaction_num": num,
        "transaction_id": if retro { RETRO_UUID } else { REPAIR_UUID },
        "date_created": "2025-03-01T15:30:00Z",
        "transaction_type": if retro { "Retrospec" } else { "Inpatient" },
        "customer_id": CUSTOMER_ID,
        "bike_id": if retro { Value::from(BIKE_ID) } else { Value::Null },
        "total_cost": 0,
        "description": null,
        "is_completed": false,
        "is_paid": false,
        "is_refurb": retro,
        "is_urgent": false,
        "is_nuclear": false,
        "is_beer_bike": false,
        "is_employee": false,
        "is_reserved": false,
        "is_waiting_on_email": false,
        "date_completed": null
    });
    if retro {
        value["Bike"] = bike_json();
    }
    value
}

pub fn bike_json() -> Value {
    json!({
        "bike_id": BIKE_ID,
        "make": "Retrospec",
        "model": "Harper",
        "description": "Single speed",
        "size_cm": "54"
    })
}

pub fn item_json(standard_price: f64, wholesale_cost: f64) -> Value {
    json!({
        "item_id": Uuid::new_v4(),
        "upc": "012345678905",
        "name": "Tube 700x25",
        "stock": 12,
        "standard_price": standard_price,
        "wholesale_cost": wholesale_cost,
        "disabled": false
    })
}

pub fn repair_json(price: f64) -> Value {
    json!({
        "repair_id": Uuid::new_v4(),
        "name": "Flat fix",
        "price": price,
        "disabled": false,
        "description": null
    })
}

fn detail_json(transaction_id: &str, key: &str, embedded: Value, completed: bool) -> Value {
    let mut value = json!({
        "transaction_detail_id": Uuid::new_v4(),
        "transaction_id": transaction_id,
        "changed_by": null,
        "completed": completed,
        "quantity": 1,
        "date_modified": "2025-03-02T10:00:00Z"
    });
    let id_key = if key == "Item" { "item_id" } else { "repair_id" };
    value[id_key] = embedded[id_key].clone();
    value[key] = embedded;
    value
}

pub fn item_detail_json(transaction_id: &str, price: f64) -> Value {
    detail_json(transaction_id, "Item", item_json(price, price / 2.0), false)
}

pub fn repair_detail_json(transaction_id: &str, price: f64, completed: bool) -> Value {
    detail_json(transaction_id, "Repair", repair_json(price), completed)
}

fn step_json(transaction_id: &str, name: &str, order: i32) -> Value {
    json!({
        "step_id": Uuid::new_v4(),
        "transaction_id": transaction_id,
        "workflow_type": "bike_sales",
        "step_name": name,
        "step_order": order,
        "is_completed": false,
        "completed_by": null,
        "completed_at": null,
        "created_by": null,
        "created_at": "2025-03-01T15:30:00Z",
        "updated_at": "2025-03-01T15:30:00Z"
    })
}

pub fn order_request_json(order_request_id: i64, quantity: i64) -> Value {
    json!({
        "order_request_id": order_request_id,
        "created_by": ADMIN_ID,
        "item_id": "0d6c9a52-8f3e-4b1a-a7d4-5e2b8c1f9a33",
        "transaction_id": REPAIR_NUM,
        "quantity": quantity,
        "notes": null,
        "ordered": false
    })
}

fn detail_record_json(transaction_detail_id: &str, transaction_id: &str) -> Value {
    json!({
        "transaction_detail_id": transaction_detail_id,
        "transaction_id": transaction_id,
        "item_id": null,
        "repair_id": null,
        "changed_by": null,
        "completed": false,
        "quantity": 1,
        "date_modified": "2025-03-02T10:00:00Z"
    })
}

fn log_json(transaction_num: i64) -> Value {
    json!({
        "log_id": 31,
        "transaction_num": transaction_num,
        "changed_by": ADMIN_ID,
        "change_type": "repair",
        "description": "Added flat fix",
        "date_modified": "2025-03-02T10:05:00Z",
        "Users": { "firstname": "Grace", "lastname": "Hopper" }
    })
}

fn user_json(user_id: &str, username: &str, permissions: &[&str]) -> Value {
    let permissions: Vec<Value> = permissions
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i + 1, "name": name, "description": null }))
        .collect();
    json!({
        "user_id": user_id,
        "firstname": if username == "admin1" { "Grace" } else { "Ada" },
        "lastname": if username == "admin1" { "Hopper" } else { "Lovelace" },
        "username": username,
        "active": true,
        "permissions": permissions
    })
}

pub fn admin_user() -> User {
    serde_json::from_value(user_json(ADMIN_ID, "admin1", &["admin", "Safety check"])).unwrap()
}

pub fn mechanic_user() -> User {
    serde_json::from_value(user_json(MECHANIC_ID, "mech1", &[])).unwrap()
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Mutable server state shared with the test.
#[derive(Clone, Default)]
pub struct MockState {
    pub steps: Arc<Mutex<Vec<Value>>>,
    pub repair_details: Arc<Mutex<Vec<Value>>>,
    /// `"METHOD path"` of every request that reached a handler.
    pub calls: Arc<Mutex<Vec<String>>>,
    /// JSON bodies received by mutation handlers, with their call.
    pub bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockState {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    /// The body of the most recent call equal to `call`.
    pub fn body_of(&self, call: &str) -> Option<Value> {
        self.bodies
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(c, _)| c == call)
            .map(|(_, body)| body.clone())
    }

    /// Replace the seeded steps with records the client cannot decode.
    pub fn corrupt_workflow(&self) {
        *self.steps.lock().unwrap() = vec![json!({ "step_id": "not-a-uuid" })];
    }

    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.contains(needle))
            .count()
    }

    /// Create the bike-sales steps for the retrospec transaction, including
    /// a legacy reservation step.
    pub fn seed_workflow(&self) {
        let steps = ["BikeSpec", "Build", "Creation", "Reservation", "Checkout"]
            .iter()
            .enumerate()
            .map(|(i, name)| step_json(RETRO_UUID, name, i as i32 + 1))
            .collect();
        *self.steps.lock().unwrap() = steps;
    }

    pub fn step_id(&self, name: &str) -> Uuid {
        let steps = self.steps.lock().unwrap();
        let step = steps
            .iter()
            .find(|s| s["step_name"] == name)
            .expect("step seeded");
        serde_json::from_value(step["step_id"].clone()).unwrap()
    }

    pub fn is_completed(&self, name: &str) -> bool {
        let steps = self.steps.lock().unwrap();
        steps
            .iter()
            .any(|s| s["step_name"] == name && s["is_completed"] == true)
    }

    pub fn set_checklist(&self, completed: &[bool]) {
        *self.repair_details.lock().unwrap() = completed
            .iter()
            .map(|done| repair_detail_json(RETRO_UUID, 20.0, *done))
            .collect();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Record a mutation and answer with `base` overlaid by the request body.
fn echo(state: &MockState, call: String, mut base: Value, body: Value) -> Response {
    if let (Some(target), Value::Object(fields)) = (base.as_object_mut(), body.clone()) {
        target.extend(fields);
    }
    state.record(call.clone());
    state.bodies.lock().unwrap().push((call, body));
    ok(base)
}

fn record_delete(state: &MockState, call: String) -> Response {
    state.record(call);
    ok(json!({}))
}

async fn list_transactions() -> Response {
    let mut repair = transaction_json(REPAIR_NUM);
    repair["OrderRequests"] = json!([order_request_json(3, 0)]);
    ok(json!([transaction_json(RETRO_NUM), repair]))
}

async fn create_transaction(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    echo(&state, "POST /transactions".into(), transaction_json(REPAIR_NUM), body)
}

async fn replace_transaction(
    State(state): State<MockState>,
    Path(num): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    echo(&state, format!("PUT /transactions/{num}"), transaction_json(num), body)
}

async fn get_transaction(Path(num): Path<i64>) -> Response {
    if num == RETRO_NUM || num == REPAIR_NUM {
        ok(transaction_json(num))
    } else {
        failure(StatusCode::NOT_FOUND, "Transaction not found")
    }
}

async fn patch_transaction(Path(num): Path<i64>, Json(body): Json<Value>) -> Response {
    let mut value = transaction_json(num);
    value["description"] = body["description"].clone();
    ok(value)
}

async fn summary(State(state): State<MockState>) -> Response {
    state.record("GET /summary/transactions".into());
    ok(json!({
        "quantity_incomplete": 3,
        "quantity_waiting_on_pickup": 1,
        "quantity_waiting_on_safety_check": 2
    }))
}

async fn list_items() -> Response {
    ok(json!([item_json(9.99, 4.0), item_json(-1.0, 0.5)]))
}

async fn create_item(Json(body): Json<Value>) -> Response {
    let mut item = item_json(
        body["standard_price"].as_f64().unwrap_or(0.0),
        body["wholesale_cost"].as_f64().unwrap_or(0.0),
    );
    item["name"] = body["name"].clone();
    ok(item)
}

async fn delete_item() -> Response {
    ok(json!({}))
}

async fn list_repairs(State(state): State<MockState>) -> Response {
    state.record("GET /repairs".into());
    ok(json!([repair_json(15.0)]))
}

async fn list_bikes() -> Response {
    ok(json!([bike_json()]))
}

/// Envelope without `success`.
async fn list_customers() -> Response {
    Json(json!({
        "message": "ok",
        "responseObject": [],
        "statusCode": 200
    }))
    .into_response()
}

async fn list_permissions() -> Response {
    (StatusCode::OK, "<html>gateway</html>").into_response()
}

async fn list_users() -> Response {
    failure(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

async fn get_user(Path(netid): Path<String>) -> Response {
    match netid.as_str() {
        "admin1" => ok(user_json(ADMIN_ID, "admin1", &["admin", "Safety check"])),
        "mech1" => ok(user_json(MECHANIC_ID, "mech1", &[])),
        "guest/1" => ok(user_json(MECHANIC_ID, "guest/1", &[])),
        _ => failure(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn create_user(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    echo(&state, "POST /users".into(), user_json(MECHANIC_ID, "new", &[]), body)
}

async fn update_user(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    echo(&state, format!("PUT /users/{id}"), user_json(&id, "upd", &[]), body)
}

async fn list_roles() -> Response {
    failure(StatusCode::NOT_FOUND, "No roles found")
}

fn role_json(role_id: &str) -> Value {
    json!({ "role_id": role_id, "name": "", "disabled": false, "description": null })
}

async fn create_role(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let id = Uuid::new_v4().to_string();
    echo(&state, "POST /roles".into(), role_json(&id), body)
}

async fn update_role(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    echo(&state, format!("PUT /roles/{id}"), role_json(&id), body)
}

async fn delete_role(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    record_delete(&state, format!("DELETE /roles/{id}"))
}

fn permission_json(id: i64) -> Value {
    json!({ "id": id, "name": "", "description": null })
}

async fn create_permission(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    echo(&state, "POST /permissions".into(), permission_json(9), body)
}

async fn update_permission(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    echo(&state, format!("PUT /permissions/{id}"), permission_json(id), body)
}

async fn delete_permission(State(state): State<MockState>, Path(id): Path<i64>) -> Response {
    record_delete(&state, format!("DELETE /permissions/{id}"))
}

async fn list_order_requests() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

async fn create_order_request(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    echo(&state, "POST /orderRequests".into(), order_request_json(21, 1), body)
}

async fn update_order_request(
    State(state): State<MockState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    echo(&state, format!("PUT /orderRequests/{id}"), order_request_json(id, 1), body)
}

async fn delete_order_request(State(state): State<MockState>, Path(id): Path<i64>) -> Response {
    record_delete(&state, format!("DELETE /orderRequests/{id}"))
}

async fn process_pdf(mut multipart: Multipart) -> Response {
    let mut rows = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap_or_default();
        rows.push(json!({
            "name": file_name,
            "upc": null,
            "quantity": bytes.len(),
            "unit_price": 2.5,
            "item_id": null
        }));
    }
    ok(Value::Array(rows))
}

async fn list_details(
    State(state): State<MockState>,
    Path(transaction_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    match query.get("detailType").map(String::as_str) {
        Some("item") => ok(json!([item_detail_json(&transaction_id, 10.0)])),
        Some("repair") if transaction_id == RETRO_UUID => {
            ok(Value::Array(state.repair_details.lock().unwrap().clone()))
        }
        Some("repair") => ok(json!([repair_detail_json(&transaction_id, 25.0, true)])),
        _ => failure(StatusCode::BAD_REQUEST, "detailType is required"),
    }
}

async fn create_detail(
    State(state): State<MockState>,
    Path(transaction_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let base = detail_record_json(&Uuid::new_v4().to_string(), &transaction_id);
    echo(&state, format!("POST /transactionDetails/{transaction_id}"), base, body)
}

async fn patch_detail(
    State(state): State<MockState>,
    Path(detail_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut base = detail_record_json(&detail_id, RETRO_UUID);
    base["repair_id"] = json!(Uuid::new_v4());
    echo(&state, format!("PATCH /transactionDetails/{detail_id}"), base, body)
}

async fn delete_detail() -> Response {
    ok(json!({ "deleted": 1 }))
}

async fn list_logs(Path(num): Path<i64>) -> Response {
    ok(json!([log_json(num)]))
}

async fn create_log(
    State(state): State<MockState>,
    Path(num): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut base = log_json(num);
    base.as_object_mut().unwrap().remove("Users");
    echo(&state, format!("POST /transactionLogs/{num}"), base, body)
}

async fn workflow_steps(State(state): State<MockState>, Path(_id): Path<String>) -> Response {
    let steps = state.steps.lock().unwrap().clone();
    if steps.is_empty() {
        return failure(StatusCode::NOT_FOUND, "Endpoint not found");
    }
    ok(Value::Array(steps))
}

/// Progress over the seeded steps. The repair ticket's UUID answers with
/// inconsistent counts.
async fn workflow_progress(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    if id == REPAIR_UUID {
        return ok(json!({
            "total_steps": 2,
            "completed_steps": 3,
            "progress_percentage": 150.0,
            "current_step": null,
            "steps": []
        }));
    }
    let steps = state.steps.lock().unwrap().clone();
    if steps.is_empty() {
        return failure(StatusCode::NOT_FOUND, "Endpoint not found");
    }
    let completed = steps.iter().filter(|s| s["is_completed"] == true).count();
    let current = steps
        .iter()
        .find(|s| s["is_completed"] == false)
        .map(|s| s["step_name"].clone())
        .unwrap_or(Value::Null);
    ok(json!({
        "total_steps": steps.len(),
        "completed_steps": completed,
        "progress_percentage": completed as f64 * 100.0 / steps.len() as f64,
        "current_step": current,
        "steps": steps
    }))
}

async fn initialize_workflow(State(state): State<MockState>, Path(_id): Path<String>) -> Response {
    state.record("POST /workflow-steps/initialize".into());
    state.seed_workflow();
    ok(Value::Array(state.steps.lock().unwrap().clone()))
}

fn set_completion(state: &MockState, step_id: &str, completed_by: Option<Value>) -> Response {
    let mut steps = state.steps.lock().unwrap();
    let Some(step) = steps.iter_mut().find(|s| s["step_id"] == step_id) else {
        return failure(StatusCode::NOT_FOUND, "Step not found");
    };
    match completed_by {
        Some(by) => {
            step["is_completed"] = json!(true);
            step["completed_by"] = by;
            step["completed_at"] = json!("2025-03-05T12:00:00Z");
        }
        None => {
            step["is_completed"] = json!(false);
            step["completed_by"] = Value::Null;
            step["completed_at"] = Value::Null;
        }
    }
    step["updated_at"] = json!("2025-03-05T12:00:00Z");
    ok(step.clone())
}

async fn complete_step(
    State(state): State<MockState>,
    Path(step_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    state.record(format!("PUT /workflow-steps/{step_id}/complete"));
    set_completion(&state, &step_id, Some(body["completed_by"].clone()))
}

async fn uncomplete_step(State(state): State<MockState>, Path(step_id): Path<String>) -> Response {
    state.record(format!("PUT /workflow-steps/{step_id}/uncomplete"));
    set_completion(&state, &step_id, None)
}

async fn reset_workflow(State(state): State<MockState>, Path(_id): Path<String>) -> Response {
    state.record("DELETE /workflow-steps/reset".into());
    state.steps.lock().unwrap().clear();
    ok(json!({}))
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{num}",
            get(get_transaction)
                .patch(patch_transaction)
                .put(replace_transaction),
        )
        .route("/summary/transactions", get(summary))
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", delete(delete_item))
        .route("/repairs", get(list_repairs))
        .route("/bikes", get(list_bikes))
        .route("/customers", get(list_customers))
        .route("/permissions", get(list_permissions).post(create_permission))
        .route(
            "/permissions/{id}",
            put(update_permission).delete(delete_permission),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/{netid}", get(get_user).put(update_user))
        .route("/roles", get(list_roles).post(create_role))
        .route("/roles/{id}", put(update_role).delete(delete_role))
        .route(
            "/orderRequests",
            get(list_order_requests).post(create_order_request),
        )
        .route(
            "/orderRequests/{id}",
            put(update_order_request).delete(delete_order_request),
        )
        .route("/orderRequests/process-pdf", post(process_pdf))
        .route(
            "/transactionDetails/{id}",
            get(list_details)
                .post(create_detail)
                .patch(patch_detail)
                .delete(delete_detail),
        )
        .route(
            "/transactionLogs/{num}",
            get(list_logs).post(create_log),
        )
        .route(
            "/workflow-steps/transaction/{id}",
            get(workflow_steps),
        )
        .route("/workflow-steps/progress/{id}", get(workflow_progress))
        .route(
            "/workflow-steps/initialize/{id}",
            post(initialize_workflow),
        )
        .route("/workflow-steps/{id}/complete", put(complete_step))
        .route("/workflow-steps/{id}/uncomplete", put(uncomplete_step))
        .route(
            "/workflow-steps/reset/{id}",
            delete(reset_workflow),
        )
        .with_state(state)
}

/// Serve the mock API on an ephemeral port. Returns the base URL.
pub async fn spawn_mock_api() -> (String, MockState) {
    let state = MockState::default();
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}
