//! Part order requests and supplier PDF extraction.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use wheelhouse_core::models::{
    CreateOrderRequest, ExtractedOrderRow, OrderRequest, UpdateOrderRequest,
};
use wheelhouse_core::types::DbId;
use wheelhouse_core::validation::{validate_array_response, validate_request};

use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// All open order requests. The server answers 404 when there are none.
    pub async fn fetch_order_requests(&self) -> Result<Vec<OrderRequest>, ClientError> {
        self.get_list_or_empty("Failed to load order requests", "/orderRequests")
            .await
    }

    pub async fn create_order_request(
        &self,
        body: &CreateOrderRequest,
    ) -> Result<OrderRequest, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to create order request",
            Method::POST,
            "/orderRequests",
            body,
        )
        .await
    }

    pub async fn update_order_request(
        &self,
        order_request_id: DbId,
        body: &UpdateOrderRequest,
    ) -> Result<OrderRequest, ClientError> {
        validate_request(body)?;
        self.send_one(
            "Failed to update order request",
            Method::PUT,
            &format!("/orderRequests/{order_request_id}"),
            body,
        )
        .await
    }

    pub async fn delete_order_request(&self, order_request_id: DbId) -> Result<(), ClientError> {
        self.delete(
            "Failed to delete order request",
            &format!("/orderRequests/{order_request_id}"),
        )
        .await
    }

    /// Upload a supplier invoice PDF and get back the line items the server
    /// extracted from it.
    pub async fn process_order_pdf(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Vec<ExtractedOrderRow>, ClientError> {
        const CONTEXT: &str = "Failed to process order PDF";
        let part = Part::bytes(bytes)
            .file_name(file_name.into())
            .mime_str("application/pdf")
            .map_err(|source| ClientError::Request {
                context: CONTEXT,
                source,
            })?;
        let form = Form::new().part("file", part);
        let received = self
            .execute(
                CONTEXT,
                self.request(Method::POST, "/orderRequests/process-pdf")
                    .multipart(form),
            )
            .await?;
        Self::checked(CONTEXT, received.status, validate_array_response(received.body))
    }
}
