//! Payment orders and gateway signature verification

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{RequestFailed, Result};
use crate::gateway::{Gateway, RequestDescriptor};

/// Fields returned by the payment provider's checkout callback
#[derive(Debug, Clone, Serialize)]
pub struct PaymentConfirmation {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    pub payment_type: String,
    pub amount: f64,
}

pub async fn create_payment_order(gateway: &Gateway, amount: f64, payment_type: &str) -> Result<Value> {
    gateway
        .request(
            RequestDescriptor::post("/payments/create-order")
                .body(json!({ "amount": amount, "type": payment_type })),
        )
        .await
}

pub async fn verify_payment(gateway: &Gateway, confirmation: &PaymentConfirmation) -> Result<Value> {
    let body = serde_json::to_value(confirmation)
        .map_err(|e| RequestFailed::new(format!("Failed to encode request body: {}", e)))?;
    gateway
        .request(RequestDescriptor::post("/payments/verify").body(body))
        .await
}
