//! Account balance and plan tier

use serde_json::{json, Value};

use crate::error::Result;
use crate::gateway::{Gateway, RequestDescriptor};

pub async fn add_funds(gateway: &Gateway, amount: f64) -> Result<Value> {
    gateway
        .request(RequestDescriptor::post("/billing/add-funds").body(json!({ "amount": amount })))
        .await
}

pub async fn upgrade_premium(gateway: &Gateway) -> Result<Value> {
    gateway
        .request(RequestDescriptor::post("/billing/upgrade-premium"))
        .await
}
