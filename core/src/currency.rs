//! Currency conversion

use serde_json::{json, Value};

use crate::error::Result;
use crate::gateway::{Gateway, RequestDescriptor};

pub async fn convert_currency(
    gateway: &Gateway,
    amount: f64,
    from_currency: &str,
    to_currency: &str,
) -> Result<Value> {
    gateway
        .request(RequestDescriptor::post("/convert-currency").body(json!({
            "amount": amount,
            "from_currency": from_currency,
            "to_currency": to_currency,
        })))
        .await
}
