//! User profile and settings

use serde_json::Value;

use crate::error::Result;
use crate::gateway::{Gateway, RequestBody, RequestDescriptor};

/// Fetch the authenticated user from the server (not the cached record)
pub async fn get_user(gateway: &Gateway) -> Result<Value> {
    gateway.request(RequestDescriptor::get("/user")).await
}

pub async fn update_user_settings(gateway: &Gateway, settings: impl Into<RequestBody>) -> Result<Value> {
    gateway
        .request(RequestDescriptor::put("/user/settings").body(settings))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn settings_are_forwarded_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let settings = json!({"default_currency": "INR", "company_address": "12 Main St"});
        let mock = server
            .mock("PUT", "/user/settings")
            .match_body(Matcher::Json(settings.clone()))
            .with_status(200)
            .with_body(r#"{"message": "Settings updated"}"#)
            .create_async()
            .await;

        let gw = Gateway::new(server.url(), Session::in_memory(), None).unwrap();
        let data = update_user_settings(&gw, settings).await.unwrap();
        assert_eq!(data, json!({"message": "Settings updated"}));
        mock.assert_async().await;
    }
}
