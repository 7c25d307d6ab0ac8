//! Login, registration and logout
//!
//! Successful authentication stores `access_token` and `user` in the
//! gateway's session; every later request then carries the bearer header.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{RequestFailed, Result};
use crate::gateway::{Gateway, RequestDescriptor};

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    #[serde(default)]
    user: Value,
}

/// Log in and store the returned credential. Returns the full response.
pub async fn login(gateway: &Gateway, email: &str, password: &str) -> Result<Value> {
    let body = json!({ "email": email, "password": password });
    let data = gateway
        .request(RequestDescriptor::post("/login").body(body))
        .await?;
    store_credentials(gateway, &data)?;
    tracing::info!("Logged in as {}", email);
    Ok(data)
}

/// Register a company account and store the returned credential
pub async fn register(
    gateway: &Gateway,
    company_name: &str,
    email: &str,
    password: &str,
) -> Result<Value> {
    let body = json!({
        "company_name": company_name,
        "email": email,
        "password": password,
    });
    let data = gateway
        .request(RequestDescriptor::post("/register").body(body))
        .await?;
    store_credentials(gateway, &data)?;
    tracing::info!("Registered {} as {}", company_name, email);
    Ok(data)
}

fn store_credentials(gateway: &Gateway, data: &Value) -> Result<()> {
    let auth = AuthResponse::deserialize(data)
        .map_err(|e| RequestFailed::new(format!("Malformed authentication response: {}", e)))?;
    gateway.session().establish(&auth.access_token, &auth.user)?;
    Ok(())
}

/// Drop the credential and cached user record
pub fn logout(gateway: &Gateway) -> Result<()> {
    gateway.session().clear()?;
    tracing::info!("Logged out");
    Ok(())
}

pub fn is_authenticated(gateway: &Gateway) -> bool {
    gateway.session().is_authenticated()
}

pub fn current_user(gateway: &Gateway) -> Result<Option<Value>> {
    Ok(gateway.session().current_user()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use mockito::Matcher;

    #[tokio::test]
    async fn login_then_reuse_then_logout() {
        let mut server = mockito::Server::new_async().await;
        let login_mock = server
            .mock("POST", "/login")
            .match_body(Matcher::Json(json!({"email": "a@b.co", "password": "pw"})))
            .with_status(200)
            .with_body(r#"{"access_token": "T", "user": {"id": 1, "email": "a@b.co"}}"#)
            .create_async()
            .await;
        let authed = server
            .mock("GET", "/invoices")
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let gw = Gateway::new(server.url(), Session::in_memory(), None).unwrap();
        let data = login(&gw, "a@b.co", "pw").await.unwrap();
        assert_eq!(data["access_token"], "T");
        assert!(is_authenticated(&gw));
        assert_eq!(
            current_user(&gw).unwrap(),
            Some(json!({"id": 1, "email": "a@b.co"}))
        );

        gw.request(RequestDescriptor::get("/invoices")).await.unwrap();
        login_mock.assert_async().await;
        authed.assert_async().await;

        logout(&gw).unwrap();
        assert!(!is_authenticated(&gw));
        assert_eq!(current_user(&gw).unwrap(), None);

        let anonymous = server
            .mock("GET", "/invoices")
            .match_header("authorization", Matcher::Missing)
            .with_status(401)
            .with_body(r#"{"error": "Missing token"}"#)
            .create_async()
            .await;
        let err = gw.request(RequestDescriptor::get("/invoices")).await.unwrap_err();
        assert_eq!(err.message, "Missing token");
        anonymous.assert_async().await;
    }

    #[tokio::test]
    async fn failed_login_stores_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(401)
            .with_body(r#"{"error": "Invalid email or password"}"#)
            .create_async()
            .await;

        let gw = Gateway::new(server.url(), Session::in_memory(), None).unwrap();
        let err = login(&gw, "a@b.co", "wrong").await.unwrap_err();
        assert_eq!(err.message, "Invalid email or password");
        assert!(!is_authenticated(&gw));
    }

    #[tokio::test]
    async fn register_stores_credential() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/register")
            .match_body(Matcher::Json(json!({
                "company_name": "Acme",
                "email": "ops@acme.io",
                "password": "hunter2",
            })))
            .with_status(201)
            .with_body(r#"{"access_token": "R", "user": {"company_name": "Acme"}}"#)
            .create_async()
            .await;

        let gw = Gateway::new(server.url(), Session::in_memory(), None).unwrap();
        register(&gw, "Acme", "ops@acme.io", "hunter2").await.unwrap();
        assert_eq!(gw.session().credential().unwrap().as_deref(), Some("R"));
    }

    #[tokio::test]
    async fn login_without_user_leaves_no_cached_record() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(200)
            .with_body(r#"{"access_token": "T", "user": null}"#)
            .create_async()
            .await;

        let gw = Gateway::new(server.url(), Session::in_memory(), None).unwrap();
        login(&gw, "a@b.co", "pw").await.unwrap();
        assert!(is_authenticated(&gw));
        assert_eq!(current_user(&gw).unwrap(), None);
    }

    #[tokio::test]
    async fn success_without_token_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(200)
            .with_body(r#"{"message": "ok"}"#)
            .create_async()
            .await;

        let gw = Gateway::new(server.url(), Session::in_memory(), None).unwrap();
        let err = login(&gw, "a@b.co", "pw").await.unwrap_err();
        assert!(err.message.starts_with("Malformed authentication response"));
        assert!(!is_authenticated(&gw));
    }
}
