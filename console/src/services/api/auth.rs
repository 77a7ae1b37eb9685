//! # Authentication Endpoints
//!
//! `POST /auth/login` and `GET /auth/me`.

use super::client::{ApiClient, RequestOptions};
use crate::core::error::Result;
use shared::{LoginRequest, TokenResponse, User};

/// Exchange credentials for a token.
///
/// A success without a body yields an empty [`TokenResponse`]; judging
/// whether a token is present is the session store's job.
#[tracing::instrument(skip(client, password))]
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<TokenResponse> {
    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response = client
        .request::<TokenResponse>("/auth/login", RequestOptions::post(&request)?)
        .await?;

    Ok(response.unwrap_or_default())
}

/// Profile and roles of the token holder.
pub async fn current_user(client: &ApiClient) -> Result<User> {
    client.get("/auth/me").await
}
