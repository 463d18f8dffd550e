//! HTTP side of the server API.

use besedka_server::infrastructure::dto::http::{ErrorResponseDto, RegisterResponseDto};
use reqwest::{StatusCode, Url};

use crate::error::ClientError;

/// Register `name` and return the issued credential.
pub async fn register(server: &str, name: &str) -> Result<String, ClientError> {
    let url = endpoint_url(parse_server_url(server)?, server, &["accounts", name])?;
    let response = reqwest::Client::new()
        .post(url)
        .send()
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::CREATED {
        let body: RegisterResponseDto = response
            .json()
            .await
            .map_err(|e| ClientError::Registration(e.to_string()))?;
        tracing::info!("{}", body.message);
        return Ok(body.credential);
    }

    let detail = match response.json::<ErrorResponseDto>().await {
        Ok(body) => body.detail,
        Err(_) => status.to_string(),
    };
    Err(ClientError::Registration(detail))
}

/// Build the chat socket URL from the server's HTTP base URL.
///
/// `http://` becomes `ws://` and `https://` becomes `wss://`.
/// The name and credential are percent-encoded as single path segments.
pub fn websocket_url(server: &str, name: &str, credential: &str) -> Result<String, ClientError> {
    let mut base = parse_server_url(server)?;
    let scheme = match base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        _ => return Err(ClientError::InvalidServerUrl(server.to_string())),
    };
    base.set_scheme(scheme)
        .map_err(|_| ClientError::InvalidServerUrl(server.to_string()))?;

    let url = endpoint_url(base, server, &["connect", name, credential])?;
    Ok(url.into())
}

fn parse_server_url(server: &str) -> Result<Url, ClientError> {
    let url = Url::parse(server).map_err(|_| ClientError::InvalidServerUrl(server.to_string()))?;
    match url.scheme() {
        "http" | "https" | "ws" | "wss" => Ok(url),
        _ => Err(ClientError::InvalidServerUrl(server.to_string())),
    }
}

/// Append `segments` to the base path, escaping each one.
fn endpoint_url(mut base: Url, server: &str, segments: &[&str]) -> Result<Url, ClientError> {
    base.path_segments_mut()
        .map_err(|_| ClientError::InvalidServerUrl(server.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(base)
}
