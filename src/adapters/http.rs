//! Shared blocking HTTP plumbing for the data-source adapters.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER};
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{AppError, HttpConfig};

pub const ACCEPT_JSON: &str = "application/json";
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const MAX_ERROR_BODY_CHARS: usize = 200;

/// Build the client shared by every provider of one resolver.
///
/// Upstream sites reject requests without a browser-like referer/origin, so
/// those are installed as default headers together with the user agent.
pub fn build_client(config: &HttpConfig) -> Result<Client, AppError> {
    let mut headers = HeaderMap::new();
    insert_header(&mut headers, REFERER, &config.referer)?;
    insert_header(&mut headers, ORIGIN, &config.origin)?;
    insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language)?;

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let value = HeaderValue::from_str(value)
        .map_err(|e| AppError::config_error(format!("Invalid {} header: {}", name, e)))?;
    headers.insert(name, value);
    Ok(())
}

/// Resolve `path` below `base`, keeping any path prefix `base` already has.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, AppError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| AppError::config_error(format!("Invalid endpoint '{}': {}", path, e)))
}

/// GET `url` and decode the JSON body.
pub fn get_json<T: DeserializeOwned>(client: &Client, url: &Url) -> Result<T, AppError> {
    let body = send(client.get(url.clone()).header(ACCEPT, ACCEPT_JSON), url)?;
    serde_json::from_str(&body).map_err(|e| {
        AppError::upstream(format!("Malformed JSON from {}: {}", url.path(), e), None)
    })
}

/// GET `url` and return the body as text.
pub fn get_text(client: &Client, url: &Url, accept: &str) -> Result<String, AppError> {
    send(client.get(url.clone()).header(ACCEPT, accept), url)
}

fn send(request: RequestBuilder, url: &Url) -> Result<String, AppError> {
    debug!("GET {}", url);
    let response = request.send().map_err(|e| {
        let message = if e.is_timeout() {
            format!("Request to {} timed out", url.path())
        } else {
            format!("HTTP request to {} failed: {}", url.path(), e)
        };
        AppError::upstream(message, None)
    })?;

    let status = response.status();
    let body = response.text().unwrap_or_default();

    if status.is_success() {
        return Ok(body);
    }

    let snippet: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
    let message = if snippet.is_empty() {
        format!("HTTP {} from {}", status.as_u16(), url.path())
    } else {
        format!("HTTP {} from {}: {}", status.as_u16(), url.path(), snippet)
    };
    Err(AppError::upstream(message, Some(status.as_u16())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_prefix() {
        let base = Url::parse("https://example.com/mirror").unwrap();
        let url = endpoint(&base, "/api/server/list").unwrap();
        assert_eq!(url.as_str(), "https://example.com/mirror/api/server/list");

        let root = Url::parse("https://example.com").unwrap();
        assert_eq!(
            endpoint(&root, "character/search").unwrap().as_str(),
            "https://example.com/character/search"
        );
    }

    #[test]
    fn client_sends_browser_like_headers() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/probe")
            .match_header("user-agent", "Aion2Guide/test")
            .match_header("referer", "https://aion2.plaync.com/")
            .match_header("origin", "https://aion2.plaync.com")
            .match_header("accept", ACCEPT_JSON)
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .create();

        let config = HttpConfig { user_agent: "Aion2Guide/test".into(), ..Default::default() };
        let client = build_client(&config).unwrap();
        let url = endpoint(&Url::parse(&server.url()).unwrap(), "/probe").unwrap();

        let value: serde_json::Value = get_json(&client, &url).unwrap();
        assert_eq!(value["ok"], true);
        mock.assert();
    }

    #[test]
    fn non_success_status_is_upstream_error() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/down").with_status(503).with_body("maintenance").create();

        let client = build_client(&HttpConfig::default()).unwrap();
        let url = endpoint(&Url::parse(&server.url()).unwrap(), "/down").unwrap();

        let err = get_text(&client, &url, ACCEPT_HTML).unwrap_err();
        assert!(matches!(
            err,
            AppError::Upstream { status: Some(503), ref message } if message.contains("maintenance")
        ));
    }

    #[test]
    fn malformed_json_is_upstream_error() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", "/bad").with_status(200).with_body("<html>").create();

        let client = build_client(&HttpConfig::default()).unwrap();
        let url = endpoint(&Url::parse(&server.url()).unwrap(), "/bad").unwrap();

        let err = get_json::<serde_json::Value>(&client, &url).unwrap_err();
        assert!(err.to_string().contains("Malformed JSON"));
    }
}
