//! Browser Transport
//!
//! Executes the requests built by `todo_core::TodoClient` with fetch.
//! Attaches the stored bearer token, enforces the request timeout and sends
//! the user to the login route when the server answers 401.

use std::time::Duration;

use futures::future::{select, Either};
use gloo_net::http::{Method, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use todo_core::{ApiConfig, ApiError, HttpMethod, HttpRequest, HttpResponse, TodoClient, TransportFailure};

fn method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Bearer token saved by the login page, if any
pub fn auth_token(config: &ApiConfig) -> Option<String> {
    local_storage()?.get_item(&config.auth_token_key).ok()?
}

/// Forget the token and leave for the login route.
fn handle_unauthorized(config: &ApiConfig) {
    log::warn!("[API] 401 received, redirecting to {}", config.login_route);
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(&config.auth_token_key);
    }
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(&config.login_route);
    }
}

async fn fetch(req: HttpRequest) -> Result<HttpResponse, TransportFailure> {
    let mut builder = RequestBuilder::new(&req.url).method(method(req.method));
    for (name, value) in &req.headers {
        builder = builder.header(name, value);
    }
    let request = match req.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| TransportFailure::Other(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| TransportFailure::NoResponse(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportFailure::NoResponse(e.to_string()))?;
    Ok(HttpResponse::new(status, body))
}

/// Run `req`, giving up after `timeout`.
async fn execute(req: HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportFailure> {
    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    let request = Box::pin(fetch(req));
    let timer = Box::pin(TimeoutFuture::new(millis));
    match select(request, timer).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => Err(TransportFailure::TimedOut),
    }
}

/// Send a request built by `client`; non-2xx responses are returned as data
/// for the matching `parse_*` method.
pub async fn send(client: &TodoClient, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let config = client.config();
    let req = req.with_bearer(auth_token(config).as_deref());
    log::debug!("[API] {} {}", req.method, req.url);

    let response = execute(req, config.timeout).await?;
    if response.requires_login() {
        handle_unauthorized(config);
    }
    Ok(response)
}
