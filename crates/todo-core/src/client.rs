//! Todo API Client
//!
//! Each operation is a `build_*` method producing an `HttpRequest` and a
//! `parse_*` method consuming the `HttpResponse`. The client holds only its
//! configuration and never touches the network.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::schema::{parse_body, CreateTodo, Todo, TodosResponse, TogglePayload, UpdateTodo};

#[derive(Debug, Clone)]
pub struct TodoClient {
    config: ApiConfig,
}

impl TodoClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // ========================
    // Request builders
    // ========================

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.config.url("/todos"))
    }

    pub fn build_get(&self, id: u32) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.todo_url(id))
    }

    /// Fails fast with `ApiError::Validation` on blank text; nothing is built.
    pub fn build_create(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let payload = input.validate()?;
        Ok(HttpRequest::new(HttpMethod::Post, self.config.url("/todos/add"))
            .with_json(to_json(&payload)?))
    }

    pub fn build_update(&self, id: u32, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let payload = input.validate()?;
        Ok(HttpRequest::new(HttpMethod::Put, self.todo_url(id)).with_json(to_json(&payload)?))
    }

    pub fn build_toggle(&self, id: u32, completed: bool) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Patch, self.todo_url(id))
            .with_json(to_json(&TogglePayload { completed })?))
    }

    pub fn build_delete(&self, id: u32) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.todo_url(id))
    }

    // ========================
    // Response parsers
    // ========================

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        let response = response.error_for_status()?;
        let envelope: TodosResponse = parse_body(&response.body)?;
        Ok(envelope.todos)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_todo(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_todo(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_todo(response)
    }

    pub fn parse_toggle(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_todo(response)
    }

    /// Delete responses carry the removed todo; only the status matters.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        response.error_for_status()?;
        Ok(())
    }

    fn todo_url(&self, id: u32) -> String {
        self.config.url(&format!("/todos/{}", id))
    }
}

fn parse_todo(response: HttpResponse) -> Result<Todo, ApiError> {
    let response = response.error_for_status()?;
    parse_body(&response.body)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Unexpected(e.to_string()))
}
