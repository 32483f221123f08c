//! Todo Schema
//!
//! Wire shapes for the DummyJSON todo endpoints plus the local validation
//! rules applied before a payload is sent.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ValidationError};

pub const TODO_TEXT_REQUIRED: &str = "Todo text is required";

/// Todo as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    pub todo: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: u32,
}

/// Envelope returned by `GET /todos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodosResponse {
    pub todos: Vec<Todo>,
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

/// Payload for `POST /todos/add`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodo {
    pub todo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
}

impl CreateTodo {
    /// Payload the create form submits: trimmed text, not completed, demo user 1.
    pub fn from_input(text: &str) -> Self {
        Self {
            todo: text.trim().to_string(),
            completed: Some(false),
            user_id: Some(1),
        }
    }

    /// Check the payload and return the copy that should be sent.
    pub fn validate(&self) -> Result<CreateTodo, ValidationError> {
        let todo = validate_text(&self.todo)?;
        Ok(CreateTodo {
            todo,
            ..self.clone()
        })
    }
}

/// Payload for `PUT /todos/{id}`; absent fields are left alone by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
}

impl UpdateTodo {
    pub fn text(text: &str) -> Self {
        Self {
            todo: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<UpdateTodo, ValidationError> {
        let todo = match &self.todo {
            Some(text) => Some(validate_text(text)?),
            None => None,
        };
        Ok(UpdateTodo {
            todo,
            ..self.clone()
        })
    }

    /// Apply the patch locally, as the server would.
    pub fn apply_to(&self, todo: &Todo) -> Todo {
        Todo {
            id: todo.id,
            todo: self.todo.clone().unwrap_or_else(|| todo.todo.clone()),
            completed: self.completed.unwrap_or(todo.completed),
            user_id: self.user_id.unwrap_or(todo.user_id),
        }
    }
}

/// Body of `PATCH /todos/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePayload {
    pub completed: bool,
}

fn validate_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("todo", TODO_TEXT_REQUIRED));
    }
    Ok(trimmed.to_string())
}

/// Parse a JSON body into `T`, reporting shape mismatches as validation errors.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|e| ValidationError::new("response", format!("invalid response: {}", e)).into())
}

/// Client-local identity of a cached todo.
///
/// Fetched todos are keyed by their id. Todos inserted after a create get a
/// random suffix because the demo backend hands out colliding ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoKey(String);

impl TodoKey {
    pub fn from_id(id: u32) -> Self {
        Self(id.to_string())
    }

    pub fn synthetic(id: u32, suffix: &str) -> Self {
        Self(format!("{}-{}", id, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A todo as held in the client cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedTodo {
    pub key: TodoKey,
    pub todo: Todo,
}

impl CachedTodo {
    pub fn fetched(todo: Todo) -> Self {
        Self {
            key: TodoKey::from_id(todo.id),
            todo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_uses_camel_case_user_id() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":1,"todo":"Walk","completed":false,"userId":26}"#).unwrap();
        assert_eq!(todo.user_id, 26);
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["userId"], 26);
    }

    #[test]
    fn test_todo_rejects_wrong_types() {
        let err = parse_body::<Todo>(r#"{"id":"1","todo":"Walk","completed":false,"userId":26}"#)
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref v) if v.field == "response"));
    }

    #[test]
    fn test_todo_ignores_unknown_fields() {
        let todo = parse_body::<Todo>(
            r#"{"id":3,"todo":"Read","completed":true,"userId":1,"isDeleted":true}"#,
        )
        .unwrap();
        assert!(todo.completed);
    }

    #[test]
    fn test_create_rejects_blank_text() {
        for text in ["", "   ", "\t\n"] {
            let err = CreateTodo::from_input(text).validate().unwrap_err();
            assert_eq!(err.field, "todo");
            assert_eq!(err.message, TODO_TEXT_REQUIRED);
        }
    }

    #[test]
    fn test_create_trims_and_defaults() {
        let payload = CreateTodo::from_input("  Buy milk ").validate().unwrap();
        assert_eq!(payload.todo, "Buy milk");
        assert_eq!(payload.completed, Some(false));
        assert_eq!(payload.user_id, Some(1));
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let json = serde_json::to_value(UpdateTodo::text("New")).unwrap();
        assert_eq!(json, serde_json::json!({ "todo": "New" }));
        assert!(UpdateTodo::text(" ").validate().is_err());
        assert!(UpdateTodo::default().validate().is_ok());
    }

    #[test]
    fn test_update_apply_to_keeps_unset_fields() {
        let todo = Todo { id: 4, todo: "Old".into(), completed: true, user_id: 9 };
        let patched = UpdateTodo::text("New").apply_to(&todo);
        assert_eq!(patched, Todo { id: 4, todo: "New".into(), completed: true, user_id: 9 });
    }

    #[test]
    fn test_keys() {
        assert_eq!(TodoKey::from_id(7).as_str(), "7");
        assert_eq!(TodoKey::synthetic(255, "ab12").to_string(), "255-ab12");
    }
}
