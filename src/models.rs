use serde::{Deserialize, Serialize};

/// The sole managed resource. The store assigns `id` on creation; `text` is
/// never mutated afterwards; `completed` only ever moves from false to true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    /// An absent `text` field is coerced to the empty string; there is no
    /// further validation.
    #[serde(default)]
    pub text: String,
}
