use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use ulid::Ulid;

use crate::error::ApiError;
use crate::models::Todo;

/// Persistence seam for todo records. The production implementation talks to
/// DynamoDB; tests substitute an in-memory double.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All records, natural storage order.
    async fn list_todos(&self) -> Result<Vec<Todo>, ApiError>;

    /// Inserts a new record with `completed = false` and a store-assigned id.
    async fn create_todo(&self, text: String) -> Result<Todo, ApiError>;

    /// Sets `completed = true` on the matching record, regardless of its
    /// prior value. Returns `None` when the id does not exist.
    async fn complete_todo(&self, id: &str) -> Result<Option<Todo>, ApiError>;

    /// Removes the matching record. Deleting a non-existent id is not an
    /// error.
    async fn delete_todo(&self, id: &str) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Loads the ambient AWS configuration and verifies the table is
    /// reachable. A failed round-trip here keeps the process from serving
    /// at all.
    pub async fn connect(table_name: &str) -> Result<Self, ApiError> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| ApiError::Database(e.to_string()))?;

        Ok(Self {
            client,
            table_name: table_name.to_string(),
        })
    }
}

#[async_trait]
impl TodoStore for DynamoStore {
    async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| ApiError::Database(e.to_string()))?;

        let todos = result.items().iter().filter_map(item_to_todo).collect();

        Ok(todos)
    }

    async fn create_todo(&self, text: String) -> Result<Todo, ApiError> {
        let todo = Todo {
            id: Ulid::new().to_string(),
            text,
            completed: false,
        };

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("id", AttributeValue::S(todo.id.clone()))
            .item("text", AttributeValue::S(todo.text.clone()))
            .item("completed", AttributeValue::Bool(todo.completed))
            .send()
            .await
            .map_err(|e| ApiError::Database(e.to_string()))?;

        Ok(todo)
    }

    async fn complete_todo(&self, id: &str) -> Result<Option<Todo>, ApiError> {
        // The condition turns "id not present" into a distinct failure
        // instead of upserting a partial record.
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression("SET completed = :completed")
            .condition_expression("attribute_exists(id)")
            .expression_attribute_values(":completed", AttributeValue::Bool(true))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                let item = output
                    .attributes()
                    .ok_or_else(|| ApiError::Database("update returned no attributes".to_string()))?;
                let todo = item_to_todo(item)
                    .ok_or_else(|| ApiError::Database("failed to parse updated item".to_string()))?;
                Ok(Some(todo))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_conditional_check_failed_exception() {
                    Ok(None)
                } else {
                    Err(ApiError::Database(service_err.to_string()))
                }
            }
        }
    }

    async fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| ApiError::Database(e.to_string()))?;

        Ok(())
    }
}

fn item_to_todo(item: &HashMap<String, AttributeValue>) -> Option<Todo> {
    Some(Todo {
        id: item.get("id")?.as_s().ok()?.clone(),
        text: item.get("text")?.as_s().ok()?.clone(),
        completed: *item.get("completed")?.as_bool().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, text: &str, completed: bool) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("id".to_string(), AttributeValue::S(id.to_string())),
            ("text".to_string(), AttributeValue::S(text.to_string())),
            ("completed".to_string(), AttributeValue::Bool(completed)),
        ])
    }

    #[test]
    fn item_to_todo_maps_all_fields() {
        let todo = item_to_todo(&item("01ARZ3NDEKTSV4RRFFQ69G5FAV", "buy milk", true)).unwrap();
        assert_eq!(todo.id, "01ARZ3NDEKTSV4RRFFQ69G5FAV");
        assert_eq!(todo.text, "buy milk");
        assert!(todo.completed);
    }

    #[test]
    fn item_to_todo_missing_field_is_none() {
        let mut incomplete = item("01ARZ3NDEKTSV4RRFFQ69G5FAV", "buy milk", false);
        incomplete.remove("text");
        assert!(item_to_todo(&incomplete).is_none());
    }

    #[test]
    fn item_to_todo_wrong_type_is_none() {
        let mut mistyped = item("01ARZ3NDEKTSV4RRFFQ69G5FAV", "buy milk", false);
        mistyped.insert("completed".to_string(), AttributeValue::S("yes".to_string()));
        assert!(item_to_todo(&mistyped).is_none());
    }
}
