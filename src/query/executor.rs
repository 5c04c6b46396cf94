//! Selection executor
//!
//! Walks an already-parsed selection tree, calling resolvers by name and
//! assembling nested JSON. A field that fails becomes `null` and is reported
//! in `errors`; the rest of the result is still returned.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::resolver::{Node, Resolved, Resolvers};
use crate::{Error, Result};

/// One requested field with its arguments and sub-selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub args: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selections: Vec<Selection>,
}

impl Selection {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            alias: None,
            args: Map::new(),
            selections: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    /// Add plain sub-fields
    pub fn fields(mut self, names: &[&str]) -> Self {
        self.selections.extend(names.iter().map(|n| Selection::new(*n)));
        self
    }

    /// Add a nested sub-selection
    pub fn with(mut self, child: Selection) -> Self {
        self.selections.push(child);
        self
    }

    /// Key this field appears under in the result
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.field)
    }

    /// Parse a request: either one selection object or an array of them
    pub fn parse_request(text: &str) -> Result<Vec<Selection>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Request {
            Many(Vec<Selection>),
            One(Selection),
        }

        let request: Request = serde_json::from_str(text)
            .map_err(|e| Error::InvalidArgument(format!("Malformed request: {}", e)))?;
        Ok(match request {
            Request::Many(selections) => selections,
            Request::One(selection) => vec![selection],
        })
    }
}

/// A field that failed while executing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub path: Vec<Value>,
}

/// Result of executing a request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Executes selection trees against a resolver set
pub struct Executor<'a> {
    resolvers: &'a Resolvers,
}

impl<'a> Executor<'a> {
    pub fn new(resolvers: &'a Resolvers) -> Self {
        Self { resolvers }
    }

    /// Execute root selections in order
    pub fn execute(&self, selections: &[Selection]) -> Response {
        let mut data = Map::new();
        let mut errors = Vec::new();

        for selection in selections {
            let key = selection.response_key().to_string();
            let mut path = vec![Value::from(key.as_str())];
            let args = Value::Object(selection.args.clone());

            let value = match self.resolvers.resolve(&selection.field, &args) {
                Ok(resolved) => self.project(&resolved, &selection.selections, &mut path, &mut errors),
                Err(e) => {
                    errors.push(FieldError { message: e.to_string(), path: path.clone() });
                    Value::Null
                }
            };
            data.insert(key, value);
        }

        Response { data, errors }
    }

    fn project(
        &self,
        resolved: &Resolved,
        selections: &[Selection],
        path: &mut Vec<Value>,
        errors: &mut Vec<FieldError>,
    ) -> Value {
        match resolved {
            Resolved::Null => Value::Null,
            Resolved::One(node) => self.project_node(node, selections, path, errors),
            Resolved::Many(nodes) => {
                let mut items = Vec::with_capacity(nodes.len());
                for (index, node) in nodes.iter().enumerate() {
                    path.push(Value::from(index));
                    items.push(self.project_node(node, selections, path, errors));
                    path.pop();
                }
                Value::Array(items)
            }
        }
    }

    fn project_node(
        &self,
        node: &Node,
        selections: &[Selection],
        path: &mut Vec<Value>,
        errors: &mut Vec<FieldError>,
    ) -> Value {
        let mut object = Map::new();

        // No sub-selection: scalars only
        if selections.is_empty() {
            for field in node.scalar_fields() {
                if let Some(value) = node.scalar(field) {
                    object.insert(field.to_string(), value);
                }
            }
            return Value::Object(object);
        }

        for selection in selections {
            let key = selection.response_key().to_string();
            path.push(Value::from(key.as_str()));

            let value = match node.scalar(&selection.field) {
                Some(value) => value,
                None => match self.resolvers.resolve_field(node, &selection.field) {
                    Ok(resolved) => self.project(&resolved, &selection.selections, path, errors),
                    Err(e) => {
                        errors.push(FieldError { message: e.to_string(), path: path.clone() });
                        Value::Null
                    }
                },
            };

            path.pop();
            object.insert(key, value);
        }
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load, Dataset};
    use crate::storage::MemoryPersister;
    use crate::store::EntityStore;
    use serde_json::json;
    use std::sync::Arc;

    fn resolvers() -> Resolvers {
        let store = Arc::new(EntityStore::new());
        let dataset = Dataset::from_value(&json!({
            "breweries": [{ "id": "1", "name": "Guinness", "country": "Ireland" }],
            "beers": [{ "id": "1", "name": "Draught", "style": "Stout", "breweryId": "1" }],
            "users": [{ "id": "1", "name": "Ann", "email": "ann@x.io" }],
            "reviews": [{ "id": "1", "text": "Creamy", "rating": 5, "beerId": "1", "userId": "1" }]
        }))
        .unwrap();
        load(&store, &dataset).unwrap();
        Resolvers::new(store, Arc::new(MemoryPersister::new()))
    }

    #[test]
    fn test_nested_query() {
        let resolvers = resolvers();
        let request = vec![Selection::new("beer")
            .arg("id", json!("1"))
            .fields(&["id", "name", "style"])
            .with(Selection::new("brewery").fields(&["name", "country"]))];

        let response = Executor::new(&resolvers).execute(&request);
        assert!(response.is_ok());
        assert_eq!(
            Value::Object(response.data),
            json!({ "beer": {
                "id": "1", "name": "Draught", "style": "Stout",
                "brewery": { "name": "Guinness", "country": "Ireland" }
            } })
        );
    }

    #[test]
    fn test_missing_entity_is_null_without_error() {
        let resolvers = resolvers();
        let request = vec![Selection::new("beer").arg("id", json!("missing")).fields(&["id"])];

        let response = Executor::new(&resolvers).execute(&request);
        assert!(response.is_ok());
        assert_eq!(response.data["beer"], Value::Null);
    }

    #[test]
    fn test_failed_mutation_is_partial_result() {
        let resolvers = resolvers();
        let request = vec![
            Selection::new("addBeer")
                .arg("input", json!({ "name": "IPA", "style": "Ale", "breweryId": "999" }))
                .fields(&["id"]),
            Selection::new("breweries").alias("all").fields(&["id"]),
        ];

        let response = Executor::new(&resolvers).execute(&request);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].path, vec![json!("addBeer")]);
        assert!(response.errors[0].message.contains("999"));
        assert_eq!(response.data["addBeer"], Value::Null);
        assert_eq!(response.data["all"], json!([{ "id": "1" }]));
    }

    #[test]
    fn test_unknown_nested_field_reports_path() {
        let resolvers = resolvers();
        let request = vec![Selection::new("users").with(Selection::new("friends"))];

        let response = Executor::new(&resolvers).execute(&request);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].path, vec![json!("users"), json!(0), json!("friends")]);
        assert_eq!(response.data["users"], json!([{ "friends": null }]));
    }

    #[test]
    fn test_default_projection_is_scalars() {
        let resolvers = resolvers();
        let response = Executor::new(&resolvers).execute(&[Selection::new("reviews")]);
        assert_eq!(
            response.data["reviews"],
            json!([{ "id": "1", "text": "Creamy", "rating": 5 }])
        );
    }

    #[test]
    fn test_parse_request() {
        let one = Selection::parse_request(r#"{ "field": "beers", "selections": [{ "field": "name" }] }"#).unwrap();
        assert_eq!(one, vec![Selection::new("beers").fields(&["name"])]);

        let many = Selection::parse_request(r#"[{ "field": "beers" }, { "field": "users" }]"#).unwrap();
        assert_eq!(many.len(), 2);

        assert!(Selection::parse_request("{ beers }").is_err());
    }
}
