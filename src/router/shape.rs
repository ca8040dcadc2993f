//! # Input Shapes
//!
//! Declarative shapes a procedure can attach to its input. Validation
//! collects every violation rather than stopping at the first, so the
//! error envelope can report the full set of issues as a JSON array.
//!
//! Semantics:
//! - No implicit type coercion
//! - `optional` accepts absent input or a missing field
//! - `nullable` accepts an explicit JSON null
//! - Undeclared fields are ignored (procedures own their input surface)

use serde::Serialize;
use serde_json::Value;

/// Shape of a procedure's declared input
#[derive(Debug, Clone)]
pub struct InputShape {
    kind: ShapeKind,
    optional: bool,
    nullable: bool,
}

/// Supported shape kinds
#[derive(Debug, Clone)]
pub enum ShapeKind {
    /// Any JSON value
    Any,
    /// UTF-8 string
    String,
    /// Integer or float
    Number,
    /// Boolean
    Bool,
    /// Object with declared field shapes
    Object(Vec<(String, InputShape)>),
    /// Homogeneous array (boxed to allow recursive shapes)
    Array(Box<InputShape>),
}

impl ShapeKind {
    /// Type name used in issue messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Any => "any",
            ShapeKind::String => "string",
            ShapeKind::Number => "number",
            ShapeKind::Bool => "boolean",
            ShapeKind::Object(_) => "object",
            ShapeKind::Array(_) => "array",
        }
    }
}

impl InputShape {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            optional: false,
            nullable: false,
        }
    }

    /// Any JSON value, including absence
    pub fn any() -> Self {
        Self::new(ShapeKind::Any).optional().nullable()
    }

    /// Required string
    pub fn string() -> Self {
        Self::new(ShapeKind::String)
    }

    /// Required number
    pub fn number() -> Self {
        Self::new(ShapeKind::Number)
    }

    /// Required boolean
    pub fn boolean() -> Self {
        Self::new(ShapeKind::Bool)
    }

    /// Required object with the given field shapes
    pub fn object(fields: Vec<(&str, InputShape)>) -> Self {
        Self::new(ShapeKind::Object(
            fields
                .into_iter()
                .map(|(name, shape)| (name.to_string(), shape))
                .collect(),
        ))
    }

    /// Required homogeneous array
    pub fn array(element: InputShape) -> Self {
        Self::new(ShapeKind::Array(Box::new(element)))
    }

    /// Accept absent input / missing field
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Accept an explicit JSON null
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Accept both absence and null
    pub fn nullish(self) -> Self {
        self.optional().nullable()
    }

    /// Validate a value against this shape, collecting every issue.
    ///
    /// `None` models "no input provided"; shapes that accept absence
    /// produce no issue for it.
    pub fn check(&self, value: Option<&Value>) -> Vec<ShapeIssue> {
        let mut issues = Vec::new();
        self.check_at(value, &mut Vec::new(), &mut issues);
        issues
    }

    fn check_at(&self, value: Option<&Value>, path: &mut Vec<Value>, issues: &mut Vec<ShapeIssue>) {
        let value = match value {
            None => {
                if !self.optional {
                    issues.push(ShapeIssue::required(self.kind.type_name(), path));
                }
                return;
            }
            Some(Value::Null) => {
                if !self.nullable {
                    issues.push(ShapeIssue::invalid_type(
                        self.kind.type_name(),
                        "null",
                        path,
                    ));
                }
                return;
            }
            Some(value) => value,
        };

        match (&self.kind, value) {
            (ShapeKind::Any, _) => {}
            (ShapeKind::String, Value::String(_)) => {}
            (ShapeKind::Number, Value::Number(_)) => {}
            (ShapeKind::Bool, Value::Bool(_)) => {}
            (ShapeKind::Object(fields), Value::Object(map)) => {
                for (name, shape) in fields {
                    path.push(Value::from(name.as_str()));
                    shape.check_at(map.get(name), path, issues);
                    path.pop();
                }
            }
            (ShapeKind::Array(element), Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    path.push(Value::from(index));
                    element.check_at(Some(item), path, issues);
                    path.pop();
                }
            }
            (kind, other) => issues.push(ShapeIssue::invalid_type(
                kind.type_name(),
                json_type_name(other),
                path,
            )),
        }
    }
}

/// One validation violation
#[derive(Debug, Clone, Serialize)]
pub struct ShapeIssue {
    /// Issue class; currently always `invalid_type`
    pub code: &'static str,
    pub expected: &'static str,
    pub received: &'static str,
    /// Path within the input (field names and array indices)
    pub path: Vec<Value>,
    pub message: String,
}

impl ShapeIssue {
    fn required(expected: &'static str, path: &[Value]) -> Self {
        Self {
            code: "invalid_type",
            expected,
            received: "undefined",
            path: path.to_vec(),
            message: "Required".to_string(),
        }
    }

    fn invalid_type(expected: &'static str, received: &'static str, path: &[Value]) -> Self {
        Self {
            code: "invalid_type",
            expected,
            received,
            path: path.to_vec(),
            message: format!("Expected {}, received {}", expected, received),
        }
    }
}

/// JSON type name of a value, for issue messages
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn who_shape() -> InputShape {
        InputShape::object(vec![(
            "who",
            InputShape::object(vec![("name", InputShape::string().nullish())]),
        )])
    }

    #[test]
    fn test_valid_input_passes() {
        let issues = who_shape().check(Some(&json!({"who": {"name": "Lilja"}})));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_input_is_required() {
        let issues = who_shape().check(None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].received, "undefined");
        assert_eq!(issues[0].message, "Required");
        assert!(issues[0].path.is_empty());
    }

    #[test]
    fn test_nullish_shape_accepts_absence() {
        let shape = who_shape().nullish();
        assert!(shape.check(None).is_empty());
        assert!(shape.check(Some(&json!(null))).is_empty());
    }

    #[test]
    fn test_wrong_type_reports_path() {
        let issues = who_shape().check(Some(&json!({"who": [[]]})));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].expected, "object");
        assert_eq!(issues[0].received, "array");
        assert_eq!(issues[0].path, vec![json!("who")]);
    }

    #[test]
    fn test_all_issues_collected() {
        let shape = InputShape::object(vec![
            ("a", InputShape::string()),
            ("b", InputShape::number()),
        ]);
        let issues = shape.check(Some(&json!({"a": 1, "b": "x"})));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_array_element_path_uses_index() {
        let shape = InputShape::array(InputShape::number());
        let issues = shape.check(Some(&json!([1, "two", 3])));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, vec![json!(1)]);
    }

    #[test]
    fn test_issues_serialize_as_json_array() {
        let issues = who_shape().check(None);
        let rendered = serde_json::to_value(&issues).unwrap();
        assert_eq!(
            rendered,
            json!([{
                "code": "invalid_type",
                "expected": "object",
                "received": "undefined",
                "path": [],
                "message": "Required"
            }])
        );
    }
}
