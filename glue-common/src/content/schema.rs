//! Shape descriptors and the schema validator
//!
//! A [`Shape`] declares what one content section payload must look like.
//! [`validate`] walks a raw `serde_json::Value` against it and either returns
//! the normalized value (optional defaults filled in) or every violation
//! found, each tagged with the field path and the rule it broke.
//!
//! Unknown fields are ignored and kept as-is, so a payload that already
//! conforms comes back unchanged.
//!
//! # Examples
//!
//! ```
//! use glue_common::content::schema::{validate, Field, Shape};
//! use serde_json::json;
//!
//! let shape = Shape::object(vec![
//!     Field::required("title", Shape::text(1)),
//!     Field::optional("isVisible", Shape::boolean()).or_default(json!(false)),
//! ]);
//!
//! let value = validate(&json!({"title": "Hello"}), &shape).unwrap();
//! assert_eq!(value, json!({"title": "Hello", "isVisible": false}));
//!
//! let violations = validate(&json!({"title": ""}), &shape).unwrap_err();
//! assert_eq!(violations[0].path, "$.title");
//! assert_eq!(violations[0].rule.code(), "min_length");
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// String format constraints beyond length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// Absolute http(s) URL
    Url,
    /// `#rgb` or `#rrggbb`
    HexColor,
}

/// Declared shape of a payload (or of one field inside it)
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    String {
        min_len: usize,
        format: Option<StringFormat>,
        one_of: Option<&'static [&'static str]>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    Bool,
    Array {
        items: Box<Shape>,
        min_items: usize,
    },
    /// Object with a fixed set of known fields
    Object(Vec<Field>),
    /// Object with arbitrary keys, all values sharing one shape
    Map(Box<Shape>),
}

impl Shape {
    /// Any string
    pub fn string() -> Self {
        Self::text(0)
    }

    /// String of at least `min_len` characters
    pub fn text(min_len: usize) -> Self {
        Shape::String {
            min_len,
            format: None,
            one_of: None,
        }
    }

    pub fn url() -> Self {
        Shape::String {
            min_len: 1,
            format: Some(StringFormat::Url),
            one_of: None,
        }
    }

    pub fn hex_color() -> Self {
        Shape::String {
            min_len: 1,
            format: Some(StringFormat::HexColor),
            one_of: None,
        }
    }

    /// String restricted to an enumerated set
    pub fn one_of(allowed: &'static [&'static str]) -> Self {
        Shape::String {
            min_len: 0,
            format: None,
            one_of: Some(allowed),
        }
    }

    pub fn number(min: Option<f64>, max: Option<f64>) -> Self {
        Shape::Number {
            min,
            max,
            integer: false,
        }
    }

    pub fn integer(min: Option<f64>, max: Option<f64>) -> Self {
        Shape::Number {
            min,
            max,
            integer: true,
        }
    }

    pub fn boolean() -> Self {
        Shape::Bool
    }

    pub fn list(items: Shape, min_items: usize) -> Self {
        Shape::Array {
            items: Box::new(items),
            min_items,
        }
    }

    pub fn map(values: Shape) -> Self {
        Shape::Map(Box::new(values))
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Shape::Object(fields)
    }

    /// JSON type name used in type-mismatch violations
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::String { .. } => "string",
            Shape::Number { integer: true, .. } => "integer",
            Shape::Number { .. } => "number",
            Shape::Bool => "boolean",
            Shape::Array { .. } => "array",
            Shape::Object(_) | Shape::Map(_) => "object",
        }
    }
}

/// One named field of an object shape
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
    pub required: bool,
    /// Value inserted when an optional field is missing or null
    pub default: Option<Value>,
}

impl Field {
    pub fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: false,
            default: None,
        }
    }

    pub fn or_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// A constraint that a payload value failed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Required,
    Type { expected: &'static str },
    MinLength { min: usize, actual: usize },
    #[serde(rename = "enum")]
    OneOf { allowed: Vec<&'static str> },
    Url,
    HexColor,
    Range { min: Option<f64>, max: Option<f64> },
    MinItems { min: usize, actual: usize },
}

impl Rule {
    /// Stable identifier for alerting and API error details
    pub fn code(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Type { .. } => "type",
            Rule::MinLength { .. } => "min_length",
            Rule::OneOf { .. } => "enum",
            Rule::Url => "url",
            Rule::HexColor => "hex_color",
            Rule::Range { .. } => "range",
            Rule::MinItems { .. } => "min_items",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "field is required"),
            Rule::Type { expected } => write!(f, "expected {}", expected),
            Rule::MinLength { min, actual } => {
                write!(f, "length {} is below minimum {}", actual, min)
            }
            Rule::OneOf { allowed } => write!(f, "must be one of [{}]", allowed.join(", ")),
            Rule::Url => write!(f, "must be an absolute http(s) URL"),
            Rule::HexColor => write!(f, "must be a #rgb or #rrggbb color"),
            Rule::Range { min, max } => match (min, max) {
                (Some(min), Some(max)) => write!(f, "must be between {} and {}", min, max),
                (Some(min), None) => write!(f, "must be at least {}", min),
                (None, Some(max)) => write!(f, "must be at most {}", max),
                (None, None) => write!(f, "out of range"),
            },
            Rule::MinItems { min, actual } => {
                write!(f, "{} item(s), at least {} required", actual, min)
            }
        }
    }
}

/// Field path plus the rule violated there
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub path: String,
    #[serde(flatten)]
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.rule)
    }
}

/// Validate `payload` against `shape`
///
/// Returns the normalized value, or all violations found.
pub fn validate(payload: &Value, shape: &Shape) -> Result<Value, Vec<Violation>> {
    let mut violations = Vec::new();
    let normalized = check(payload, shape, "$", &mut violations);
    if violations.is_empty() {
        Ok(normalized)
    } else {
        Err(violations)
    }
}

/// Validate against `shape`, then deserialize into `T`
///
/// A deserialization failure after a clean shape check means the shape and
/// the Rust type disagree; it is reported as a root type violation.
pub fn validate_typed<T: DeserializeOwned>(
    payload: &Value,
    shape: &Shape,
) -> Result<T, Vec<Violation>> {
    let normalized = validate(payload, shape)?;
    serde_json::from_value(normalized).map_err(|e| {
        tracing::error!(error = %e, "Shape accepted payload but typed decode failed");
        vec![Violation {
            path: "$".to_string(),
            rule: Rule::Type {
                expected: shape.type_name(),
            },
        }]
    })
}

fn check(value: &Value, shape: &Shape, path: &str, out: &mut Vec<Violation>) -> Value {
    match (shape, value) {
        (
            Shape::String {
                min_len,
                format,
                one_of,
            },
            Value::String(s),
        ) => {
            let len = s.chars().count();
            if len < *min_len {
                fail(out, path, Rule::MinLength {
                    min: *min_len,
                    actual: len,
                });
            }
            if let Some(allowed) = one_of {
                if !allowed.contains(&s.as_str()) {
                    fail(out, path, Rule::OneOf {
                        allowed: allowed.to_vec(),
                    });
                }
            }
            match format {
                Some(StringFormat::Url) if len > 0 && !is_http_url(s) => fail(out, path, Rule::Url),
                Some(StringFormat::HexColor) if len > 0 && !is_hex_color(s) => {
                    fail(out, path, Rule::HexColor)
                }
                _ => {}
            }
            value.clone()
        }
        (Shape::Number { min, max, integer }, Value::Number(n)) => {
            if *integer && !(n.is_i64() || n.is_u64()) {
                fail(out, path, Rule::Type {
                    expected: "integer",
                });
            } else if let Some(v) = n.as_f64() {
                let below = min.map_or(false, |m| v < m);
                let above = max.map_or(false, |m| v > m);
                if below || above {
                    fail(out, path, Rule::Range {
                        min: *min,
                        max: *max,
                    });
                }
            }
            value.clone()
        }
        (Shape::Bool, Value::Bool(_)) => value.clone(),
        (Shape::Array { items, min_items }, Value::Array(elements)) => {
            if elements.len() < *min_items {
                fail(out, path, Rule::MinItems {
                    min: *min_items,
                    actual: elements.len(),
                });
            }
            let normalized = elements
                .iter()
                .enumerate()
                .map(|(i, element)| check(element, items, &format!("{}[{}]", path, i), out))
                .collect();
            Value::Array(normalized)
        }
        (Shape::Object(fields), Value::Object(map)) => {
            Value::Object(check_object(map, fields, path, out))
        }
        (Shape::Map(values), Value::Object(map)) => {
            let normalized = map
                .iter()
                .map(|(key, v)| {
                    let child = check(v, values, &format!("{}.{}", path, key), out);
                    (key.clone(), child)
                })
                .collect();
            Value::Object(normalized)
        }
        (shape, _) => {
            fail(out, path, Rule::Type {
                expected: shape.type_name(),
            });
            value.clone()
        }
    }
}

fn fail(out: &mut Vec<Violation>, path: &str, rule: Rule) {
    out.push(Violation {
        path: path.to_string(),
        rule,
    });
}

fn check_object(
    map: &Map<String, Value>,
    fields: &[Field],
    path: &str,
    out: &mut Vec<Violation>,
) -> Map<String, Value> {
    // unknown keys survive untouched
    let mut normalized = map.clone();

    for field in fields {
        let field_path = format!("{}.{}", path, field.name);
        match map.get(field.name) {
            Some(v) if !v.is_null() => {
                let child = check(v, &field.shape, &field_path, out);
                normalized.insert(field.name.to_string(), child);
            }
            _ => {
                if let Some(default) = &field.default {
                    normalized.insert(field.name.to_string(), default.clone());
                } else if field.required {
                    out.push(Violation {
                        path: field_path,
                        rule: Rule::Required,
                    });
                }
            }
        }
    }

    normalized
}

fn is_http_url(s: &str) -> bool {
    match reqwest::Url::parse(s) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> Shape {
        Shape::object(vec![
            Field::required("name", Shape::text(1)),
            Field::optional("site", Shape::url()),
            Field::optional("tier", Shape::one_of(&["gold", "silver"])),
            Field::optional("rank", Shape::integer(Some(0.0), Some(10.0))),
        ])
    }

    fn codes(violations: &[Violation]) -> Vec<(&str, &str)> {
        violations
            .iter()
            .map(|v| (v.path.as_str(), v.rule.code()))
            .collect()
    }

    #[test]
    fn test_valid_payload_unchanged() {
        let payload = json!({"name": "Ada", "site": "https://ada.example", "rank": 3});
        assert_eq!(validate(&payload, &person()).unwrap(), payload);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let payload = json!({"name": "Ada", "extra": {"nested": true}});
        let value = validate(&payload, &person()).unwrap();
        assert_eq!(value["extra"]["nested"], true);
    }

    #[test]
    fn test_missing_required_field() {
        let violations = validate(&json!({}), &person()).unwrap_err();
        assert_eq!(codes(&violations), vec![("$.name", "required")]);
    }

    #[test]
    fn test_null_counts_as_missing() {
        let violations = validate(&json!({"name": null}), &person()).unwrap_err();
        assert_eq!(violations[0].rule, Rule::Required);

        // optional null without default is accepted as-is
        let value = validate(&json!({"name": "Ada", "site": null}), &person()).unwrap();
        assert!(value["site"].is_null());
    }

    #[test]
    fn test_defaults_fill_missing_optional() {
        let shape = Shape::object(vec![
            Field::optional("isVisible", Shape::boolean()).or_default(json!(true)),
        ]);
        assert_eq!(validate(&json!({}), &shape).unwrap(), json!({"isVisible": true}));
    }

    #[test]
    fn test_collects_every_violation() {
        let payload = json!({"name": "", "site": "ftp://files", "tier": "platinum", "rank": 11});
        let violations = validate(&payload, &person()).unwrap_err();
        assert_eq!(
            codes(&violations),
            vec![
                ("$.name", "min_length"),
                ("$.site", "url"),
                ("$.tier", "enum"),
                ("$.rank", "range"),
            ]
        );
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let violations = validate(&json!({"name": "A", "rank": 2.5}), &person()).unwrap_err();
        assert_eq!(violations[0].rule, Rule::Type { expected: "integer" });
    }

    #[test]
    fn test_type_mismatch_reports_expected() {
        let violations = validate(&json!({"name": 42}), &person()).unwrap_err();
        assert_eq!(violations[0].rule, Rule::Type { expected: "string" });

        let violations = validate(&json!([1, 2]), &person()).unwrap_err();
        assert_eq!(violations[0].path, "$");
    }

    #[test]
    fn test_empty_array_below_min_items() {
        let shape = Shape::list(Shape::text(1), 1);
        let violations = validate(&json!([]), &shape).unwrap_err();
        assert_eq!(violations[0].rule, Rule::MinItems { min: 1, actual: 0 });
    }

    #[test]
    fn test_nested_paths() {
        let shape = Shape::object(vec![Field::required(
            "byYear",
            Shape::map(Shape::list(person(), 0)),
        )]);
        let payload = json!({"byYear": {"2024": [{"name": "Ada"}, {"name": ""}]}});
        let violations = validate(&payload, &shape).unwrap_err();
        assert_eq!(codes(&violations), vec![("$.byYear.2024[1].name", "min_length")]);
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#10069f"));
        assert!(is_hex_color("#FFF"));
        assert!(!is_hex_color("10069f"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#gggggg"));
    }

    #[test]
    fn test_url_format() {
        assert!(is_http_url("https://glue.example/images/a.jpg"));
        assert!(is_http_url("http://localhost:8080"));
        assert!(!is_http_url("/images/a.jpg"));
        assert!(!is_http_url("mailto:hi@glue.example"));
    }

    #[test]
    fn test_validate_typed() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Person {
            name: String,
        }
        let ada: Person = validate_typed(&json!({"name": "Ada"}), &person()).unwrap();
        assert_eq!(ada.name, "Ada");
        assert!(validate_typed::<Person>(&json!({"name": ""}), &person()).is_err());
    }

    #[test]
    fn test_violation_serialization() {
        let v = Violation {
            path: "$.title".to_string(),
            rule: Rule::MinLength { min: 1, actual: 0 },
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, json!({"path": "$.title", "rule": "min_length", "min": 1, "actual": 0}));
        assert_eq!(v.to_string(), "$.title: length 0 is below minimum 1");
    }
}
