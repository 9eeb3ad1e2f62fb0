//! Event days programme

use serde::{Deserialize, Serialize};

use crate::content::{CacheDirective, Field, Section, Shape};

/// The programme; hidden entirely while `is_visible` is false
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDays {
    pub is_visible: bool,
    pub days: Vec<EventDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDay {
    pub date: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Section for EventDays {
    const NAME: &'static str = "event-days";

    fn shape() -> Shape {
        let day = Shape::object(vec![
            Field::required("date", Shape::text(1)),
            Field::required("title", Shape::text(1)),
            Field::optional("description", Shape::string()),
        ]);
        Shape::object(vec![
            Field::optional("isVisible", Shape::boolean()).or_default(false.into()),
            Field::optional("days", Shape::list(day, 0)).or_default(serde_json::json!([])),
        ])
    }

    fn fallback() -> Self {
        Self {
            is_visible: false,
            days: Vec::new(),
        }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(600, &[Self::NAME])
    }
}
