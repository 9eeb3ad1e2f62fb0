//! Citizens of honour, grouped by year

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::content::{CacheDirective, Field, Section, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citizens {
    pub title: String,
    pub description: String,
    /// Year → citizens honoured that year
    pub citizens_by_year: BTreeMap<String, Vec<Citizen>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citizen {
    pub name: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn citizen_shape() -> Shape {
    Shape::object(vec![
        Field::required("name", Shape::text(1)),
        Field::required("image", Shape::url()),
        Field::optional("description", Shape::string()),
    ])
}

impl Section for Citizens {
    const NAME: &'static str = "citizens";

    fn shape() -> Shape {
        Shape::object(vec![
            Field::required("title", Shape::text(1)),
            Field::required("description", Shape::text(1)),
            Field::required("citizensByYear", Shape::map(Shape::list(citizen_shape(), 0))),
        ])
    }

    fn fallback() -> Self {
        Self {
            title: "Citizens of Honour".to_string(),
            description: "Every year GLUE honours the people who keep the community together."
                .to_string(),
            citizens_by_year: BTreeMap::new(),
        }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(3600, &[Self::NAME])
    }
}
