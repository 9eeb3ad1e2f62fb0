//! Main navigation menu

use serde::{Deserialize, Serialize};

use crate::content::{CacheDirective, Field, Section, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
    pub position: u8,
}

impl Menu {
    /// Items in display order
    pub fn ordered(&self) -> Vec<&MenuItem> {
        let mut items: Vec<&MenuItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.position);
        items
    }
}

impl Section for Menu {
    const NAME: &'static str = "menu";

    fn shape() -> Shape {
        let item = Shape::object(vec![
            Field::required("label", Shape::text(1)),
            Field::required("href", Shape::text(1)),
            Field::required("position", Shape::integer(Some(0.0), Some(99.0))),
        ]);
        Shape::object(vec![Field::required("items", Shape::list(item, 1))])
    }

    fn fallback() -> Self {
        let item = |label: &str, href: &str, position| MenuItem {
            label: label.to_string(),
            href: href.to_string(),
            position,
        };
        Self {
            items: vec![
                item("Home", "/", 0),
                item("About", "/about", 1),
                item("Participants", "/participants", 2),
                item("Events", "/events", 3),
            ],
        }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(3600, &[Self::NAME, super::SITE_TAG])
    }
}
