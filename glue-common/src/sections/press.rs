//! Press coverage list

use serde::{Deserialize, Serialize};

use crate::content::{CacheDirective, Field, Section, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressItems {
    pub items: Vec<PressItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressItem {
    pub title: String,
    pub url: String,
    pub kind: PressKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressKind {
    Article,
    Video,
    Podcast,
}

impl Section for PressItems {
    const NAME: &'static str = "press-items";

    fn shape() -> Shape {
        let item = Shape::object(vec![
            Field::required("title", Shape::text(1)),
            Field::required("url", Shape::url()),
            Field::required("kind", Shape::one_of(&["article", "video", "podcast"])),
            Field::optional("publishedAt", Shape::string()),
        ]);
        Shape::object(vec![Field::required("items", Shape::list(item, 0))])
    }

    fn fallback() -> Self {
        Self { items: Vec::new() }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(3600, &[Self::NAME])
    }
}
