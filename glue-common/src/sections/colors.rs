//! Main color palette of the site

use serde::{Deserialize, Serialize};

use crate::content::{CacheDirective, Field, Section, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainColors {
    pub box1: String,
    pub box2: String,
    pub box3: String,
    pub box4: String,
    pub triangle: String,
}

impl Section for MainColors {
    const NAME: &'static str = "main-colors";

    fn shape() -> Shape {
        Shape::object(vec![
            Field::required("box1", Shape::hex_color()),
            Field::required("box2", Shape::hex_color()),
            Field::required("box3", Shape::hex_color()),
            Field::required("box4", Shape::hex_color()),
            Field::required("triangle", Shape::hex_color()),
        ])
    }

    fn fallback() -> Self {
        Self {
            box1: "#10069f".to_string(),
            box2: "#230052".to_string(),
            box3: "#000000".to_string(),
            box4: "#db8861".to_string(),
            triangle: "#ffa16c".to_string(),
        }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(3600, &[Self::NAME, super::SITE_TAG])
    }
}
