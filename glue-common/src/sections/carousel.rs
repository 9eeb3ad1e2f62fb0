//! Home page image carousel

use serde::{Deserialize, Serialize};

use crate::content::{CacheDirective, Field, Section, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carousel {
    pub images: Vec<CarouselImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselImage {
    pub src: String,
    pub alt: String,
}

impl Section for Carousel {
    const NAME: &'static str = "carousel";

    fn shape() -> Shape {
        let image = Shape::object(vec![
            Field::required("src", Shape::url()),
            Field::required("alt", Shape::text(1)),
        ]);
        Shape::object(vec![Field::required("images", Shape::list(image, 1))])
    }

    fn fallback() -> Self {
        Self {
            images: vec![CarouselImage {
                src: "https://static.glue.brussels/carousel/default.jpg".to_string(),
                alt: "GLUE design route".to_string(),
            }],
        }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(3600, &[Self::NAME])
    }
}
