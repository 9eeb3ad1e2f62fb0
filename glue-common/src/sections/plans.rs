//! Membership plans offered to participants

use serde::{Deserialize, Serialize};

use crate::content::{CacheDirective, Field, Section, Shape};
use crate::plan::Plan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plans {
    pub plans: Vec<PlanOffer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOffer {
    pub id: Plan,
    pub name: String,
    /// Yearly price in euros
    pub price: u32,
    pub features: Vec<String>,
}

impl Section for Plans {
    const NAME: &'static str = "plans";

    fn shape() -> Shape {
        let offer = Shape::object(vec![
            Field::required("id", Shape::one_of(Plan::NAMES)),
            Field::required("name", Shape::text(1)),
            Field::required("price", Shape::integer(Some(0.0), Some(100_000.0))),
            Field::optional("features", Shape::list(Shape::text(1), 0))
                .or_default(serde_json::json!([])),
        ]);
        Shape::object(vec![Field::required("plans", Shape::list(offer, 1))])
    }

    fn fallback() -> Self {
        let offer = |id, name: &str, price, features: &[&str]| PlanOffer {
            id,
            name: name.to_string(),
            price,
            features: features.iter().map(|f| f.to_string()).collect(),
        };
        Self {
            plans: vec![
                offer(Plan::Free, "Free", 0, &["Listed on the map"]),
                offer(Plan::Basic, "Basic", 150, &["Public profile", "Listed on the map"]),
                offer(
                    Plan::Premium,
                    "Premium",
                    400,
                    &["Public profile", "Listed on the map", "Featured on the home page"],
                ),
            ],
        }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(3600, &[Self::NAME])
    }
}
