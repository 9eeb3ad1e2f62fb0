//! Sponsors and partners

use serde::{Deserialize, Serialize};

use crate::content::{CacheDirective, Field, Section, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsors {
    pub title: String,
    pub sponsors: Vec<Sponsor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    pub name: String,
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub tier: SponsorTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SponsorTier {
    Gold,
    Silver,
    Bronze,
}

impl Section for Sponsors {
    const NAME: &'static str = "sponsors";

    fn shape() -> Shape {
        let sponsor = Shape::object(vec![
            Field::required("name", Shape::text(1)),
            Field::required("logo", Shape::url()),
            Field::optional("website", Shape::url()),
            Field::required("tier", Shape::one_of(&["gold", "silver", "bronze"])),
        ]);
        Shape::object(vec![
            Field::required("title", Shape::text(1)),
            Field::required("sponsors", Shape::list(sponsor, 0)),
        ])
    }

    fn fallback() -> Self {
        Self {
            title: "Our partners".to_string(),
            sponsors: Vec::new(),
        }
    }

    fn cache_directive() -> CacheDirective {
        CacheDirective::new(3600, &[Self::NAME])
    }
}
