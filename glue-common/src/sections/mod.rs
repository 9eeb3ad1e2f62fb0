//! Catalog of the site's content sections
//!
//! One module per section: its typed payload, its shape, its fallback and
//! its cache directive. [`standard_registry`] registers all of them.

pub mod carousel;
pub mod citizens;
pub mod colors;
pub mod events;
pub mod menu;
pub mod plans;
pub mod press;
pub mod sponsors;

pub use carousel::{Carousel, CarouselImage};
pub use citizens::{Citizen, Citizens};
pub use colors::MainColors;
pub use events::{EventDay, EventDays};
pub use menu::{Menu, MenuItem};
pub use plans::{PlanOffer, Plans};
pub use press::{PressItem, PressItems, PressKind};
pub use sponsors::{Sponsor, SponsorTier, Sponsors};

use crate::content::{ContentError, SectionRegistry};

/// Tag shared by sections that appear on every page
pub const SITE_TAG: &str = "site";

/// Registry with every section of the catalog
pub fn standard_registry() -> Result<SectionRegistry, ContentError> {
    SectionRegistry::new()
        .with::<MainColors>()?
        .with::<Citizens>()?
        .with::<Carousel>()?
        .with::<EventDays>()?
        .with::<PressItems>()?
        .with::<Sponsors>()?
        .with::<Menu>()?
        .with::<Plans>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{validate, validate_typed, Section};
    use serde_json::json;

    fn assert_fallback_valid<S: Section + PartialEq + std::fmt::Debug>() {
        let fallback = serde_json::to_value(S::fallback()).unwrap();
        let decoded: S = validate_typed(&fallback, &S::shape())
            .unwrap_or_else(|v| panic!("{} fallback invalid: {:?}", S::NAME, v));
        assert_eq!(decoded, S::fallback());
    }

    #[test]
    fn test_every_fallback_satisfies_its_shape() {
        assert_fallback_valid::<MainColors>();
        assert_fallback_valid::<Citizens>();
        assert_fallback_valid::<Carousel>();
        assert_fallback_valid::<EventDays>();
        assert_fallback_valid::<PressItems>();
        assert_fallback_valid::<Sponsors>();
        assert_fallback_valid::<Menu>();
        assert_fallback_valid::<Plans>();
    }

    #[test]
    fn test_standard_registry_contents() {
        let registry = standard_registry().unwrap();
        let names: Vec<&str> = registry.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "carousel",
                "citizens",
                "event-days",
                "main-colors",
                "menu",
                "plans",
                "press-items",
                "sponsors"
            ]
        );
        for spec in registry.iter() {
            assert!(validate(&spec.fallback, &spec.shape).is_ok(), "{}", spec.name);
            assert!(spec.cache.tags.iter().any(|t| t == spec.name));
        }
    }

    #[test]
    fn test_citizens_empty_title_rejected() {
        let payload = json!({"title": "", "description": "ok for now", "citizensByYear": {}});
        let violations = validate(&payload, &Citizens::shape()).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "$.title");
        assert_eq!(violations[0].rule.code(), "min_length");
    }

    #[test]
    fn test_event_days_defaults_to_hidden() {
        let value = validate(&json!({}), &EventDays::shape()).unwrap();
        assert_eq!(value, json!({"isVisible": false, "days": []}));
    }

    #[test]
    fn test_sponsor_tier_enum() {
        let payload = json!({
            "title": "Partners",
            "sponsors": [{
                "name": "Acme",
                "logo": "https://acme.example/logo.png",
                "tier": "platinum"
            }]
        });
        let violations = validate(&payload, &Sponsors::shape()).unwrap_err();
        assert_eq!(violations[0].path, "$.sponsors[0].tier");
        assert_eq!(violations[0].rule.code(), "enum");
    }

    #[test]
    fn test_menu_ordered() {
        let menu = Menu {
            items: vec![
                MenuItem {
                    label: "B".into(),
                    href: "/b".into(),
                    position: 2,
                },
                MenuItem {
                    label: "A".into(),
                    href: "/a".into(),
                    position: 1,
                },
            ],
        };
        let labels: Vec<&str> = menu.ordered().iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }
}
