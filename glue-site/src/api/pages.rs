//! Page compositions
//!
//! Each page loads its sections concurrently through the content loader.
//! A page always renders: failed sections are already replaced by their
//! fallback, and which ones were is only logged.

use axum::{extract::State, routing::get, Json, Router};
use glue_common::content::{FetchResult, Provenance, Section};
use glue_common::sections::{
    Carousel, Citizens, EventDays, MainColors, Menu, MenuItem, Plans, PressItems, Sponsors,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::db::{self, Participant};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub colors: MainColors,
    pub menu: Vec<MenuItem>,
    pub carousel: Carousel,
    pub press: PressItems,
    pub sponsors: Sponsors,
    /// Public participants on the premium plan
    pub featured: Vec<Participant>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutPage {
    pub colors: MainColors,
    pub menu: Vec<MenuItem>,
    pub citizens: Citizens,
    pub event_days: EventDays,
}

#[derive(Debug, Serialize)]
pub struct PlansPage {
    pub colors: MainColors,
    pub menu: Vec<MenuItem>,
    pub plans: Plans,
}

fn menu_items(menu: Menu) -> Vec<MenuItem> {
    menu.ordered().into_iter().cloned().collect()
}

fn log_render(page: &str, provenances: &[(&str, Provenance)]) {
    let fallbacks: Vec<&str> = provenances
        .iter()
        .filter(|(_, p)| *p == Provenance::Fallback)
        .map(|(name, _)| *name)
        .collect();
    debug!(page, fallbacks = ?fallbacks, "Page rendered");
}

fn provenance<S: Section>(result: &FetchResult<S>) -> (&'static str, Provenance) {
    (S::NAME, result.provenance)
}

/// GET /pages/home
pub async fn home(State(state): State<AppState>) -> Json<HomePage> {
    let loader = &state.loader;
    let (colors, menu, carousel, press, sponsors) = tokio::join!(
        loader.load_typed::<MainColors>(),
        loader.load_typed::<Menu>(),
        loader.load_typed::<Carousel>(),
        loader.load_typed::<PressItems>(),
        loader.load_typed::<Sponsors>()
    );
    log_render(
        "home",
        &[
            provenance(&colors),
            provenance(&menu),
            provenance(&carousel),
            provenance(&press),
            provenance(&sponsors),
        ],
    );

    let featured = match db::participants::list_public(&state.db).await {
        Ok(participants) => participants
            .into_iter()
            .filter(|p| p.plan.is_featured())
            .collect(),
        Err(e) => {
            warn!(error = %e, "Featured participants unavailable");
            Vec::new()
        }
    };

    Json(HomePage {
        colors: colors.into_value(),
        menu: menu_items(menu.into_value()),
        carousel: carousel.into_value(),
        press: press.into_value(),
        sponsors: sponsors.into_value(),
        featured,
    })
}

/// GET /pages/about
pub async fn about(State(state): State<AppState>) -> Json<AboutPage> {
    let loader = &state.loader;
    let (colors, menu, citizens, event_days) = tokio::join!(
        loader.load_typed::<MainColors>(),
        loader.load_typed::<Menu>(),
        loader.load_typed::<Citizens>(),
        loader.load_typed::<EventDays>()
    );
    log_render(
        "about",
        &[
            provenance(&colors),
            provenance(&menu),
            provenance(&citizens),
            provenance(&event_days),
        ],
    );

    Json(AboutPage {
        colors: colors.into_value(),
        menu: menu_items(menu.into_value()),
        citizens: citizens.into_value(),
        event_days: event_days.into_value(),
    })
}

/// GET /pages/plans
pub async fn plans(State(state): State<AppState>) -> Json<PlansPage> {
    let loader = &state.loader;
    let (colors, menu, plans) = tokio::join!(
        loader.load_typed::<MainColors>(),
        loader.load_typed::<Menu>(),
        loader.load_typed::<Plans>()
    );
    log_render(
        "plans",
        &[provenance(&colors), provenance(&menu), provenance(&plans)],
    );

    Json(PlansPage {
        colors: colors.into_value(),
        menu: menu_items(menu.into_value()),
        plans: plans.into_value(),
    })
}

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/pages/home", get(home))
        .route("/pages/about", get(about))
        .route("/pages/plans", get(plans))
}
