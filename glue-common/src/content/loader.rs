//! Fetch → validate → fallback orchestration
//!
//! [`ContentLoader::load`] always produces a shape-valid value for a
//! registered section. Network failures, error statuses and malformed
//! payloads are logged and answered with the section's fallback; none of
//! them is retried. In [`LoaderMode::Offline`] the fetcher is never called.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::fallback::{SectionRegistry, SectionSpec};
use super::fetcher::{FetchError, RemoteFetcher};
use super::schema::{validate, Violation};
use super::{ContentError, Section};

/// Whether a live backend is reachable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderMode {
    #[default]
    Live,
    /// Build-time or otherwise backend-less: serve fallbacks only
    Offline,
}

/// Where a loaded value came from. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Remote,
    Fallback,
}

/// Outcome of one load
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> FetchResult<T> {
    pub fn remote(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Remote,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            provenance: Provenance::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

enum LoadFailure {
    Fetch(FetchError),
    Invalid(Vec<Violation>),
}

/// Fallback-safe content loader
#[derive(Clone)]
pub struct ContentLoader {
    registry: Arc<SectionRegistry>,
    fetcher: Arc<dyn RemoteFetcher>,
    mode: LoaderMode,
}

impl ContentLoader {
    pub fn new(
        registry: Arc<SectionRegistry>,
        fetcher: Arc<dyn RemoteFetcher>,
        mode: LoaderMode,
    ) -> Self {
        Self {
            registry,
            fetcher,
            mode,
        }
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn mode(&self) -> LoaderMode {
        self.mode
    }

    /// Load section `name`
    ///
    /// The only error is [`ContentError::UnknownSection`], a wiring defect.
    pub async fn load(&self, name: &str) -> Result<FetchResult<Value>, ContentError> {
        let spec = self.registry.get(name)?;

        if self.mode == LoaderMode::Offline {
            debug!(section = %name, "Offline mode, serving fallback");
            return Ok(FetchResult::fallback(spec.fallback.clone()));
        }

        match self.fetch_validated(spec).await {
            Ok(value) => {
                debug!(section = %name, "Loaded section from backend");
                Ok(FetchResult::remote(value))
            }
            Err(LoadFailure::Fetch(e)) => {
                warn!(
                    section = %name,
                    failure = e.kind(),
                    error = %e,
                    "Section fetch failed, serving fallback"
                );
                Ok(FetchResult::fallback(spec.fallback.clone()))
            }
            Err(LoadFailure::Invalid(violations)) => {
                let rules = violations
                    .iter()
                    .map(|v| format!("{}={}", v.path, v.rule.code()))
                    .collect::<Vec<_>>()
                    .join(",");
                warn!(
                    section = %name,
                    failure = "validation_failure",
                    violations = %rules,
                    count = violations.len(),
                    "Section payload failed validation, serving fallback"
                );
                Ok(FetchResult::fallback(spec.fallback.clone()))
            }
        }
    }

    /// Load a typed section; never fails
    pub async fn load_typed<S: Section>(&self) -> FetchResult<S> {
        let result = match self.load(S::NAME).await {
            Ok(result) => result,
            Err(e) => {
                error!(section = S::NAME, error = %e, "Section missing from registry");
                return FetchResult::fallback(S::fallback());
            }
        };

        let provenance = result.provenance;
        match serde_json::from_value::<S>(result.value) {
            Ok(value) => FetchResult { value, provenance },
            Err(e) => {
                warn!(
                    section = S::NAME,
                    failure = "validation_failure",
                    error = %e,
                    "Section payload did not decode, serving fallback"
                );
                FetchResult::fallback(S::fallback())
            }
        }
    }

    async fn fetch_validated(&self, spec: &SectionSpec) -> Result<Value, LoadFailure> {
        let response = self
            .fetcher
            .fetch(spec.name, &spec.cache)
            .await
            .map_err(LoadFailure::Fetch)?;

        if !(200..300).contains(&response.status) {
            return Err(LoadFailure::Fetch(FetchError::NonSuccessStatus(
                response.status,
            )));
        }

        validate(&response.body, &spec.shape).map_err(LoadFailure::Invalid)
    }
}
