//! Section registry and fallback resolution
//!
//! Every content section is registered once at startup with its shape, its
//! static fallback and its cache directive. Registration rejects a fallback
//! that fails its own shape, so a wiring defect stops startup instead of
//! showing up on first render.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::error;

use super::cache::CacheDirective;
use super::schema::{validate, Shape};
use super::{ContentError, Section};

/// Everything the loader needs to know about one section
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub name: &'static str,
    pub shape: Shape,
    /// Pre-validated default value
    pub fallback: Value,
    pub cache: CacheDirective,
}

impl SectionSpec {
    /// Registration entry of a typed section
    pub fn of<S: Section>() -> Result<Self, ContentError> {
        let fallback =
            serde_json::to_value(S::fallback()).map_err(|e| ContentError::InvalidFallback {
                section: S::NAME.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            name: S::NAME,
            shape: S::shape(),
            fallback,
            cache: S::cache_directive(),
        })
    }
}

/// Name → section entry map, fixed after startup
#[derive(Debug, Default, Clone)]
pub struct SectionRegistry {
    sections: BTreeMap<&'static str, SectionSpec>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section after checking its fallback against its shape
    pub fn register(&mut self, mut spec: SectionSpec) -> Result<(), ContentError> {
        if self.sections.contains_key(spec.name) {
            return Err(ContentError::DuplicateSection(spec.name.to_string()));
        }

        spec.fallback = validate(&spec.fallback, &spec.shape).map_err(|violations| {
            let reason = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            error!(section = %spec.name, %reason, "Fallback does not satisfy its own shape");
            ContentError::InvalidFallback {
                section: spec.name.to_string(),
                reason,
            }
        })?;

        self.sections.insert(spec.name, spec);
        Ok(())
    }

    /// Chaining form of [`register`](Self::register) for typed sections
    pub fn with<S: Section>(mut self) -> Result<Self, ContentError> {
        self.register(SectionSpec::of::<S>()?)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&SectionSpec, ContentError> {
        self.sections
            .get(name)
            .ok_or_else(|| ContentError::UnknownSection(name.to_string()))
    }

    /// The registered fallback value for `name`
    pub fn fallback(&self, name: &str) -> Result<&Value, ContentError> {
        self.get(name).map(|spec| &spec.fallback)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionSpec> {
        self.sections.values()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
