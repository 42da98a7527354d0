use std::fmt;

use thiserror::Error;

/// Number of fun facts generated for each planet.
pub const FUN_FACT_COUNT: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanetError {
    #[error("planet name cannot be empty")]
    EmptyName,

    #[error("fun fact {index} is empty")]
    EmptyFact { index: usize },

    #[error("expected {expected} fun facts, got {actual}")]
    FactCount { expected: usize, actual: usize },
}

//
// ─── PLANET NAME ──────────────────────────────────────────────────────────────
//

/// Name of a planet as reported by the recognition model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanetName(String);

impl PlanetName {
    /// # Errors
    ///
    /// Returns `PlanetError::EmptyName` if the trimmed name is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, PlanetError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlanetError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased name, used for lookups such as illustrations.
    #[must_use]
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for PlanetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── FUN FACTS ────────────────────────────────────────────────────────────────
//

/// Exactly [`FUN_FACT_COUNT`] short sentences about a planet, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunFacts(Vec<String>);

impl FunFacts {
    /// Build from a complete list of facts.
    ///
    /// # Errors
    ///
    /// Returns `PlanetError::FactCount` unless exactly [`FUN_FACT_COUNT`] facts are given,
    /// or `PlanetError::EmptyFact` if any of them is blank.
    pub fn new(facts: Vec<String>) -> Result<Self, PlanetError> {
        if facts.len() != FUN_FACT_COUNT {
            return Err(PlanetError::FactCount {
                expected: FUN_FACT_COUNT,
                actual: facts.len(),
            });
        }
        let mut cleaned = Vec::with_capacity(facts.len());
        for (index, fact) in facts.into_iter().enumerate() {
            let trimmed = fact.trim();
            if trimmed.is_empty() {
                return Err(PlanetError::EmptyFact { index });
            }
            cleaned.push(trimmed.to_string());
        }
        Ok(Self(cleaned))
    }

    /// Build from model output: blank entries are dropped and extras beyond
    /// [`FUN_FACT_COUNT`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns `PlanetError::FactCount` if fewer than [`FUN_FACT_COUNT`] usable facts remain.
    pub fn from_generated(facts: impl IntoIterator<Item = String>) -> Result<Self, PlanetError> {
        let usable: Vec<String> = facts
            .into_iter()
            .filter(|fact| !fact.trim().is_empty())
            .take(FUN_FACT_COUNT)
            .collect();
        Self::new(usable)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Facts joined into the single passage the quiz is generated from.
    #[must_use]
    pub fn quiz_source(&self) -> String {
        self.0.join(" ")
    }

    /// Facts joined into the script read aloud by narration.
    #[must_use]
    pub fn narration_script(&self) -> String {
        self.0.join(". ")
    }
}
