// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Language tag handling for localized responses (species names etc).

use crate::error::ValidationError;
use language_tags::LanguageTag;
use std::fmt;
use std::str::FromStr;

/// A validated, canonical BCP 47 language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and canonicalize a language tag.
    ///
    /// POSIX-style separators (`en_US`) are accepted and rewritten.
    pub fn parse(tag: &str) -> Result<Self, ValidationError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyLanguageCode);
        }

        let normalized = trimmed.replace('_', "-");
        let invalid = |reason: String| ValidationError::InvalidLanguageCode {
            tag: tag.to_string(),
            reason,
        };

        let parsed = LanguageTag::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
        let canonical = parsed.canonicalize().map_err(|e| invalid(e.to_string()))?;

        Ok(Self(canonical.as_str().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
