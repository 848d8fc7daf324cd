// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Postcard sightings: the report the service builds from a new postcard,
//! and how each sighting in it can be finished.

use super::collection::{Media, Species};
use super::null_as_default;
use base64::{
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
    Engine as _,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Lowest confidence (percent) accepted for a best-guess species.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 10.0;

const BIRD_MATCH: &str = "BIRD";

/// What the service recognized in one sighting, from its `__typename`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SightingType {
    #[serde(rename = "SightingCantDecideWhichBird")]
    CantDecideWhichBird,
    #[serde(rename = "SightingNoBird")]
    NoBird,
    #[serde(rename = "SightingNoBirdRecognized")]
    NoBirdRecognized,
    #[serde(rename = "SightingRecognizedBird")]
    RecognizedBird,
    /// First sighting of a species
    #[serde(rename = "SightingRecognizedBirdUnlocked")]
    RecognizedBirdUnlocked,
    #[serde(rename = "SightingRecognizedMysteryVisitor")]
    RecognizedMysteryVisitor,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SightingType {
    pub fn is_recognized(self) -> bool {
        matches!(
            self,
            SightingType::RecognizedBird | SightingType::RecognizedBirdUnlocked
        )
    }

    pub fn is_unlocked(self) -> bool {
        self == SightingType::RecognizedBirdUnlocked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedSpecies {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Candidate species offered for an undecided sighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "__typename", default)]
    pub typename: Option<String>,
    #[serde(default)]
    pub species: Option<SuggestedSpecies>,
}

/// Media chosen as the cover of a newly unlocked species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverMedia {
    pub species_id: String,
    pub media_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    pub id: String,
    #[serde(rename = "__typename", default, deserialize_with = "null_as_default")]
    pub sighting_type: SightingType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub match_tokens: Vec<String>,
    #[serde(default)]
    pub species: Option<Species>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<Suggestion>,
}

impl Sighting {
    pub fn is_recognized(&self) -> bool {
        self.sighting_type.is_recognized()
    }

    pub fn is_unlocked(&self) -> bool {
        self.sighting_type.is_unlocked()
    }

    /// Suggested bird species, in the order the service ranked them.
    pub fn bird_suggestions(&self) -> impl Iterator<Item = &SuggestedSpecies> {
        self.suggestions
            .iter()
            .filter(|s| s.typename.as_deref() == Some("CollectionSpecies"))
            .filter_map(|s| s.species.as_ref())
            .filter(|species| species.typename.as_deref() == Some("SpeciesBird"))
    }

    pub fn cover_media(&self) -> Option<CoverMedia> {
        Some(CoverMedia {
            species_id: self.species.as_ref()?.id.clone(),
            media_id: self.match_tokens.first()?.clone(),
        })
    }
}

/// One species candidate carried in the report token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMatch {
    #[serde(default)]
    pub confidence: f64,
    pub species_code: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ReportMatch {
    fn is_bird(&self) -> bool {
        self.kind == BIRD_MATCH
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportItem {
    match_token: String,
    #[serde(default)]
    items: Vec<ReportMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportTokenBody {
    #[serde(default, deserialize_with = "null_as_default")]
    report_items: Vec<ReportItem>,
}

/// How far the caller lets [`finish_postcard`](crate::BirdBuddy::finish_postcard)
/// go in resolving sightings the service was unsure about. Ordered from
/// strictest to most permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SightingFinishStrategy {
    /// Only keep what the service recognized
    #[default]
    Recognized,
    /// Also pick the most confident species candidate
    BestGuess,
    /// Also turn unresolvable sightings into mystery visitors
    Mystery,
}

/// The step recommended for one sighting.
#[derive(Debug, Clone, PartialEq)]
pub enum FinishStep {
    Recognized,
    BestGuess { species_id: String, confidence: f64 },
    Mystery,
}

impl FinishStep {
    pub fn strategy(&self) -> SightingFinishStrategy {
        match self {
            FinishStep::Recognized => SightingFinishStrategy::Recognized,
            FinishStep::BestGuess { .. } => SightingFinishStrategy::BestGuess,
            FinishStep::Mystery => SightingFinishStrategy::Mystery,
        }
    }
}

/// Options for finishing a postcard.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishOptions {
    pub strategy: SightingFinishStrategy,
    pub confidence_threshold: f64,
    /// Share the postcard media with the community afterwards
    pub share_media: bool,
}

impl Default for FinishOptions {
    fn default() -> Self {
        Self {
            strategy: SightingFinishStrategy::default(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            share_media: false,
        }
    }
}

/// Sightings found on one postcard, plus the token that ties later
/// choices to this report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingReport {
    #[serde(default)]
    pub report_token: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sightings: Vec<Sighting>,
}

impl SightingReport {
    /// Decoded report token, if it can be read.
    ///
    /// The token is either JSON or a signed `header.payload.signature`
    /// string whose payload holds the JSON under `reportToken`.
    fn token_body(&self) -> Option<ReportTokenBody> {
        let token = self.report_token.as_deref()?;
        let json = if token.matches('.').count() == 2 {
            signed_token_payload(token)?
        } else {
            serde_json::from_str(token).ok()?
        };
        match serde_json::from_value(json) {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(error = %e, "Unable to decode report token");
                None
            }
        }
    }

    /// Most confident bird candidate per match token.
    ///
    /// Falls back to the first suggested species (at the default threshold)
    /// when the token cannot be read.
    pub fn highest_confidence_matches(&self) -> HashMap<String, ReportMatch> {
        let Some(body) = self.token_body() else {
            tracing::warn!("Cannot decode report token, using suggestions");
            return self
                .sightings
                .iter()
                .filter_map(|s| {
                    let token = s.match_tokens.first()?;
                    let species = s.bird_suggestions().next()?;
                    Some((
                        token.clone(),
                        ReportMatch {
                            confidence: DEFAULT_CONFIDENCE_THRESHOLD,
                            species_code: species.id.clone(),
                            kind: BIRD_MATCH.to_string(),
                        },
                    ))
                })
                .collect();
        };

        body.report_items
            .into_iter()
            .filter_map(|item| {
                let best = item
                    .items
                    .into_iter()
                    .filter(ReportMatch::is_bird)
                    .max_by(|a, b| a.confidence.total_cmp(&b.confidence))?;
                Some((item.match_token, best))
            })
            .collect()
    }

    /// Recommended step for every sighting, in report order.
    pub fn finishing_plan(&self, confidence_threshold: f64) -> Vec<(&Sighting, FinishStep)> {
        let matches = self.highest_confidence_matches();
        self.sightings
            .iter()
            .map(|sighting| {
                if sighting.is_recognized() {
                    return (sighting, FinishStep::Recognized);
                }
                let guess = sighting
                    .match_tokens
                    .iter()
                    .filter_map(|token| matches.get(token))
                    .find(|m| m.is_bird() && m.confidence >= confidence_threshold);
                let step = match guess {
                    Some(m) => FinishStep::BestGuess {
                        species_id: m.species_code.clone(),
                        confidence: m.confidence,
                    },
                    None => FinishStep::Mystery,
                };
                (sighting, step)
            })
            .collect()
    }

    /// Covers for every species this report unlocks.
    pub fn unlocked_covers(&self) -> Vec<CoverMedia> {
        self.sightings
            .iter()
            .filter(|s| s.is_unlocked())
            .filter_map(Sighting::cover_media)
            .collect()
    }
}

fn signed_token_payload(token: &str) -> Option<Value> {
    let payload = token.split('.').nth(1)?.trim_end_matches('=');
    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;
    let outer: Value = serde_json::from_slice(&decoded).ok()?;
    match outer.get("reportToken")? {
        Value::String(inner) => serde_json::from_str(inner).ok(),
        inner @ Value::Object(_) => Some(inner.clone()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightingFeeder {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Result of turning a postcard into a sighting report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostcardSighting {
    #[serde(default)]
    pub feeder: Option<SightingFeeder>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub medias: Vec<Media>,
    #[serde(default)]
    pub video_media: Option<Media>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sighting_report: SightingReport,
}
