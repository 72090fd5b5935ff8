use crate::challenge::{ChallengeIdentifier, ChallengeSolution};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload version the game server currently accepts.
pub const SUBMISSION_VERSION: f64 = 1.2;

/// Points earned in one currency (e.g. `"BP"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedPoints {
    pub amount: u64,
}

/// Click count for one in-game asset (e.g. `"CLOVER"`, `"BOMB"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetClicks {
    pub clicks: u64,
}

/// Game result submitted together with a solved challenge.
///
/// Maps are ordered so that a record always serializes to the
/// same bytes; the set of assets varies between events, so they
/// are keyed by name rather than fixed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub version:       f64,
    pub game_id:       ChallengeIdentifier,
    pub challenge:     ChallengeSolution,
    pub earned_points: BTreeMap<String, EarnedPoints>,
    pub asset_clicks:  BTreeMap<String, AssetClicks>,
    pub is_node:       bool,
}

impl SubmissionRecord {
    /// Creates a record at the current version with no points,
    /// no clicks, and `is_node` unset.
    pub fn new(game_id: ChallengeIdentifier, challenge: ChallengeSolution) -> Self {
        Self {
            version: SUBMISSION_VERSION,
            game_id,
            challenge,
            earned_points: BTreeMap::new(),
            asset_clicks: BTreeMap::new(),
            is_node: false,
        }
    }

    pub fn with_points(mut self, currency: impl Into<String>, amount: u64) -> Self {
        self.earned_points.insert(currency.into(), EarnedPoints { amount });
        self
    }

    pub fn with_asset_clicks(mut self, asset: impl Into<String>, clicks: u64) -> Self {
        self.asset_clicks.insert(asset.into(), AssetClicks { clicks });
        self
    }

    pub fn with_node(mut self, is_node: bool) -> Self {
        self.is_node = is_node;
        self
    }

    /// Sum of points over every currency, saturating.
    pub fn total_points(&self) -> u64 {
        self.earned_points
            .values()
            .fold(0u64, |total, points| total.saturating_add(points.amount))
    }
}
