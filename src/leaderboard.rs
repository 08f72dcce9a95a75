//! Leaderboard hand-off.
//!
//! The engine never stores or fetches scores itself. A host hands the session
//! a [`Leaderboard`] holding the best score it knows about, and on game over
//! the session offers the final score to it if it beats that entry.

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::engine::Score;
use crate::error::GameError;

/// Best known score and who holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopScore {
    pub player: String,
    #[serde(rename = "topScore")]
    pub top_score: Score,
}

impl Default for TopScore {
    fn default() -> Self {
        Self { player: String::from("---"), top_score: 0 }
    }
}

impl fmt::Display for TopScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.player, self.top_score)
    }
}

/// Three ASCII letters, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Initials(String);

impl Initials {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Initials {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Initials(trimmed.to_ascii_uppercase()))
        } else {
            Err(GameError::InvalidInitials(s.to_string()))
        }
    }
}

impl fmt::Display for Initials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A place final scores can be offered to.
pub trait Leaderboard {
    /// The current best entry.
    fn top(&self) -> TopScore;

    /// Record `score` for `initials` as the new best entry.
    fn submit(&mut self, initials: &Initials, score: Score);
}

/// In-memory leaderboard holding a single top entry.
#[derive(Debug, Clone, Default)]
pub struct LocalLeaderboard {
    top: TopScore,
}

impl LocalLeaderboard {
    pub fn new(top: TopScore) -> Self {
        Self { top }
    }
}

impl Leaderboard for LocalLeaderboard {
    fn top(&self) -> TopScore {
        self.top.clone()
    }

    fn submit(&mut self, initials: &Initials, score: Score) {
        info!("new top score: {initials} - {score} (was {})", self.top);
        self.top = TopScore { player: initials.to_string(), top_score: score };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_are_normalized() {
        let i: Initials = "abc".parse().unwrap();
        assert_eq!(i.as_str(), "ABC");
        let i: Initials = " xYz ".parse().unwrap();
        assert_eq!(i.to_string(), "XYZ");
    }

    #[test]
    fn initials_reject_bad_input() {
        for bad in ["", "ab", "abcd", "a1c", "é b"] {
            assert_eq!(
                bad.parse::<Initials>(),
                Err(GameError::InvalidInitials(bad.to_string())),
                "input {bad:?}"
            );
        }
    }

    #[test]
    fn top_score_uses_camel_case_field() {
        let top: TopScore = serde_json::from_str(r#"{"player":"BOB","topScore":4096}"#).unwrap();
        assert_eq!(top, TopScore { player: "BOB".into(), top_score: 4096 });
        assert_eq!(TopScore::default().to_string(), "--- - 0");
    }

    #[test]
    fn local_leaderboard_replaces_top() {
        let mut lb = LocalLeaderboard::default();
        assert_eq!(lb.top().top_score, 0);
        lb.submit(&"ann".parse().unwrap(), 1200);
        assert_eq!(lb.top(), TopScore { player: "ANN".into(), top_score: 1200 });
    }
}
