//! Difficulty levels and search depth bounds

use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Depth used by [`Difficulty::Medium`]
pub const MEDIUM_DEPTH: u32 = 2;

/// How many plies the search may explore before scoring a position as a draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthBound {
    Bounded(u32),
    Unbounded,
}

impl DepthBound {
    /// True once `depth` plies have been searched
    pub fn reached(self, depth: u32) -> bool {
        match self {
            DepthBound::Bounded(limit) => depth >= limit,
            DepthBound::Unbounded => false,
        }
    }
}

impl fmt::Display for DepthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthBound::Bounded(n) => write!(f, "{}", n),
            DepthBound::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// How the computer picks its move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Uniformly random legal move
    Random,
    /// Minimax down to the given bound
    Search(DepthBound),
}

/// Opponent strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Search depth for this level. Easy reports the degenerate bound 0 but
    /// never searches.
    pub fn depth_bound(self) -> DepthBound {
        match self {
            Difficulty::Easy => DepthBound::Bounded(0),
            Difficulty::Medium => DepthBound::Bounded(MEDIUM_DEPTH),
            Difficulty::Hard => DepthBound::Unbounded,
        }
    }

    pub fn strategy(self) -> Strategy {
        match self {
            Difficulty::Easy => Strategy::Random,
            level => Strategy::Search(level.depth_bound()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        assert_eq!(Difficulty::Easy.strategy(), Strategy::Random);
        assert_eq!(Difficulty::Easy.depth_bound(), DepthBound::Bounded(0));
        assert_eq!(
            Difficulty::Medium.strategy(),
            Strategy::Search(DepthBound::Bounded(2))
        );
        assert_eq!(
            Difficulty::Hard.strategy(),
            Strategy::Search(DepthBound::Unbounded)
        );
    }

    #[test]
    fn test_bound_reached() {
        assert!(DepthBound::Bounded(0).reached(0));
        assert!(!DepthBound::Bounded(2).reached(1));
        assert!(DepthBound::Bounded(2).reached(2));
        assert!(!DepthBound::Unbounded.reached(u32::MAX));
    }

    #[test]
    fn test_parse() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!(matches!(
            "insane".parse::<Difficulty>(),
            Err(GameError::UnknownDifficulty(_))
        ));
        for level in Difficulty::ALL {
            assert_eq!(level.to_string().parse::<Difficulty>(), Ok(level));
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let back: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(back, Difficulty::Easy);
    }
}
