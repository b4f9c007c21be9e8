//! Matcher configuration.

use serde::{Deserialize, Serialize};

use crate::{GiftmatchError, Result, constants};

/// Tuning knobs for one matching invocation.
///
/// Every field has a default, so a partial JSON/TOML document deserializes
/// into a complete config.
///
/// # Cost
///
/// With the defaults every trial searches its whole tree. When every
/// participant has a candidate but no assignment exists, that tree grows
/// exponentially with the participant count: a few milliseconds at a dozen
/// people, minutes at twenty. Callers drawing for untrusted or large rosters
/// should set [`exact_feasibility`](Self::exact_feasibility), which rejects
/// such inputs in polynomial time, or
/// [`max_backtracks_per_trial`](Self::max_backtracks_per_trial), which caps
/// the work per trial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Number of independent randomized backtracking trials.
    pub max_trials: usize,
    /// Fewest participants accepted for a draw. Never below
    /// [`constants::MIN_PARTICIPANTS`].
    pub min_participants: usize,
    /// Abandon a trial after this many undo steps. `None` keeps every trial
    /// exhaustive for its ordering.
    pub max_backtracks_per_trial: Option<u64>,
    /// Prove feasibility with a maximum bipartite matching before searching.
    pub exact_feasibility: bool,
    /// Seed for a reproducible draw. `None` uses the thread-local RNG.
    pub seed: Option<u64>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_trials: constants::DEFAULT_MAX_TRIALS,
            min_participants: constants::MIN_PARTICIPANTS,
            max_backtracks_per_trial: None,
            exact_feasibility: false,
            seed: None,
        }
    }
}

impl MatcherConfig {
    /// Default config with the exact feasibility proof switched on.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            exact_feasibility: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// # Errors
    /// Returns [`GiftmatchError::Configuration`] for a zero trial budget or a
    /// participant floor below [`constants::MIN_PARTICIPANTS`].
    pub fn validate(&self) -> Result<()> {
        if self.max_trials == 0 {
            return Err(GiftmatchError::Configuration(
                "max_trials must be at least 1".to_string(),
            ));
        }
        if self.min_participants < constants::MIN_PARTICIPANTS {
            return Err(GiftmatchError::Configuration(format!(
                "min_participants must be at least {}, got {}",
                constants::MIN_PARTICIPANTS,
                self.min_participants,
            )));
        }
        if self.max_backtracks_per_trial == Some(0) {
            return Err(GiftmatchError::Configuration(
                "max_backtracks_per_trial must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}
