/// Tunable parameters for a host encounter loop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterConfig {
    /// Hard cap on the number of rounds a driver runs.
    pub max_rounds: u32,
    /// After the scripted rounds, keep running empty rounds until every
    /// entity's set is empty (still bounded by `max_rounds`).
    pub drain_until_clear: bool,
}

impl EncounterConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ROUNDS: u32 = 100;

    pub fn new() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            drain_until_clear: true,
        }
    }

    pub fn with_max_rounds(max_rounds: u32) -> Self {
        Self {
            max_rounds,
            ..Self::new()
        }
    }

    /// Returns true if `round` (1-based) is within the round budget.
    pub fn allows_round(&self, round: u32) -> bool {
        round <= self.max_rounds
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}
