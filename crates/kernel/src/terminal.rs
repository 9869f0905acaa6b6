//! Terminal-time estimate: days remaining before a world reaches its terminal state.
//!
//! Every contributing term is bounded before it is combined, so the estimate is
//! total for any finite inputs with a non-zero maximum entropy:
//! - each constant is squashed into `(-1, 1)` by `c / (|c| + 1)` and only the
//!   first [`INFLUENTIAL_CONSTANTS`] participate;
//! - the physical influence is reduced modulo [`PHYSICAL_INFLUENCE_MODULUS`];
//! - the consciousness influence is capped at [`CONSCIOUSNESS_CAP`];
//! - the result is clamped to `0..=i64::MAX`.

use chrono::{DateTime, Utc};
use cosmos_common::{CosmosError, Result};

use crate::world::World;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Weight of each entity in the consciousness influence.
pub const CONSCIOUSNESS_WEIGHT: f64 = 0.12345;

/// Upper bound of the consciousness influence.
pub const CONSCIOUSNESS_CAP: f64 = 1000.0;

/// Number of leading constants that feed the physical influence.
pub const INFLUENTIAL_CONSTANTS: usize = 10;

pub const PHYSICAL_INFLUENCE_MODULUS: f64 = 100.0;

/// Everything the estimate depends on, decoupled from the clock.
#[derive(Debug, Clone, Copy)]
pub struct TerminalInputs<'a> {
    pub elapsed_days: f64,
    pub lifespan_days: u64,
    pub entropy_level: f64,
    pub max_entropy: f64,
    pub constants: &'a [f64],
    pub entity_count: usize,
}

impl TerminalInputs<'_> {
    /// Evaluate the estimate, truncated toward zero.
    pub fn estimate(&self) -> Result<i64> {
        let _span = tracing::info_span!("terminal_estimate").entered();

        if self.max_entropy == 0.0 {
            return Err(CosmosError::DivisionByZero);
        }
        let entropy_ratio = self.entropy_level / self.max_entropy;
        // clock skew counts as no time elapsed
        let elapsed = self.elapsed_days.max(0.0);
        let days_remaining = (self.lifespan_days as f64 - elapsed).max(0.0);
        let physical = physical_influence(self.constants);
        let consciousness = consciousness_influence(self.entity_count);

        let raw = days_remaining * (1.0 - entropy_ratio) - physical * entropy_ratio + consciousness;
        let upper = i64::MAX as f64;
        if raw > upper {
            tracing::warn!(raw, "terminal estimate clamped to i64::MAX");
        }

        tracing::trace!(
            days_remaining,
            entropy_ratio,
            physical,
            consciousness,
            raw,
            "terminal estimate terms"
        );

        // `as` saturates and maps NaN to zero.
        Ok(raw.clamp(0.0, upper) as i64)
    }
}

/// Sum of the squashed leading constants, each divided by its 1-based position,
/// taken in absolute value and reduced modulo 100.
pub fn physical_influence(constants: &[f64]) -> f64 {
    let sum: f64 = constants
        .iter()
        .take(INFLUENTIAL_CONSTANTS)
        .enumerate()
        .map(|(i, c)| (c / (c.abs() + 1.0)) / (i as f64 + 1.0))
        .sum();
    sum.abs() % PHYSICAL_INFLUENCE_MODULUS
}

pub fn consciousness_influence(entity_count: usize) -> f64 {
    (entity_count as f64 * CONSCIOUSNESS_WEIGHT).min(CONSCIOUSNESS_CAP)
}

/// Days between `from` and `to`. A clock that reads earlier than `from` gives zero.
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = (to - from).num_milliseconds().max(0);
    millis as f64 / 1000.0 / SECONDS_PER_DAY
}

impl World {
    /// Inputs for the estimate as seen at `now`.
    pub fn terminal_inputs_at(&self, now: DateTime<Utc>) -> TerminalInputs<'_> {
        TerminalInputs {
            elapsed_days: elapsed_days(self.created_at(), now),
            lifespan_days: self.lifespan_days(),
            entropy_level: self.entropy_level(),
            max_entropy: self.max_entropy(),
            constants: self.constants(),
            entity_count: self.entity_count(),
        }
    }

    /// Days until the terminal state, evaluated at `now`.
    pub fn terminal_days_at(&self, now: DateTime<Utc>) -> Result<i64> {
        let days = self.terminal_inputs_at(now).estimate()?;
        tracing::debug!(world = %self.id(), days, "terminal time estimated");
        Ok(days)
    }

    /// Days until the terminal state, evaluated against the current clock.
    pub fn terminal_days(&self) -> Result<i64> {
        self.terminal_days_at(Utc::now())
    }
}
