//! State values, the configured state cycle and the selection mode.
//!
//! Every item holds one [`StateValue`] drawn from a [`StateSet`]. The first
//! value of the set is the canonical "unselected" value; advancing an item
//! moves it to the next value in the set, wrapping back to the first.

use super::error::{Result, TickboxError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One element of the configured state cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateValue(pub i64);

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, validated sequence of allowed state values.
///
/// Construction guarantees at least two values and no duplicates, so
/// [`StateSet::unselected`] is always defined and cycling never stalls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSet {
    values: Vec<StateValue>,
}

impl StateSet {
    /// Builds a state set from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`TickboxError::Config`] if fewer than two values are given or
    /// a value appears twice.
    ///
    /// # Example
    ///
    /// ```
    /// use tickbox::domain::{StateSet, StateValue};
    ///
    /// let states = StateSet::new([0, 1, 2])?;
    /// assert_eq!(states.unselected(), StateValue(0));
    /// assert_eq!(states.next_after(StateValue(2)), StateValue(0));
    /// # Ok::<(), tickbox::TickboxError>(())
    /// ```
    pub fn new<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let values: Vec<StateValue> = values.into_iter().map(StateValue).collect();

        if values.len() < 2 {
            return Err(TickboxError::Config(format!(
                "states must contain at least two values, got {}",
                values.len()
            )));
        }

        for (idx, value) in values.iter().enumerate() {
            if values[..idx].contains(value) {
                return Err(TickboxError::Config(format!(
                    "states must be distinct, {value} appears more than once"
                )));
            }
        }

        Ok(Self { values })
    }

    /// The classic checked/unchecked pair `[0, 1]`.
    #[must_use]
    pub fn binary() -> Self {
        Self {
            values: vec![StateValue(0), StateValue(1)],
        }
    }

    /// The canonical unselected value (`states[0]`).
    #[must_use]
    pub fn unselected(&self) -> StateValue {
        self.values[0]
    }

    /// Returns the value at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<StateValue> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn contains(&self, value: StateValue) -> bool {
        self.values.contains(&value)
    }

    #[must_use]
    pub fn position(&self, value: StateValue) -> Option<usize> {
        self.values.iter().position(|v| *v == value)
    }

    /// Returns the value following `value` in the cycle.
    ///
    /// A value outside the set is treated as sitting just before the first
    /// position, so it advances to `states[0]`.
    #[must_use]
    pub fn next_after(&self, value: StateValue) -> StateValue {
        let next = self
            .position(value)
            .map_or(0, |idx| (idx + 1) % self.values.len());
        self.values[next]
    }

    /// Returns `value` if it belongs to the set, `states[0]` otherwise.
    #[must_use]
    pub fn normalize(&self, value: Option<StateValue>) -> StateValue {
        value
            .filter(|v| self.contains(*v))
            .unwrap_or_else(|| self.unselected())
    }

    #[must_use]
    pub fn is_unselected(&self, value: StateValue) -> bool {
        value == self.unselected()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[StateValue] {
        &self.values
    }
}

impl Default for StateSet {
    fn default() -> Self {
        Self::binary()
    }
}

/// How many items may hold a selected value at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectMode {
    /// At most one item is selected; aggregate operations are disabled.
    Single,
    /// Items are toggled independently.
    #[default]
    Multiple,
}

impl FromStr for SelectMode {
    type Err = TickboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            other => Err(TickboxError::Config(format!("unknown select mode: {other}"))),
        }
    }
}
