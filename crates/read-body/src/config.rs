//! Per-route configuration of the accumulation stage.
//!
//! One boolean per route scope, off by default. Scopes nest: an unset
//! child value inherits the parent's, a set child value wins.

/// The per-route switch for request body accumulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadBodyConfig {
    enabled: Option<bool>,
}

impl ReadBodyConfig {
    /// An unset value, inheriting whatever the parent scope decides.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn enabled(flag: bool) -> Self {
        Self { enabled: Some(flag) }
    }

    /// Merges this scope's value with the parent scope's: this value wins
    /// unless unset.
    pub fn merge(self, parent: Self) -> Self {
        Self { enabled: self.enabled.or(parent.enabled) }
    }

    /// The effective value; unset means off.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}
