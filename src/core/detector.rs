use std::collections::HashMap;

use crate::core::models::spend::Spend;

/// Mutable per-account tracking record, created lazily on first observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AccountSpendState {
    last_spend: Spend,
    currently_spending: bool,
}

impl Default for AccountSpendState {
    fn default() -> Self {
        Self {
            last_spend: Spend::ZERO,
            currently_spending: false,
        }
    }
}

/// Per-account two-state machine deciding when a spend alert fires.
///
/// Each account is either Idle or Active. An observation with positive spend
/// fires an alert when the account was Idle, or when the amount differs from
/// the previous observation while Active — so a flat total stays silent
/// between polls, but every increase re-alerts. Any non-positive observation
/// drops the account back to Idle without alerting, which re-arms the
/// machine for the next day's first spend.
///
/// Callers must not report "no data" polls here; skipping the call leaves
/// the stored state untouched, as required.
pub struct TransitionDetector {
    states: HashMap<String, AccountSpendState>,
}

impl TransitionDetector {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Record today's spend for an account. Returns true when an alert
    /// should be sent for this observation.
    pub fn observe(&mut self, account_id: &str, spend: Spend) -> bool {
        let state = self.states.entry(account_id.to_string()).or_default();

        let mut notify = false;
        if spend.is_positive() {
            if !state.currently_spending || spend != state.last_spend {
                notify = true;
                state.currently_spending = true;
            }
        } else {
            state.currently_spending = false;
        }
        state.last_spend = spend;
        notify
    }

    /// Whether the account is currently in the Active (spending) state.
    pub fn is_active(&self, account_id: &str) -> bool {
        self.states
            .get(account_id)
            .map(|s| s.currently_spending)
            .unwrap_or(false)
    }
}

impl Default for TransitionDetector {
    fn default() -> Self {
        Self::new()
    }
}
