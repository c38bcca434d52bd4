//! Access-key bookkeeping: per-key request budgets and rotation.

use std::collections::BTreeMap;

use crate::error::SearchError;

/// One access key with a usage counter and an optional request budget.
///
/// `budget: None` means unlimited, used by the single-key search mode.
/// Counters live in this process only; a restart resets them to zero.
#[derive(Debug, Clone)]
pub struct Credential {
    key: String,
    used: u32,
    budget: Option<u32>,
}

impl Credential {
    #[must_use]
    pub fn new(key: &str, budget: u32) -> Self {
        Credential {
            key: key.to_owned(),
            used: 0,
            budget: Some(budget),
        }
    }

    #[must_use]
    pub fn unlimited(key: &str) -> Self {
        Credential {
            key: key.to_owned(),
            used: 0,
            budget: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn used(&self) -> u32 {
        self.used
    }

    #[must_use]
    pub fn has_remaining(&self) -> bool {
        self.budget.is_none_or(|budget| self.used < budget)
    }

    fn charge(&mut self) {
        self.used = self.used.saturating_add(1);
    }
}

/// Ordered pool of credentials with circular rotation.
///
/// [`CredentialPool::current`] always lands on a credential with remaining
/// budget, scanning forward past any number of spent keys in a single call,
/// and reports [`SearchError::Exhausted`] once every key is spent.
#[derive(Debug)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
    current: usize,
    charge_failures: bool,
}

impl CredentialPool {
    #[must_use]
    pub fn new(credentials: Vec<Credential>) -> Self {
        CredentialPool {
            credentials,
            current: 0,
            charge_failures: true,
        }
    }

    /// Pool of budgeted keys sharing one per-key budget.
    #[must_use]
    pub fn from_keys(keys: &[String], budget: u32) -> Self {
        Self::new(keys.iter().map(|k| Credential::new(k, budget)).collect())
    }

    /// Pool of exactly one unlimited key.
    #[must_use]
    pub fn single(key: &str) -> Self {
        Self::new(vec![Credential::unlimited(key)])
    }

    /// Whether attempts that fail in transport or at the provider still spend
    /// budget. Defaults to `true`, matching the observed provider accounting
    /// (a failed request still hits the quota).
    #[must_use]
    pub fn charge_failures(mut self, charge: bool) -> Self {
        self.charge_failures = charge;
        self
    }

    /// Returns the credential the next request should use.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Exhausted`] when no credential has remaining
    /// budget (including an empty pool).
    pub fn current(&mut self) -> Result<&Credential, SearchError> {
        let n = self.credentials.len();
        for step in 0..n {
            let idx = (self.current + step) % n;
            if self.credentials[idx].has_remaining() {
                self.current = idx;
                return Ok(&self.credentials[idx]);
            }
        }
        Err(SearchError::Exhausted)
    }

    /// Records one attempted request against the current credential.
    ///
    /// Must be called exactly once per issued request. Failed attempts are
    /// charged only when the `charge_failures` policy is on.
    pub fn record_attempt(&mut self, success: bool) {
        if success || self.charge_failures {
            if let Some(credential) = self.credentials.get_mut(self.current) {
                credential.charge();
            }
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.credentials.iter().any(Credential::has_remaining)
    }

    /// Per-key usage snapshot for the collection report.
    #[must_use]
    pub fn usage(&self) -> BTreeMap<String, u32> {
        self.credentials
            .iter()
            .map(|c| (c.key.clone(), c.used))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(budgets: &[(u32, u32)]) -> CredentialPool {
        // (used, budget) pairs
        let credentials = budgets
            .iter()
            .enumerate()
            .map(|(i, &(used, budget))| Credential {
                key: format!("key-{i}"),
                used,
                budget: Some(budget),
            })
            .collect();
        CredentialPool::new(credentials)
    }

    #[test]
    fn current_returns_first_key_with_budget() {
        let mut pool = pool(&[(0, 2), (0, 2)]);
        assert_eq!(pool.current().unwrap().key(), "key-0");
    }

    #[test]
    fn current_never_returns_a_spent_key() {
        let mut pool = pool(&[(2, 2), (0, 2)]);
        assert_eq!(pool.current().unwrap().key(), "key-1");
    }

    #[test]
    fn current_skips_multiple_spent_keys_in_one_call() {
        let mut pool = pool(&[(2, 2), (5, 5), (0, 2)]);
        assert_eq!(pool.current().unwrap().key(), "key-2");
    }

    #[test]
    fn rotation_wraps_circularly() {
        let mut pool = pool(&[(0, 1), (1, 1)]);
        // key-1 is spent; after key-0's single request, nothing remains.
        assert_eq!(pool.current().unwrap().key(), "key-0");
        pool.record_attempt(true);
        assert!(matches!(pool.current(), Err(SearchError::Exhausted)));
    }

    #[test]
    fn exhausted_when_all_keys_spent() {
        let mut pool = pool(&[(2, 2), (3, 3)]);
        assert!(pool.is_exhausted());
        assert!(matches!(pool.current(), Err(SearchError::Exhausted)));
    }

    #[test]
    fn empty_pool_is_exhausted() {
        let mut pool = CredentialPool::new(vec![]);
        assert!(matches!(pool.current(), Err(SearchError::Exhausted)));
    }

    #[test]
    fn failed_attempts_charge_budget_by_default() {
        let mut pool = pool(&[(0, 2)]);
        pool.current().unwrap();
        pool.record_attempt(false);
        pool.record_attempt(false);
        assert!(pool.is_exhausted());
    }

    #[test]
    fn charge_failures_off_leaves_budget_untouched_on_failure() {
        let mut pool = pool(&[(0, 1)]).charge_failures(false);
        pool.current().unwrap();
        pool.record_attempt(false);
        assert!(!pool.is_exhausted());
        pool.record_attempt(true);
        assert!(pool.is_exhausted());
    }

    #[test]
    fn unlimited_credential_never_exhausts() {
        let mut pool = CredentialPool::single("only-key");
        for _ in 0..100 {
            pool.current().unwrap();
            pool.record_attempt(true);
        }
        assert!(!pool.is_exhausted());
        assert_eq!(pool.usage()["only-key"], 100);
    }

    #[test]
    fn usage_snapshot_reports_all_keys() {
        let mut pool = pool(&[(0, 5), (0, 5)]);
        pool.current().unwrap();
        pool.record_attempt(true);
        let usage = pool.usage();
        assert_eq!(usage["key-0"], 1);
        assert_eq!(usage["key-1"], 0);
    }
}
