//! Reward rule store: in-memory create/update, reset every session.

use chrono::Utc;
use tracing::debug;

use super::seed::DEFAULT_JUNIOR_RULE_ID;
use super::types::{ExperienceLevel, RewardRule};

/// Fields of a rule being created.
#[derive(Debug, Clone)]
pub struct NewRewardRule {
    pub job_id: String,
    pub job_title: String,
    pub department: String,
    pub level: ExperienceLevel,
    pub amount: u32,
    /// Falls back to the store's default currency.
    pub currency: Option<String>,
}

/// Fields to merge into an existing rule. `None` leaves the field alone.
#[derive(Debug, Clone, Default)]
pub struct RewardRulePatch {
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub level: Option<ExperienceLevel>,
    pub amount: Option<u32>,
    pub currency: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct RewardRuleStore {
    rules: Vec<RewardRule>,
    default_currency: String,
    next_seq: u64,
}

impl RewardRuleStore {
    pub fn new(rules: Vec<RewardRule>, default_currency: &str) -> Self {
        // Continue numbering after the highest seeded `rule-<n>`
        let next_seq = rules
            .iter()
            .filter_map(|r| r.id.strip_prefix("rule-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            rules,
            default_currency: default_currency.to_string(),
            next_seq,
        }
    }

    pub fn list(&self) -> &[RewardRule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&RewardRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Active rule attached to `job_id`.
    pub fn for_job(&self, job_id: &str) -> Option<&RewardRule> {
        self.rules.iter().find(|r| r.active && r.job_id == job_id)
    }

    /// The designated fallback rule, if present and active.
    pub fn default_junior(&self) -> Option<&RewardRule> {
        self.get(DEFAULT_JUNIOR_RULE_ID).filter(|r| r.active)
    }

    pub fn create(&mut self, new: NewRewardRule) -> RewardRule {
        let now = Utc::now();
        let mut id = format!("rule-{}", self.next_seq);
        while self.get(&id).is_some() {
            self.next_seq += 1;
            id = format!("rule-{}", self.next_seq);
        }
        self.next_seq += 1;

        let rule = RewardRule {
            id,
            job_id: new.job_id,
            job_title: new.job_title,
            department: new.department,
            level: new.level,
            amount: new.amount,
            currency: new
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| self.default_currency.clone()),
            active: true,
            created_at: now,
            updated_at: now,
        };
        debug!(id = %rule.id, job_id = %rule.job_id, amount = rule.amount, "reward rule created");
        self.rules.push(rule.clone());
        rule
    }

    /// Merge `patch` into rule `id` and refresh its updated timestamp.
    pub fn update(&mut self, id: &str, patch: RewardRulePatch) -> Option<RewardRule> {
        let rule = self.rules.iter_mut().find(|r| r.id == id)?;
        if let Some(v) = patch.job_id {
            rule.job_id = v;
        }
        if let Some(v) = patch.job_title {
            rule.job_title = v;
        }
        if let Some(v) = patch.department {
            rule.department = v;
        }
        if let Some(v) = patch.level {
            rule.level = v;
        }
        if let Some(v) = patch.amount {
            rule.amount = v;
        }
        if let Some(v) = patch.currency {
            rule.currency = v;
        }
        if let Some(v) = patch.active {
            rule.active = v;
        }
        rule.updated_at = Utc::now();
        debug!(id, "reward rule updated");
        Some(rule.clone())
    }
}

/// Estimated bonus for a referral to `job_id`: the job's rule, then the
/// default junior rule, then `fallback`.
pub fn estimate_reward(rules: &RewardRuleStore, job_id: &str, fallback: u32, currency: &str) -> (u32, String) {
    match rules.for_job(job_id).or_else(|| rules.default_junior()) {
        Some(rule) => (rule.amount, rule.currency.clone()),
        None => (fallback, currency.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::referral::seed::seed_reward_rules;

    fn new_rule(job_id: &str) -> NewRewardRule {
        NewRewardRule {
            job_id: job_id.to_string(),
            job_title: "QA Engineer".to_string(),
            department: "Engineering".to_string(),
            level: ExperienceLevel::Mid,
            amount: 900,
            currency: None,
        }
    }

    #[test]
    fn test_create_assigns_next_id_and_defaults() {
        let mut store = RewardRuleStore::new(seed_reward_rules(), "USD");
        let rule = store.create(new_rule("j-200"));
        assert_eq!(rule.id, "rule-5");
        assert_eq!(rule.currency, "USD");
        assert!(rule.active);
        assert_eq!(rule.created_at, rule.updated_at);
        assert_eq!(store.list().len(), 6);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = RewardRuleStore::new(seed_reward_rules(), "USD");
        let before = store.get("rule-2").unwrap().clone();
        let updated = store
            .update(
                "rule-2",
                RewardRulePatch {
                    amount: Some(1800),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, 1800);
        assert_eq!(updated.job_title, before.job_title);
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at >= before.updated_at);
    }

    #[test]
    fn test_update_unknown_is_none() {
        let mut store = RewardRuleStore::new(seed_reward_rules(), "USD");
        assert!(store.update("rule-99", RewardRulePatch::default()).is_none());
    }

    #[test]
    fn test_inactive_rule_is_skipped() {
        let mut store = RewardRuleStore::new(seed_reward_rules(), "USD");
        store.update(
            "rule-1",
            RewardRulePatch {
                active: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(estimate_reward(&store, "j-101", 500, "USD").0, 750);
    }
}
