//! Referral dashboard statistics.

use std::collections::BTreeMap;

use super::types::{Referral, ReferralStatus, RewardStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentStats {
    pub referrals: usize,
    pub hires: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferrerStats {
    pub name: String,
    pub referrals: usize,
    pub hires: usize,
    /// Sum of paid bonuses.
    pub earned: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferralStats {
    pub total: usize,
    pub by_status: BTreeMap<ReferralStatus, usize>,
    pub hires: usize,
    /// hires / total, 0.0 for an empty list.
    pub conversion_rate: f64,
    pub rewards_pending: u32,
    pub rewards_approved: u32,
    pub rewards_paid: u32,
    pub by_department: BTreeMap<String, DepartmentStats>,
    /// Ranked by hires, then referrals, then name.
    pub top_referrers: Vec<ReferrerStats>,
}

impl ReferralStats {
    pub fn compute(referrals: &[Referral]) -> Self {
        let mut stats = ReferralStats {
            total: referrals.len(),
            ..Default::default()
        };
        let mut referrers: BTreeMap<String, ReferrerStats> = BTreeMap::new();

        for r in referrals {
            *stats.by_status.entry(r.status).or_insert(0) += 1;
            let hired = r.status == ReferralStatus::Hired;
            if hired {
                stats.hires += 1;
            }

            match r.reward_status {
                RewardStatus::Pending => stats.rewards_pending += r.reward_amount,
                RewardStatus::Approved => stats.rewards_approved += r.reward_amount,
                RewardStatus::Paid => stats.rewards_paid += r.reward_amount,
            }

            let dept = stats.by_department.entry(r.department.clone()).or_default();
            dept.referrals += 1;
            if hired {
                dept.hires += 1;
            }

            let entry = referrers
                .entry(r.referrer_name.clone())
                .or_insert_with(|| ReferrerStats {
                    name: r.referrer_name.clone(),
                    referrals: 0,
                    hires: 0,
                    earned: 0,
                });
            entry.referrals += 1;
            if hired {
                entry.hires += 1;
            }
            if r.reward_status == RewardStatus::Paid {
                entry.earned += r.reward_amount;
            }
        }

        if stats.total > 0 {
            stats.conversion_rate = stats.hires as f64 / stats.total as f64;
        }

        let mut top: Vec<ReferrerStats> = referrers.into_values().collect();
        top.sort_by(|a, b| {
            b.hires
                .cmp(&a.hires)
                .then(b.referrals.cmp(&a.referrals))
                .then(a.name.cmp(&b.name))
        });
        stats.top_referrers = top;
        stats
    }

    pub fn count(&self, status: ReferralStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
