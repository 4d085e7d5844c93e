//! Pipeline tracking: filtered referral lists and per-referral timelines.

use chrono::{DateTime, Utc};

use super::types::{Referral, ReferralStatus};
use crate::util::contains_ignore_case;

#[derive(Debug, Clone, Default)]
pub struct ReferralQuery {
    pub status: Option<ReferralStatus>,
    /// Matched against candidate name, job title and department.
    pub text: String,
    /// Matched against referrer name or email.
    pub referrer: Option<String>,
}

impl ReferralQuery {
    pub fn matches(&self, r: &Referral) -> bool {
        if self.status.is_some_and(|s| s != r.status) {
            return false;
        }
        if let Some(ref who) = self.referrer {
            if !contains_ignore_case(&r.referrer_name, who) && !contains_ignore_case(&r.referrer_email, who) {
                return false;
            }
        }
        let text = self.text.trim();
        contains_ignore_case(&r.candidate_name, text)
            || contains_ignore_case(&r.job_title, text)
            || contains_ignore_case(&r.department, text)
    }
}

/// Referrals matching `query`, newest submission first.
pub fn filter_referrals<'a>(referrals: &'a [Referral], query: &ReferralQuery) -> Vec<&'a Referral> {
    let mut out: Vec<&Referral> = referrals.iter().filter(|r| query.matches(r)).collect();
    out.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    out
}

/// Stages a referral has reached, in pipeline order.
pub fn timeline(r: &Referral) -> Vec<(ReferralStatus, DateTime<Utc>)> {
    let mut stages = vec![(ReferralStatus::Submitted, r.submitted_at)];
    let reached = [
        (ReferralStatus::Reviewed, r.reviewed_at),
        (ReferralStatus::Screening, r.screening_at),
        (ReferralStatus::Interview, r.interview_at),
    ];
    stages.extend(reached.into_iter().filter_map(|(s, at)| at.map(|t| (s, t))));
    if r.status.is_closed() {
        if let Some(t) = r.closed_at {
            stages.push((r.status, t));
        }
    }
    stages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::referral::seed::seed_referrals;

    #[test]
    fn test_timeline_hired() {
        let refs = seed_referrals();
        let hired = refs.iter().find(|r| r.id == "ref-1001").unwrap();
        let stages: Vec<ReferralStatus> = timeline(hired).into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            stages,
            vec![
                ReferralStatus::Submitted,
                ReferralStatus::Reviewed,
                ReferralStatus::Screening,
                ReferralStatus::Interview,
                ReferralStatus::Hired,
            ]
        );
    }

    #[test]
    fn test_timeline_fresh_submission() {
        let refs = seed_referrals();
        let fresh = refs.iter().find(|r| r.id == "ref-1006").unwrap();
        assert_eq!(timeline(fresh).len(), 1);
    }

    #[test]
    fn test_timeline_is_chronological() {
        for r in seed_referrals() {
            let t = timeline(&r);
            assert!(t.windows(2).all(|w| w[0].1 <= w[1].1), "{}", r.id);
        }
    }
}
