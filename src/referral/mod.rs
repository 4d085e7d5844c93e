//! Employee referral program: jobs, reward rules, submission, pipeline, analytics.

pub mod analytics;
pub mod commands;
pub mod pipeline;
pub mod rules;
pub mod seed;
pub mod submit;
pub mod types;

pub use analytics::ReferralStats;
pub use pipeline::{ReferralQuery, filter_referrals, timeline};
pub use rules::{NewRewardRule, RewardRulePatch, RewardRuleStore, estimate_reward};
pub use submit::{ReferralForm, SubmissionReceipt, SubmitOptions, ValidationErrors, submit};
pub use types::{ExperienceLevel, Job, Referral, ReferralStatus, RewardRule, RewardStatus};
