//! Referral data types: Job, RewardRule, Referral and their enums.

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "junior" => Ok(ExperienceLevel::Junior),
            "mid" => Ok(ExperienceLevel::Mid),
            "senior" => Ok(ExperienceLevel::Senior),
            "lead" => Ok(ExperienceLevel::Lead),
            other => bail!("Unknown experience level '{}'. Expected junior, mid, senior or lead", other),
        }
    }
}

/// Pipeline stage of a referral: submitted → reviewed → screening → interview → hired|rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    Submitted,
    Reviewed,
    Screening,
    Interview,
    Hired,
    Rejected,
}

impl ReferralStatus {
    pub const ALL: [ReferralStatus; 6] = [
        ReferralStatus::Submitted,
        ReferralStatus::Reviewed,
        ReferralStatus::Screening,
        ReferralStatus::Interview,
        ReferralStatus::Hired,
        ReferralStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralStatus::Submitted => "submitted",
            ReferralStatus::Reviewed => "reviewed",
            ReferralStatus::Screening => "screening",
            ReferralStatus::Interview => "interview",
            ReferralStatus::Hired => "hired",
            ReferralStatus::Rejected => "rejected",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, ReferralStatus::Hired | ReferralStatus::Rejected)
    }
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferralStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        ReferralStatus::ALL
            .iter()
            .find(|st| st.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown referral status '{}'", s))
    }
}

/// Payment state of a referral bonus: pending → approved → paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardStatus {
    Pending,
    Approved,
    Paid,
}

impl RewardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardStatus::Pending => "pending",
            RewardStatus::Approved => "approved",
            RewardStatus::Paid => "paid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub department: String,
    pub level: ExperienceLevel,
    pub location: String,
    #[serde(default = "default_open")]
    pub open: bool,
}

fn default_open() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRule {
    pub id: String,
    pub job_id: String,
    pub job_title: String,
    pub department: String,
    pub level: ExperienceLevel,
    pub amount: u32,
    pub currency: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    pub id: String,
    pub referrer_name: String,
    pub referrer_email: String,
    pub candidate_name: String,
    pub candidate_email: String,
    #[serde(default)]
    pub candidate_phone: Option<String>,
    pub job_id: String,
    pub job_title: String,
    pub department: String,
    pub justification: String,
    pub status: ReferralStatus,
    pub reward_amount: u32,
    pub reward_status: RewardStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub screening_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interview_at: Option<DateTime<Utc>>,
    /// When the referral reached hired or rejected.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}
