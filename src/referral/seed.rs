//! Mock referral datasets: open jobs, reward rules, tracked referrals.

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::types::{ExperienceLevel, Job, Referral, ReferralStatus, RewardRule, RewardStatus};

/// Id of the designated fallback rule for jobs without a rule of their own.
pub const DEFAULT_JUNIOR_RULE_ID: &str = "default-junior";
/// Job id carried by default (non job-specific) rules.
pub const DEFAULT_JOB_ID: &str = "default";

fn at(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn job(id: &str, title: &str, department: &str, level: ExperienceLevel, location: &str) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        department: department.to_string(),
        level,
        location: location.to_string(),
        open: true,
    }
}

pub fn seed_jobs() -> Vec<Job> {
    vec![
        job("j-101", "Senior Frontend Engineer", "Engineering", ExperienceLevel::Senior, "Remote"),
        job("j-102", "Backend Engineer", "Engineering", ExperienceLevel::Mid, "Berlin"),
        job("j-103", "Product Designer", "Design", ExperienceLevel::Mid, "Lisbon"),
        job("j-104", "Data Analyst", "Data", ExperienceLevel::Junior, "Remote"),
        job("j-105", "Engineering Manager", "Engineering", ExperienceLevel::Lead, "Berlin"),
        job("j-106", "Support Specialist", "Customer Success", ExperienceLevel::Junior, "Dublin"),
    ]
}

fn rule(id: &str, job_id: &str, job_title: &str, department: &str, level: ExperienceLevel, amount: u32) -> RewardRule {
    let created = at(2024, 1, 8);
    RewardRule {
        id: id.to_string(),
        job_id: job_id.to_string(),
        job_title: job_title.to_string(),
        department: department.to_string(),
        level,
        amount,
        currency: "USD".to_string(),
        active: true,
        created_at: created,
        updated_at: created,
    }
}

pub fn seed_reward_rules() -> Vec<RewardRule> {
    vec![
        rule("rule-1", "j-101", "Senior Frontend Engineer", "Engineering", ExperienceLevel::Senior, 2000),
        rule("rule-2", "j-102", "Backend Engineer", "Engineering", ExperienceLevel::Mid, 1500),
        rule("rule-3", "j-103", "Product Designer", "Design", ExperienceLevel::Mid, 1200),
        rule("rule-4", "j-105", "Engineering Manager", "Engineering", ExperienceLevel::Lead, 3000),
        rule(DEFAULT_JUNIOR_RULE_ID, DEFAULT_JOB_ID, "Any junior role", "All", ExperienceLevel::Junior, 750),
    ]
}

struct Stages {
    reviewed: Option<i64>,
    screening: Option<i64>,
    interview: Option<i64>,
    closed: Option<i64>,
    paid: Option<i64>,
}

#[allow(clippy::too_many_arguments)]
fn referral(
    id: &str,
    referrer: (&str, &str),
    candidate: (&str, &str),
    job: (&str, &str, &str),
    justification: &str,
    status: ReferralStatus,
    reward: (u32, RewardStatus),
    submitted: DateTime<Utc>,
    stages: Stages,
) -> Referral {
    let after = |days: Option<i64>| days.map(|d| submitted + Duration::days(d));
    Referral {
        id: id.to_string(),
        referrer_name: referrer.0.to_string(),
        referrer_email: referrer.1.to_string(),
        candidate_name: candidate.0.to_string(),
        candidate_email: candidate.1.to_string(),
        candidate_phone: None,
        job_id: job.0.to_string(),
        job_title: job.1.to_string(),
        department: job.2.to_string(),
        justification: justification.to_string(),
        status,
        reward_amount: reward.0,
        reward_status: reward.1,
        submitted_at: submitted,
        reviewed_at: after(stages.reviewed),
        screening_at: after(stages.screening),
        interview_at: after(stages.interview),
        closed_at: after(stages.closed),
        paid_at: after(stages.paid),
    }
}

const NONE: Stages = Stages {
    reviewed: None,
    screening: None,
    interview: None,
    closed: None,
    paid: None,
};

pub fn seed_referrals() -> Vec<Referral> {
    let frontend = ("j-101", "Senior Frontend Engineer", "Engineering");
    let backend = ("j-102", "Backend Engineer", "Engineering");
    let designer = ("j-103", "Product Designer", "Design");
    let analyst = ("j-104", "Data Analyst", "Data");
    let manager = ("j-105", "Engineering Manager", "Engineering");
    let support = ("j-106", "Support Specialist", "Customer Success");

    let alice = ("Alice Johnson", "alice.johnson@acme.test");
    let ben = ("Ben Okafor", "ben.okafor@acme.test");
    let chloe = ("Chloe Martin", "chloe.martin@acme.test");

    vec![
        referral(
            "ref-1001",
            alice,
            ("Jordan Alvarez", "jordan.alvarez@mail.test"),
            frontend,
            "Worked with Jordan for three years; shipped our design system.",
            ReferralStatus::Hired,
            (2000, RewardStatus::Paid),
            at(2024, 1, 15),
            Stages { reviewed: Some(2), screening: Some(5), interview: Some(12), closed: Some(30), paid: Some(60) },
        ),
        referral(
            "ref-1002",
            ben,
            ("Marcus Lee", "marcus.lee@mail.test"),
            backend,
            "Strong distributed systems background, great mentor.",
            ReferralStatus::Interview,
            (1500, RewardStatus::Pending),
            at(2024, 2, 20),
            Stages { reviewed: Some(1), screening: Some(6), interview: Some(14), ..NONE },
        ),
        referral(
            "ref-1003",
            alice,
            ("Emma Rossi", "emma.rossi@mail.test"),
            designer,
            "Her portfolio on accessibility work is outstanding.",
            ReferralStatus::Hired,
            (1200, RewardStatus::Approved),
            at(2024, 2, 1),
            Stages { reviewed: Some(3), screening: Some(7), interview: Some(15), closed: Some(35), ..NONE },
        ),
        referral(
            "ref-1004",
            chloe,
            ("David Park", "david.park@mail.test"),
            analyst,
            "Former intern on my team, sharp with SQL and dashboards.",
            ReferralStatus::Screening,
            (750, RewardStatus::Pending),
            at(2024, 3, 4),
            Stages { reviewed: Some(2), screening: Some(6), ..NONE },
        ),
        referral(
            "ref-1005",
            ben,
            ("Nina Petrova", "nina.petrova@mail.test"),
            manager,
            "Led a 12-person platform team through two reorgs.",
            ReferralStatus::Rejected,
            (3000, RewardStatus::Pending),
            at(2024, 1, 25),
            Stages { reviewed: Some(2), screening: Some(8), interview: Some(16), closed: Some(22), ..NONE },
        ),
        referral(
            "ref-1006",
            chloe,
            ("Sam Wilson", "sam.wilson@mail.test"),
            support,
            "Calm under pressure, speaks three languages.",
            ReferralStatus::Submitted,
            (750, RewardStatus::Pending),
            at(2024, 3, 14),
            NONE,
        ),
        referral(
            "ref-1007",
            alice,
            ("Leo Tanaka", "leo.tanaka@mail.test"),
            backend,
            "Open-source maintainer of a popular Rust HTTP crate.",
            ReferralStatus::Reviewed,
            (1500, RewardStatus::Pending),
            at(2024, 3, 10),
            Stages { reviewed: Some(3), ..NONE },
        ),
        referral(
            "ref-1008",
            ben,
            ("Grace Kim", "grace.kim@mail.test"),
            frontend,
            "Built the mobile web checkout at her last company.",
            ReferralStatus::Hired,
            (2000, RewardStatus::Paid),
            at(2023, 11, 6),
            Stages { reviewed: Some(1), screening: Some(4), interview: Some(10), closed: Some(28), paid: Some(58) },
        ),
    ]
}
