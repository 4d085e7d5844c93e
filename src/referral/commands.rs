//! CLI handlers for `hirebox referral ...` and `hirebox reward ...`.

use anyhow::{Result, bail};
use std::path::Path;
use std::time::Duration;

use super::analytics::ReferralStats;
use super::pipeline::{ReferralQuery, filter_referrals, timeline};
use super::rules::{NewRewardRule, RewardRulePatch, RewardRuleStore};
use super::seed::{seed_jobs, seed_referrals, seed_reward_rules};
use super::submit::{ReferralForm, SubmitOptions, submit};
use super::types::{ExperienceLevel, ReferralStatus, RewardRule};
use crate::config::hirebox_config::{self, HireboxConfig};
use crate::resolve;

fn load_config(data_dir: &Path) -> Result<HireboxConfig> {
    hirebox_config::load_or_default(Some(&resolve::hirebox_toml_in(data_dir)))
}

fn rule_store(config: &HireboxConfig) -> RewardRuleStore {
    RewardRuleStore::new(seed_reward_rules(), &config.referral.currency)
}

fn print_rules(rules: &[RewardRule]) {
    let id_w = rules.iter().map(|r| r.id.len()).max().unwrap_or(0);
    for r in rules {
        let state = if r.active { "" } else { "  (inactive)" };
        println!(
            "  {:<id_w$}  {:<26} {:<7} {:>6} {}{}",
            r.id,
            r.job_title,
            r.level.as_str(),
            r.amount,
            r.currency,
            state,
            id_w = id_w
        );
    }
}

/// hirebox referral jobs
pub fn jobs() -> Result<()> {
    println!("Open positions\n");
    for j in seed_jobs().iter().filter(|j| j.open) {
        println!(
            "  {:<6} {:<26} {:<17} {:<7} {}",
            j.id,
            j.title,
            j.department,
            j.level.as_str(),
            j.location
        );
    }
    Ok(())
}

/// hirebox referral list [--status S] [--query Q] [--referrer R]
pub fn list(status: Option<&str>, query: &str, referrer: Option<&str>) -> Result<()> {
    let status = status.map(str::parse::<ReferralStatus>).transpose()?;
    let referrals = seed_referrals();
    let q = ReferralQuery {
        status,
        text: query.to_string(),
        referrer: referrer.map(str::to_string),
    };
    let matches = filter_referrals(&referrals, &q);

    if matches.is_empty() {
        println!("No referrals found.");
        return Ok(());
    }
    println!("Referrals ({}):\n", matches.len());
    for r in matches {
        println!(
            "  {:<9} {:<16} {:<26} {:<10} {:>5} ({})  by {}",
            r.id,
            r.candidate_name,
            r.job_title,
            r.status.as_str(),
            r.reward_amount,
            r.reward_status.as_str(),
            r.referrer_name
        );
    }
    Ok(())
}

/// hirebox referral show ID
pub fn show(id: &str) -> Result<()> {
    let referrals = seed_referrals();
    let Some(r) = referrals.iter().find(|r| r.id == id) else {
        bail!("Unknown referral: {}", id);
    };
    println!("# {} \u{2192} {}", r.candidate_name, r.job_title);
    println!();
    println!("**Candidate**: {} <{}>", r.candidate_name, r.candidate_email);
    println!("**Referred by**: {} <{}>", r.referrer_name, r.referrer_email);
    println!("**Department**: {}", r.department);
    println!("**Status**: {}", r.status.as_str());
    println!("**Reward**: {} ({})", r.reward_amount, r.reward_status.as_str());
    println!();
    println!("{}", r.justification);
    println!();
    println!("Timeline:");
    for (stage, at) in timeline(r) {
        println!("  {:<10} {}", stage.as_str(), at.format("%Y-%m-%d"));
    }
    if let Some(paid) = r.paid_at {
        println!("  {:<10} {}", "paid", paid.format("%Y-%m-%d"));
    }
    Ok(())
}

/// hirebox referral stats
pub fn stats() -> Result<()> {
    let stats = ReferralStats::compute(&seed_referrals());
    println!("Referral program\n");
    println!("  Total referrals   {}", stats.total);
    println!("  Hires             {}", stats.hires);
    println!("  Conversion        {:.1}%", stats.conversion_rate * 100.0);
    println!("  Rewards paid      {}", stats.rewards_paid);
    println!("  Rewards approved  {}", stats.rewards_approved);
    println!("  Rewards pending   {}", stats.rewards_pending);

    println!("\nBy status\n");
    for status in ReferralStatus::ALL {
        println!("  {:<10} {}", status.as_str(), stats.count(status));
    }

    println!("\nBy department\n");
    for (dept, d) in &stats.by_department {
        println!("  {:<17} {} referral(s), {} hire(s)", dept, d.referrals, d.hires);
    }

    println!("\nTop referrers\n");
    for r in &stats.top_referrers {
        println!(
            "  {:<16} {} referral(s), {} hire(s), {} earned",
            r.name, r.referrals, r.hires, r.earned
        );
    }
    Ok(())
}

/// hirebox referral submit --name N --email E --job J --reason R
pub fn submit_cmd(
    data_dir: &Path,
    name: &str,
    email: &str,
    phone: Option<&str>,
    job: Option<&str>,
    reason: &str,
) -> Result<()> {
    let config = load_config(data_dir)?;
    let rules = rule_store(&config);
    let form = ReferralForm {
        candidate_name: name.to_string(),
        candidate_email: email.to_string(),
        candidate_phone: phone.map(str::to_string),
        job_id: job.map(str::to_string),
        justification: reason.to_string(),
    };
    let options = SubmitOptions {
        delay: Duration::from_millis(config.referral.submit_delay_ms),
        fallback_reward: config.referral.fallback_reward,
        currency: config.referral.currency.clone(),
    };

    // Field-level messages, before anything is "sent"
    if let Err(errors) = form.validate() {
        for e in &errors.errors {
            eprintln!("  {}: {}", e.field.as_str(), e.message);
        }
        bail!("Referral not submitted");
    }

    println!("Submitting referral...");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let receipt = runtime.block_on(submit(&form, &rules, &seed_jobs(), &options))?;

    println!(
        "Thanks! Your referral of {} for {} was submitted.",
        receipt.candidate_name, receipt.job_title
    );
    println!(
        "Estimated reward if hired: {} {}",
        receipt.estimated_reward, receipt.currency
    );
    if let Some(referrer) = config.owner.as_ref().and_then(|o| o.signature()) {
        println!("Referred by: {}", referrer);
    }
    Ok(())
}

/// hirebox reward list
pub fn reward_list(data_dir: &Path) -> Result<()> {
    let config = load_config(data_dir)?;
    let store = rule_store(&config);
    println!("Reward rules\n");
    print_rules(store.list());
    Ok(())
}

/// hirebox reward add ... (session only; rules are not persisted)
#[allow(clippy::too_many_arguments)]
pub fn reward_add(
    data_dir: &Path,
    job_id: &str,
    job_title: &str,
    department: &str,
    level: &str,
    amount: u32,
    currency: Option<&str>,
) -> Result<()> {
    let config = load_config(data_dir)?;
    let mut store = rule_store(&config);
    let rule = store.create(NewRewardRule {
        job_id: job_id.to_string(),
        job_title: job_title.to_string(),
        department: department.to_string(),
        level: level.parse::<ExperienceLevel>()?,
        amount,
        currency: currency.map(str::to_string),
    });
    println!("Created {} (this session only)\n", rule.id);
    print_rules(store.list());
    Ok(())
}

/// hirebox reward update ID ... (session only; rules are not persisted)
pub fn reward_update(
    data_dir: &Path,
    id: &str,
    amount: Option<u32>,
    level: Option<&str>,
    active: Option<bool>,
) -> Result<()> {
    let config = load_config(data_dir)?;
    let mut store = rule_store(&config);
    let patch = RewardRulePatch {
        amount,
        level: level.map(str::parse::<ExperienceLevel>).transpose()?,
        active,
        ..Default::default()
    };
    if store.update(id, patch).is_none() {
        bail!("Unknown reward rule: {}", id);
    }
    println!("Updated {} (this session only)\n", id);
    print_rules(store.list());
    Ok(())
}
