//! Referral form validation and the simulated submission round-trip.
//!
//! A submission is never appended to the tracked referral list; it only
//! produces a receipt with the estimated reward.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tracing::info;

use super::rules::{RewardRuleStore, estimate_reward};
use super::types::Job;

#[derive(Debug, Clone, Default)]
pub struct ReferralForm {
    pub candidate_name: String,
    pub candidate_email: String,
    pub candidate_phone: Option<String>,
    pub job_id: Option<String>,
    pub justification: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Job,
    Justification,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Job => "job",
            FormField::Justification => "justification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Every field-level problem found in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field.as_str(), e.message))
            .collect();
        write!(f, "invalid referral: {}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn has(&self, field: FormField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl ReferralForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if self.candidate_name.trim().is_empty() {
            errors.push(FieldError {
                field: FormField::Name,
                message: "Candidate name is required",
            });
        }
        let email = self.candidate_email.trim();
        if email.is_empty() {
            errors.push(FieldError {
                field: FormField::Email,
                message: "Email is required",
            });
        } else if !email.contains('@') {
            errors.push(FieldError {
                field: FormField::Email,
                message: "Email is invalid",
            });
        }
        if self.job_id.as_deref().is_none_or(|j| j.trim().is_empty()) {
            errors.push(FieldError {
                field: FormField::Job,
                message: "Please select a position",
            });
        }
        if self.justification.trim().is_empty() {
            errors.push(FieldError {
                field: FormField::Justification,
                message: "Please explain why this candidate is a good fit",
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitOptions {
    pub delay: Duration,
    pub fallback_reward: u32,
    pub currency: String,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            fallback_reward: 500,
            currency: "USD".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub candidate_name: String,
    pub job_id: String,
    pub job_title: String,
    pub estimated_reward: u32,
    pub currency: String,
    pub submitted_at: DateTime<Utc>,
}

/// Validate, wait the fixed simulated delay, then confirm with a reward estimate.
pub async fn submit(
    form: &ReferralForm,
    rules: &RewardRuleStore,
    jobs: &[Job],
    options: &SubmitOptions,
) -> Result<SubmissionReceipt, ValidationErrors> {
    form.validate()?;
    let job_id = form.job_id.clone().unwrap_or_default();

    tokio::time::sleep(options.delay).await;

    let (estimated_reward, currency) =
        estimate_reward(rules, &job_id, options.fallback_reward, &options.currency);
    let job_title = jobs
        .iter()
        .find(|j| j.id == job_id)
        .map(|j| j.title.clone())
        .unwrap_or_else(|| job_id.clone());

    info!(job_id = %job_id, reward = estimated_reward, "referral submitted");
    Ok(SubmissionReceipt {
        candidate_name: form.candidate_name.trim().to_string(),
        job_id,
        job_title,
        estimated_reward,
        currency,
        submitted_at: Utc::now(),
    })
}
