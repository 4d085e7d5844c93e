//! Seed inbox shipped with every space.

use chrono::{DateTime, TimeZone, Utc};

use super::types::{Category, Message, Priority};
use crate::util::preview;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn message(
    id: &str,
    sender: &str,
    subject: &str,
    content: &str,
    category: Category,
    priority: Priority,
    read: bool,
    timestamp: DateTime<Utc>,
    action_required: Option<&str>,
) -> Message {
    Message {
        id: id.to_string(),
        sender: sender.to_string(),
        recipient: None,
        subject: subject.to_string(),
        preview: preview(content, 90),
        content: content.to_string(),
        category,
        priority,
        read,
        timestamp,
        action_required: action_required.map(str::to_string),
        origin: None,
    }
}

/// The mock inbox. Ids "1" and "2" start unread, the rest read.
pub fn seed_messages() -> Vec<Message> {
    vec![
        message(
            "1",
            "Sarah Chen",
            "New application: Senior Frontend Engineer",
            "Hi team,\n\nA new application came in for the Senior Frontend Engineer role from \
             Jordan Alvarez (8 years of React, previously at a payments startup). The resume and \
             portfolio are attached to the candidate profile.\n\nCould someone from the hiring \
             panel take a first look before Friday?\n\nThanks,\nSarah",
            Category::Application,
            Priority::High,
            false,
            at(2024, 3, 18, 9, 15),
            Some("Review application by Friday"),
        ),
        message(
            "2",
            "Interview Scheduler",
            "Interview confirmed: Marcus Lee, Backend Engineer",
            "Marcus Lee confirmed the onsite interview for the Backend Engineer position on \
             March 21 at 14:00. Panel: system design, coding, and culture add. Please send the \
             interview kit to all panelists at least 24 hours in advance.",
            Category::Interview,
            Priority::High,
            false,
            at(2024, 3, 18, 8, 40),
            Some("Send interview kit to panel"),
        ),
        message(
            "3",
            "David Park",
            "Take-home assignment submitted",
            "Hello,\n\nI have submitted my take-home assignment for the Data Analyst role. The \
             notebook and a short write-up are in the shared folder. Happy to walk through my \
             approach whenever suits the team.\n\nBest regards,\nDavid",
            Category::Task,
            Priority::Medium,
            true,
            at(2024, 3, 17, 16, 5),
            None,
        ),
        message(
            "4",
            "System",
            "Weekly pipeline digest",
            "This week: 24 new applications, 9 screenings completed, 5 interviews scheduled, \
             2 offers extended. Time-to-first-response averaged 1.8 days, down from 2.4 last \
             week.",
            Category::System,
            Priority::Low,
            true,
            at(2024, 3, 17, 7, 0),
            None,
        ),
        message(
            "5",
            "Priya Natarajan",
            "Offer letter approval needed: Product Designer",
            "Hi,\n\nThe offer letter for Emma Rossi (Product Designer, mid level) is ready. \
             Compensation is within band; the start date is April 15. Please approve so that we \
             can send it out today.\n\nPriya",
            Category::Task,
            Priority::High,
            true,
            at(2024, 3, 16, 11, 30),
            Some("Approve offer letter"),
        ),
        message(
            "6",
            "Talent Ops",
            "Referral bonus policy updated",
            "The referral bonus table has been refreshed for Q2. Senior and lead engineering \
             roles now carry a higher reward, and junior roles fall back to the default junior \
             rule. See the referral portal for the full table.",
            Category::System,
            Priority::Medium,
            true,
            at(2024, 3, 15, 10, 0),
            None,
        ),
    ]
}
