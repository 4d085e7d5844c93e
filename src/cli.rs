use clap::{Parser, Subcommand};
use std::path::PathBuf;

const FILTERS: [&str; 6] = ["all", "unread", "read", "sent", "archived", "deleted"];

#[derive(Parser)]
#[command(name = "hirebox", version, about = "Recruiting inbox and employee referral desk", disable_help_subcommand = true)]
pub struct Cli {
    /// Use a named space from app config
    #[arg(long, global = true)]
    pub space: Option<String>,

    /// Use this data directory directly
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new space
    Init {
        /// Data directory (default: ./hirebox)
        #[arg(value_name = "PATH", default_value = "hirebox")]
        path: PathBuf,

        /// Owner display name
        #[arg(long, default_value = "")]
        name: String,

        /// Owner email
        #[arg(long, default_value = "")]
        email: String,

        /// Space name to register
        #[arg(long = "space-name", default_value = "default")]
        space_name: String,

        /// Overwrite existing .hirebox.toml
        #[arg(long)]
        force: bool,
    },

    /// List configured spaces
    Spaces,

    /// Show command reference
    Help {
        /// Filter commands by name
        filter: Option<String>,
    },

    /// Inbox commands
    #[command(subcommand)]
    Inbox(InboxCommands),

    /// Referral commands
    #[command(subcommand)]
    Referral(ReferralCommands),

    /// Reward rule commands
    #[command(subcommand)]
    Reward(RewardCommands),
}

#[derive(Subcommand)]
pub enum InboxCommands {
    /// List messages
    List {
        #[arg(long, default_value = "all", value_parser = FILTERS)]
        filter: String,

        /// Case-insensitive match on subject or sender
        #[arg(long, default_value = "")]
        query: String,
    },

    /// Open a message, marking it read
    Show { id: String },

    /// Message counts per filter
    Counts,

    /// Mark an inbox message read
    Read { id: String },

    /// Mark an inbox message unread
    Unread { id: String },

    /// Move an inbox message to archived
    Archive { id: String },

    /// Move an archived message back to the inbox
    Unarchive { id: String },

    /// Move a message to deleted
    Delete {
        id: String,

        /// View the message is deleted from
        #[arg(long, default_value = "all", value_parser = FILTERS)]
        from: String,
    },

    /// Restore a deleted message
    Restore { id: String },

    /// Permanently delete a message from deleted
    Purge { id: String },

    /// Reply to a message
    Reply {
        id: String,

        #[arg(long, default_value = "")]
        body: String,
    },

    /// Forward a message
    Forward {
        id: String,

        #[arg(long)]
        to: Option<String>,
    },

    /// Send a new message
    Send {
        #[arg(long)]
        to: String,

        #[arg(long)]
        subject: String,

        #[arg(long, default_value = "")]
        body: String,
    },

    /// Follow changes to the sent folder
    Watch {
        /// Poll interval in seconds
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand)]
pub enum ReferralCommands {
    /// List open positions
    Jobs,

    /// List tracked referrals
    List {
        #[arg(long, value_parser = ["submitted", "reviewed", "screening", "interview", "hired", "rejected"])]
        status: Option<String>,

        /// Match on candidate, job title or department
        #[arg(long, default_value = "")]
        query: String,

        /// Match on referrer name or email
        #[arg(long)]
        referrer: Option<String>,
    },

    /// Show one referral with its timeline
    Show { id: String },

    /// Referral program statistics
    Stats,

    /// Refer a candidate
    Submit {
        /// Candidate name
        #[arg(long, default_value = "")]
        name: String,

        /// Candidate email
        #[arg(long, default_value = "")]
        email: String,

        /// Candidate phone
        #[arg(long)]
        phone: Option<String>,

        /// Job id (see `referral jobs`)
        #[arg(long)]
        job: Option<String>,

        /// Why this candidate is a good fit
        #[arg(long, default_value = "")]
        reason: String,
    },
}

#[derive(Subcommand)]
pub enum RewardCommands {
    /// List reward rules
    List,

    /// Create a reward rule for this session
    Add {
        #[arg(long)]
        job: String,

        #[arg(long = "title")]
        job_title: String,

        #[arg(long, default_value = "")]
        department: String,

        #[arg(long, default_value = "mid", value_parser = ["junior", "mid", "senior", "lead"])]
        level: String,

        #[arg(long)]
        amount: u32,

        #[arg(long)]
        currency: Option<String>,
    },

    /// Update a reward rule for this session
    Update {
        id: String,

        #[arg(long)]
        amount: Option<u32>,

        #[arg(long, value_parser = ["junior", "mid", "senior", "lead"])]
        level: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },
}
