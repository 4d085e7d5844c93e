use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hirebox::cli::{Cli, Commands, InboxCommands, ReferralCommands, RewardCommands};
use hirebox::inbox::commands as inbox;
use hirebox::referral::commands as referral;

/// Data directory for this invocation: --data-dir, then --space, then the usual resolution.
fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(ref dir) = cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(ref space_name) = cli.space {
        return match hirebox::app_config::resolve_space(Some(space_name))? {
            Some(p) => Ok(p),
            None => anyhow::bail!("No spaces configured. Run 'hirebox init' first."),
        };
    }
    Ok(hirebox::resolve::data_dir())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("HIREBOX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("hirebox=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            ref path,
            ref name,
            ref email,
            ref space_name,
            force,
        } => hirebox::init::run(path, name, email, space_name, force),
        Commands::Spaces => hirebox::app_config::run_list(),
        Commands::Help { ref filter } => hirebox::help::run(filter.as_deref()),
        Commands::Inbox(ref cmd) => {
            let dir = data_dir(&cli)?;
            match cmd {
                InboxCommands::List { filter, query } => inbox::list(&dir, filter, query),
                InboxCommands::Show { id } => inbox::show(&dir, id),
                InboxCommands::Counts => inbox::counts(&dir),
                InboxCommands::Read { id } => inbox::mark_read(&dir, id),
                InboxCommands::Unread { id } => inbox::mark_unread(&dir, id),
                InboxCommands::Archive { id } => inbox::archive(&dir, id),
                InboxCommands::Unarchive { id } => inbox::unarchive(&dir, id),
                InboxCommands::Delete { id, from } => inbox::delete(&dir, id, from),
                InboxCommands::Restore { id } => inbox::restore(&dir, id),
                InboxCommands::Purge { id } => inbox::purge(&dir, id),
                InboxCommands::Reply { id, body } => inbox::reply(&dir, id, body),
                InboxCommands::Forward { id, to } => inbox::forward(&dir, id, to.as_deref()),
                InboxCommands::Send { to, subject, body } => inbox::send(&dir, to, subject, body),
                InboxCommands::Watch { interval } => hirebox::watch::run(&dir, *interval),
            }
        }
        Commands::Referral(ref cmd) => match cmd {
            ReferralCommands::Jobs => referral::jobs(),
            ReferralCommands::List {
                status,
                query,
                referrer,
            } => referral::list(status.as_deref(), query, referrer.as_deref()),
            ReferralCommands::Show { id } => referral::show(id),
            ReferralCommands::Stats => referral::stats(),
            ReferralCommands::Submit {
                name,
                email,
                phone,
                job,
                reason,
            } => {
                let dir = data_dir(&cli)?;
                referral::submit_cmd(&dir, name, email, phone.as_deref(), job.as_deref(), reason)
            }
        },
        Commands::Reward(ref cmd) => {
            let dir = data_dir(&cli)?;
            match cmd {
                RewardCommands::List => referral::reward_list(&dir),
                RewardCommands::Add {
                    job,
                    job_title,
                    department,
                    level,
                    amount,
                    currency,
                } => referral::reward_add(
                    &dir,
                    job,
                    job_title,
                    department,
                    level,
                    *amount,
                    currency.as_deref(),
                ),
                RewardCommands::Update {
                    id,
                    amount,
                    level,
                    active,
                } => referral::reward_update(&dir, id, *amount, level.as_deref(), *active),
            }
        }
    }
}
