//! Command reference for hirebox.

use anyhow::{Result, bail};

const COMMANDS: &[(&str, &str)] = &[
    ("init [PATH] [--name N]", "Create a space and register it"),
    ("spaces", "List configured spaces"),
    ("help [FILTER]", "Show this reference"),
];

const INBOX_COMMANDS: &[(&str, &str)] = &[
    ("inbox list [--filter F] [--query Q]", "List messages (all|unread|read|sent|archived|deleted)"),
    ("inbox show ID", "Open a message (marks it read)"),
    ("inbox counts", "Message counts per filter"),
    ("inbox read ID", "Mark an inbox message read"),
    ("inbox unread ID", "Mark an inbox message unread"),
    ("inbox archive ID", "Move an inbox message to archived"),
    ("inbox unarchive ID", "Move an archived message back to the inbox"),
    ("inbox delete ID [--from F]", "Move a message to deleted"),
    ("inbox restore ID", "Restore a deleted message to where it came from"),
    ("inbox purge ID", "Permanently delete a message"),
    ("inbox reply ID [--body B]", "Reply to a message"),
    ("inbox forward ID [--to ADDR]", "Forward a message"),
    ("inbox send --to ADDR --subject S", "Send a new message"),
    ("inbox watch [--interval N]", "Follow changes to the sent folder"),
];

const REFERRAL_COMMANDS: &[(&str, &str)] = &[
    ("referral jobs", "List open positions"),
    ("referral list [--status S] [--query Q]", "Track referrals through the pipeline"),
    ("referral show ID", "Referral details and timeline"),
    ("referral stats", "Referral program dashboard"),
    ("referral submit --name N --email E --job J", "Refer a candidate"),
    ("reward list", "List reward rules"),
    ("reward add --job J --amount N ...", "Create a reward rule (session only)"),
    ("reward update ID [--amount N]", "Update a reward rule (session only)"),
];

pub fn run(filter: Option<&str>) -> Result<()> {
    if let Some(filter) = filter {
        let matches: Vec<(&str, &str)> = COMMANDS
            .iter()
            .chain(INBOX_COMMANDS.iter())
            .chain(REFERRAL_COMMANDS.iter())
            .filter(|(name, _)| name.contains(filter))
            .copied()
            .collect();
        if matches.is_empty() {
            bail!("No command matching '{}'", filter);
        }
        print_table(&matches);
        return Ok(());
    }

    println!("hirebox commands\n");
    print_table(COMMANDS);

    println!("\ninbox commands\n");
    print_table(INBOX_COMMANDS);

    println!("\nreferral commands\n");
    print_table(REFERRAL_COMMANDS);

    Ok(())
}

fn print_table(rows: &[(&str, &str)]) {
    let name_w = rows.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    for (name, desc) in rows {
        println!("  {:<width$}  {}", name, desc, width = name_w);
    }
}
