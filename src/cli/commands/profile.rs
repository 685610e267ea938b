//! Sender profile command handler.

use anyhow::Result;
use inquire::Text;

use crate::cli::ProfileArgs;
use crate::profile::SenderProfile;
use crate::store::{ProfileStore, SqliteStore};
use crate::ui::{Style, handle_prompt_cancellation};

/// Shows, updates from options, or interactively edits the sender profile.
pub fn run_profile(args: &ProfileArgs) -> Result<()> {
    let store = ProfileStore::new(SqliteStore::new()?);
    let profile = store.load_profile();

    if args.show {
        print_profile(&profile);
        return Ok(());
    }

    if args.has_updates() {
        let updated = apply_updates(profile, args);
        store.save_profile(&updated);
        print_profile(&updated);
        return Ok(());
    }

    handle_prompt_cancellation(|| {
        let updated = prompt_profile(&profile)?;
        store.save_profile(&updated);
        println!();
        println!("{} Profile saved", Style::success("✓"));
        Ok(())
    })
}

fn apply_updates(mut profile: SenderProfile, args: &ProfileArgs) -> SenderProfile {
    let fields = [
        (&mut profile.name, &args.name),
        (&mut profile.department, &args.department),
        (&mut profile.position, &args.position),
        (&mut profile.email, &args.email),
        (&mut profile.fixed_closing_remark, &args.closing),
    ];
    for (slot, value) in fields {
        if let Some(value) = value {
            value.trim().clone_into(slot);
        }
    }
    profile
}

fn prompt_profile(current: &SenderProfile) -> Result<SenderProfile> {
    Ok(SenderProfile {
        name: prompt_field("Name:", &current.name, "e.g. 김철수")?,
        department: prompt_field("Department:", &current.department, "e.g. 개발팀")?,
        position: prompt_field("Position:", &current.position, "e.g. 대리")?,
        email: prompt_field("Email:", &current.email, "e.g. chulsoo@company.com")?,
        fixed_closing_remark: prompt_field(
            "Closing sentence:",
            &current.fixed_closing_remark,
            "Every body ends with this, e.g. 감사합니다. (leave empty for none)",
        )?,
    })
}

fn prompt_field(message: &str, current: &str, help: &str) -> Result<String> {
    let value = Text::new(message)
        .with_initial_value(current)
        .with_help_message(help)
        .prompt()?;
    Ok(value.trim().to_string())
}

fn print_profile(profile: &SenderProfile) {
    let not_set = || Style::secondary("(not set)");
    let show = |value: &str| {
        if value.is_empty() {
            not_set()
        } else {
            Style::value(value)
        }
    };

    println!("{}", Style::header("Sender profile"));
    println!("  {}        {}", Style::label("name"), show(&profile.name));
    println!("  {}  {}", Style::label("department"), show(&profile.department));
    println!("  {}    {}", Style::label("position"), show(&profile.position));
    println!("  {}       {}", Style::label("email"), show(&profile.email));
    println!(
        "  {}     {}",
        Style::label("closing"),
        show(&profile.fixed_closing_remark)
    );
}
