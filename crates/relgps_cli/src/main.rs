//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `relgps_core` linkage without the mobile shell.
//! - Print family groups and upcoming birthdays for a dataset file.
//!
//! Usage: `relgps_cli [dataset.json] [YYYY-MM-DD]`. Without a file the
//! bundled sample household is used; without a date, local today.

use chrono::{Local, NaiveDate};
use relgps_core::{
    classify, parse_birthday, upcoming_events, FamilyDataset, Member, UpcomingQuery,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("relgps_core ping={}", relgps_core::ping());
    println!("relgps_core version={}", relgps_core::core_version());

    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let dataset = match args.first() {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|err| format!("cannot read `{path}`: {err}"))?;
            FamilyDataset::from_json_str(&text).map_err(|err| err.to_string())?
        }
        None => FamilyDataset::sample().map_err(|err| err.to_string())?,
    };
    let reference = match args.get(1) {
        Some(raw) => parse_birthday(raw)
            .ok()
            .flatten()
            .ok_or_else(|| format!("invalid date `{raw}`; expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };

    let main = dataset
        .main_member()
        .ok_or_else(|| "dataset has no resolvable main member".to_string())?;
    println!("main member={} ({})", main.name, main.id);

    print_events(&dataset.members, reference);

    let groups = classify(&main.id, &dataset.members, &dataset.relationships);
    match &groups.spouse {
        Some(spouse) => println!("spouse: {}", spouse.name),
        None => println!("spouse: -"),
    }
    print_section("children", &groups.children);
    print_section("grandchildren", &groups.grandchildren);
    print_section("others", &groups.others);
    Ok(())
}

fn print_events(members: &[Member], reference: NaiveDate) {
    let events = upcoming_events(members, reference, &UpcomingQuery::default());
    println!("upcoming as of {reference}: {}", events.len());
    for event in events {
        println!(
            "  {} {} in {} day(s)",
            event.date, event.member_name, event.days_until
        );
    }
}

fn print_section(title: &str, members: &[Member]) {
    let names = members
        .iter()
        .map(|member| member.name.as_str())
        .collect::<Vec<_>>();
    println!("{title}: {}", names.join(", "));
}
