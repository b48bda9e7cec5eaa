use checkin_core::ui::{attendee_line, EMPTY_LIST_TEXT};
use checkin_core::{Event, Team};
use chrono::Utc;

use super::{follow, open_desk};
use crate::terminal::progress_bar;

pub fn add(name: &str, team: &str, follow_stages: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut desk = open_desk()?;
    let receipt = match desk.check_in(name, team) {
        Ok(receipt) => receipt,
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&Event::rejected(&err))?);
            return Err(err.into());
        }
    };

    for event in receipt.events() {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    if follow_stages {
        follow(&mut desk);
    }
    Ok(())
}

pub fn status(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let desk = open_desk()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&desk.snapshot())?);
        return Ok(());
    }

    let state = desk.state();
    println!("Attendance: {}/{}", state.total(), state.capacity());
    println!("{}", progress_bar(&desk.progress()));
    for team in Team::ALL {
        println!(
            "  {} {:<16} {}",
            team.emoji(),
            team.display_name(),
            state.tally().get(team)
        );
    }
    if let Some(leader) = state.tally().highlighted() {
        println!("Leading: {} {}", leader.emoji(), leader.display_name());
    }
    Ok(())
}

pub fn list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let desk = open_desk()?;
    let attendees = desk.state().registry().as_slice();
    if json {
        println!("{}", serde_json::to_string_pretty(attendees)?);
    } else if attendees.is_empty() {
        println!("{EMPTY_LIST_TEXT}");
    } else {
        for attendee in attendees {
            println!("{}", attendee_line(attendee));
        }
    }
    Ok(())
}

pub fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let mut desk = open_desk()?;
    desk.ui_mut().muted = true;
    desk.reset()?;
    let event = Event::StateReset { at: Utc::now() };
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
