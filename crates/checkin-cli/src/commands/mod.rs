pub mod checkin;
pub mod config;
pub mod demo;

use std::thread;

use checkin_core::{CheckinDesk, Config, Database, KvStore, UiPort};
use chrono::Local;
use tracing::debug;

use crate::terminal::TerminalUi;

pub type Desk = CheckinDesk<Database, TerminalUi>;

/// Open the desk on the user's database without echoing the initial render.
pub fn open_desk() -> Result<Desk, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    let mut desk = CheckinDesk::open(db, TerminalUi::muted(), &config);
    desk.ui_mut().muted = false;
    debug!(
        total = desk.state().total(),
        capacity = config.event.capacity,
        "desk opened"
    );
    Ok(desk)
}

/// Sleep through the pending notification stages, rendering each in turn.
pub fn follow<S: KvStore, U: UiPort>(desk: &mut CheckinDesk<S, U>) {
    while let Some(due) = desk.sequencer().next_due() {
        let wait = (due - Local::now()).to_std().unwrap_or_default();
        thread::sleep(wait);
        desk.tick(Local::now());
    }
}
