use clap::Subcommand;
use checkin_core::demo;
use chrono::Local;

use super::{follow, open_desk};

#[derive(Subcommand)]
pub enum DemoAction {
    /// Force the test celebration onto the display
    Celebration {
        #[arg(long)]
        follow: bool,
    },
    /// Replace all check-ins with N test users and play the milestone sequence
    Milestone {
        count: usize,
        /// Seed for team assignment
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        follow: bool,
    },
    /// Fill the event to one short of capacity, then check in "Final Winner"
    Goal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        follow: bool,
    },
}

pub fn run(action: DemoAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut desk = open_desk()?;
    let follow_stages = match action {
        DemoAction::Celebration { follow } => {
            demo::force_celebration(&mut desk, Local::now());
            follow
        }
        DemoAction::Milestone {
            count,
            seed,
            follow,
        } => {
            let mut rng = demo::demo_rng(seed);
            let message = demo::simulate_milestone(&mut desk, count, &mut rng, Local::now())?;
            println!("{}", serde_json::to_string_pretty(&message)?);
            follow
        }
        DemoAction::Goal { seed, follow } => {
            let mut rng = demo::demo_rng(seed);
            let receipt = demo::simulate_goal(&mut desk, &mut rng, Local::now())?;
            for event in receipt.events() {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            follow
        }
    };

    if follow_stages {
        follow(&mut desk);
    }
    Ok(())
}
