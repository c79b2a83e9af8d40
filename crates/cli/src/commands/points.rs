//! Print the level → talent point table

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::utils;

/// Print the level → talent point table
#[derive(Parser)]
pub struct Points {
    /// Progression config (defaults to $TALENT_DATA_DIR/progression.toml, then built-in tiers)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Points {
    pub fn execute(self) -> Result<()> {
        let config = utils::load_config(self.config.as_deref())?;
        let schedule = config.schedule()?;

        println!(
            "{} {} levels, {} points at the cap",
            style("Schedule:").bold().cyan(),
            schedule.max_level(),
            schedule.max_points()
        );
        println!();
        println!("{}", style(" Level  Gained  Total").bold().yellow());

        let mut previous = 0;
        for (level, total) in schedule.levels() {
            println!("{:>6}  {:>6}  {:>5}", level, total - previous, total);
            previous = total;
        }

        Ok(())
    }
}
