//! Load and validate a talent catalogue
//!
//! Parses the catalogue, composes specializations and reports what it found.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;

use crate::utils;

/// Load and validate a talent catalogue
#[derive(Parser)]
pub struct Validate {
    /// Catalogue file (defaults to $TALENT_DATA_DIR/talents.ron, then the embedded catalogue)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let origin = utils::catalogue_origin(self.path.as_deref());
        println!("{} {}", style("Catalogue:").bold().cyan(), origin);

        let catalogue = match utils::load_catalogue(self.path.as_deref()) {
            Ok(catalogue) => catalogue,
            Err(err) => {
                println!("{} {:#}", style("✗ Invalid:").bold().red(), err);
                return Err(err);
            }
        };

        let specializations = catalogue
            .iter()
            .filter(|definition| definition.base().is_some())
            .count();
        let index = catalogue.key_index();

        println!("{}", style("✓ Valid").bold().green());
        println!();
        println!("{}", style("Contents:").bold().yellow());
        println!("  Talents:         {}", catalogue.len() - specializations);
        println!("  Specializations: {}", specializations);
        println!("  Bonus keys:      {}", index.bonuses().count());
        println!("  Ability keys:    {}", index.abilities().count());
        println!("  Unlock keys:     {}", index.specializations().count());

        Ok(())
    }
}
