//! List catalogue entries and the keys they grant

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use talent_core::{KeyIndex, StatKey, TalentDefinition};

use crate::utils;

/// List catalogue entries and the keys they grant
#[derive(Parser)]
pub struct Talents {
    /// Catalogue file (defaults to $TALENT_DATA_DIR/talents.ron, then the embedded catalogue)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Show each table's rank thresholds
    #[arg(short, long)]
    verbose: bool,

    /// List every known stat key instead, marking those the catalogue grants
    #[arg(long)]
    keys: bool,
}

impl Talents {
    pub fn execute(self) -> Result<()> {
        let catalogue = utils::load_catalogue(self.path.as_deref())?;

        if self.keys {
            print_keys(catalogue.key_index());
            return Ok(());
        }

        for definition in &catalogue {
            let header = match definition.base() {
                Some(base) => format!("{} ({} → {})", definition.name(), base, definition.id()),
                None => format!("{} ({})", definition.name(), definition.id()),
            };
            println!("{}", style(header).bold().yellow());
            print_tables(definition, self.verbose);
            println!();
        }

        Ok(())
    }
}

fn print_keys(index: &KeyIndex) {
    println!("{}", style("Stat keys").bold().cyan());
    for key in StatKey::all() {
        let (namespace, name, rule) = match key {
            StatKey::Bonus(key) => (
                "bonus",
                key.to_string(),
                format!("{} {}", key.kind(), key.combine()),
            ),
            StatKey::Ability(key) => ("ability", key.to_string(), "max".to_string()),
            StatKey::Specialization(key) => ("unlock", key.to_string(), "any".to_string()),
        };
        let line = format!("  {namespace:<8} {name:<24} {rule}");
        if index.contains(key) {
            println!("{}", style(line).green());
        } else {
            println!("{}", style(line).dim());
        }
    }
}

fn print_tables(definition: &TalentDefinition, verbose: bool) {
    for (key, table) in definition.bonus_tables() {
        let steps = table
            .steps()
            .iter()
            .map(|(threshold, value)| format!("{threshold}:{}", utils::format_bonus(key, *value)));
        print_line("bonus", key.as_ref(), table.len(), steps, verbose);
    }
    for (key, table) in definition.ability_tables() {
        let steps = table
            .steps()
            .iter()
            .map(|(threshold, tier)| format!("{threshold}:{tier}"));
        print_line("ability", key.as_ref(), table.len(), steps, verbose);
    }
    for (key, table) in definition.specialization_tables() {
        let steps = table
            .steps()
            .iter()
            .map(|(threshold, unlocked)| format!("{threshold}:{unlocked}"));
        print_line("unlock", key.as_ref(), table.len(), steps, verbose);
    }
}

fn print_line(
    namespace: &str,
    key: &str,
    len: usize,
    steps: impl Iterator<Item = String>,
    verbose: bool,
) {
    if verbose {
        let steps: Vec<String> = steps.collect();
        println!("  {:<8} {:<24} {}", namespace, key, steps.join(" "));
    } else {
        println!("  {:<8} {:<24} {} steps", namespace, key, len);
    }
}
