//! Build a character and print its aggregated bonuses
//!
//! Talents are added and ranked in the order given, each through the build
//! solver, so a rank beyond the current level pulls the level up. The
//! requested level is applied last.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;
use talent_core::{Build, Level, Points, Rank, ResolvedBuild, TalentId};

use crate::utils;

/// Build a character and print its aggregated bonuses
#[derive(Parser)]
pub struct Inspect {
    /// Character level, applied after all ranks
    #[arg(short, long, value_name = "LEVEL")]
    level: Option<Level>,

    /// Talent rank as `id=rank` (repeatable)
    #[arg(short, long = "rank", value_name = "ID=RANK", value_parser = parse_rank)]
    ranks: Vec<(TalentId, Rank)>,

    /// Catalogue file (defaults to $TALENT_DATA_DIR/talents.ron, then the embedded catalogue)
    #[arg(long, value_name = "PATH")]
    catalogue: Option<PathBuf>,

    /// Progression config (defaults to $TALENT_DATA_DIR/progression.toml, then built-in tiers)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Points, per-talent caps and aggregated values
    Summary,
    /// Full JSON output
    Json,
}

#[derive(Serialize)]
struct Report {
    level: Level,
    min_level: Level,
    total_points: Points,
    allocated_points: Points,
    unallocated_points: Points,
    talents: Vec<TalentReport>,
    resolved: ResolvedBuild,
}

#[derive(Serialize)]
struct TalentReport {
    id: TalentId,
    name: String,
    rank: Rank,
    max_rank: Rank,
}

fn parse_rank(arg: &str) -> Result<(TalentId, Rank), String> {
    let (id, rank) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=RANK, got '{arg}'"))?;
    let rank = rank
        .trim()
        .parse::<Rank>()
        .map_err(|e| format!("invalid rank '{rank}': {e}"))?;
    Ok((TalentId::new(id.trim()), rank))
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let catalogue = utils::load_catalogue(self.catalogue.as_deref())?;
        let config = utils::load_config(self.config.as_deref())?;
        let mut build = Build::from_config(&config)?;

        for (id, rank) in &self.ranks {
            let definition = catalogue
                .get(id)
                .with_context(|| format!("Unknown talent '{id}'"))?;
            if build.talent(id).is_none() {
                build.add_talent(definition.clone())?;
            }
            build
                .set_talent_rank(id, *rank)
                .with_context(|| format!("Cannot set {id} to rank {rank}"))?;
        }

        if let Some(level) = self.level {
            build
                .set_level(level)
                .with_context(|| format!("Cannot set level {level}"))?;
        }

        let report = Report {
            level: build.level(),
            min_level: build.min_level(),
            total_points: build.total_points(),
            allocated_points: build.allocated_points(),
            unallocated_points: build.unallocated_points(),
            talents: build
                .talents()
                .iter()
                .map(|talent| TalentReport {
                    id: talent.id().clone(),
                    name: talent.name().to_owned(),
                    rank: talent.rank(),
                    max_rank: build.max_rank_for(talent.id()).unwrap_or_default(),
                })
                .collect(),
            resolved: build
                .aggregator_with_index(catalogue.key_index())
                .resolve_all(),
        };

        match self.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => print_json(&report)?,
        }

        Ok(())
    }
}

fn print_summary(report: &Report) {
    println!("{}", style("=== Build ===").bold().green());
    println!();
    println!("{}", style("Progression:").bold().yellow());
    println!("  Level:       {} (minimum {})", report.level, report.min_level);
    println!(
        "  Points:      {} / {} allocated, {} free",
        report.allocated_points, report.total_points, report.unallocated_points
    );
    println!();

    if !report.talents.is_empty() {
        println!("{}", style("Talents:").bold().yellow());
        for talent in &report.talents {
            println!(
                "  {:<16} rank {:>2} / {:>2}",
                talent.name, talent.rank, talent.max_rank
            );
        }
        println!();
    }

    let resolved = &report.resolved;
    let bonuses: Vec<_> = resolved
        .bonuses
        .iter()
        .filter(|(_, value)| **value != 0.0)
        .collect();
    if !bonuses.is_empty() {
        println!("{}", style("Bonuses:").bold().yellow());
        for (key, value) in bonuses {
            println!(
                "  {:<24} {:>8}  ({})",
                key.as_ref(),
                utils::format_bonus(*key, *value),
                key.combine()
            );
        }
        println!();
    }

    let abilities: Vec<_> = resolved
        .abilities
        .iter()
        .filter(|(_, tier)| **tier > 0)
        .collect();
    if !abilities.is_empty() {
        println!("{}", style("Abilities:").bold().yellow());
        for (key, tier) in abilities {
            println!("  {:<24} {}", key.as_ref(), tier_name(*tier));
        }
        println!();
    }

    let unlocked: Vec<_> = resolved
        .specializations
        .iter()
        .filter(|(_, unlocked)| **unlocked)
        .map(|(key, _)| key.to_string())
        .collect();
    if !unlocked.is_empty() {
        println!("{}", style("Specializations:").bold().yellow());
        println!("  {}", unlocked.join(", "));
        println!();
    }
}

fn tier_name(tier: u8) -> String {
    match tier {
        1 => "Basic".to_string(),
        2 => "Advanced".to_string(),
        3 => "Master".to_string(),
        n => format!("Tier {n}"),
    }
}

fn print_json(report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize build to JSON")?;
    println!("{}", json);
    Ok(())
}
