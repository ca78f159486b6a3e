use crate::batch::{Batch, Outcome, SkipReason};
use crate::Config;
use anyhow::{bail, Result};
use clap::Parser;
use console::style;
use mapweave_core::Merger;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    /// Mapping document or directory to process, overriding `mapper.location`
    #[arg(short, long)]
    location: Option<PathBuf>,

    /// Overwrite outputs that already exist
    #[arg(short, long)]
    force: bool,
}

impl GenerateCommand {
    pub(crate) fn run(self, config: &Config, base_dir: &Path) -> Result<()> {
        println!();
        println!("  {}", style("Generate Mappers").cyan().bold().underlined());
        println!();

        let mut mapper = config.mapper.clone();
        mapper.overwrite |= self.force;

        // relative config locations are resolved against the config file
        let location = match self.location {
            Some(location) => location,
            None => base_dir.join(&mapper.location),
        };

        let types = config.type_catalog();
        let templates = mapweave_sql::templates(mapper.flavor);
        let merger = Merger::new(&types, &templates).key_type_policy(mapper.key_type_policy);

        let report = Batch::new(&mapper, merger)?.run(&location)?;

        if report.outcomes.is_empty() {
            println!(
                "  {}",
                style(format!(
                    "No mapping documents found in {}",
                    location.display()
                ))
                .magenta()
                .dim()
            );
            println!();
            return Ok(());
        }

        for outcome in &report.outcomes {
            print_outcome(outcome);
        }

        println!();
        let summary = format!(
            "{} written, {} skipped, {} failed",
            report.written(),
            report.skipped(),
            report.failed()
        );

        if report.failed() > 0 {
            println!("  {}", style(&summary).red().bold());
            println!();
            bail!("{} mapping document(s) failed to merge", report.failed());
        }

        println!("  {}", style(&summary).green().bold());
        println!();
        Ok(())
    }
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Written { output, added, .. } => {
            let detail = if added.is_empty() {
                String::from("no statements added")
            } else {
                format!("added {}", added.join(", "))
            };
            println!(
                "  {} {} {}",
                style("✓").green().bold(),
                output.display(),
                style(detail).dim()
            );
        }
        Outcome::Skipped { output, reason, .. } => {
            let reason = match reason {
                SkipReason::OutputExists => "already exists",
                SkipReason::SameAsInput => "output name equals input name",
            };
            println!(
                "  {} {} {}",
                style("-").yellow().bold(),
                output.display(),
                style(reason).dim()
            );
        }
        Outcome::Failed { input, error } => {
            println!(
                "  {} {} {}",
                style("✖").red().bold(),
                input.display(),
                style(format!("{error:#}")).red()
            );
        }
    }
}
