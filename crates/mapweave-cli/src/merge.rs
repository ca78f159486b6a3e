use crate::Config;
use anyhow::{Context, Result};
use clap::Parser;
use mapweave_core::Merger;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct MergeCommand {
    /// Mapping document to merge
    input: PathBuf,

    /// Where to write the merged document; standard output when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl MergeCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        let types = config.type_catalog();
        let templates = mapweave_sql::templates(config.mapper.flavor);
        let merger =
            Merger::new(&types, &templates).key_type_policy(config.mapper.key_type_policy);

        let file = fs::File::open(&self.input)
            .with_context(|| format!("failed to open `{}`", self.input.display()))?;

        let mut buf = vec![];
        let merged = merger
            .merge(file, &mut buf)
            .with_context(|| format!("failed to merge `{}`", self.input.display()))?;

        tracing::info!(
            input = %self.input.display(),
            namespace = merged.namespace(),
            added = merged.added().len(),
            retained = merged.retained().len(),
            pass_through = merged.is_pass_through(),
            "merged document"
        );

        match &self.output {
            Some(output) => fs::write(output, &buf)
                .with_context(|| format!("failed to write `{}`", output.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&buf)?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}
