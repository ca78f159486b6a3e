use crate::MapperConfig;
use anyhow::{bail, Context, Result};
use mapweave_core::Merger;
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Merges every mapping document found under a location.
pub struct Batch<'a> {
    config: &'a MapperConfig,
    pattern: Regex,
    merger: Merger<'a>,
}

/// What happened to one input file
#[derive(Debug)]
pub enum Outcome {
    /// The merged document was written to `output`
    Written {
        input: PathBuf,
        output: PathBuf,
        added: Vec<String>,
    },

    /// Nothing was written
    Skipped {
        input: PathBuf,
        output: PathBuf,
        reason: SkipReason,
    },

    /// Reading, merging or writing failed
    Failed { input: PathBuf, error: anyhow::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The output exists and overwriting is off
    OutputExists,

    /// The output name equals the input name
    SameAsInput,
}

impl Outcome {
    pub fn input(&self) -> &Path {
        match self {
            Outcome::Written { input, .. }
            | Outcome::Skipped { input, .. }
            | Outcome::Failed { input, .. } => input,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Per-file outcomes of a batch run, in input path order
#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    pub fn written(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Written { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failed)
    }

    fn count(&self, f: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|outcome| f(outcome)).count()
    }
}

impl<'a> Batch<'a> {
    pub fn new(config: &'a MapperConfig, merger: Merger<'a>) -> Result<Self> {
        if config.replace_from.is_empty() {
            bail!("`replace_from` must not be empty");
        }

        let pattern = Regex::new(&format!("^(?:{})$", config.pattern))
            .with_context(|| format!("invalid file name pattern `{}`", config.pattern))?;

        Ok(Self {
            config,
            pattern,
            merger,
        })
    }

    /// Returns the mapping documents under `location`, sorted by path.
    ///
    /// A file location is returned as-is, without matching the pattern.
    pub fn collect(&self, location: &Path) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(location)
            .with_context(|| format!("cannot access `{}`", location.display()))?;

        if !metadata.is_dir() {
            return Ok(vec![location.to_path_buf()]);
        }

        let mut files = vec![];
        self.walk(location, &mut files)?;
        files.sort();
        Ok(files)
    }

    fn walk(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            // follows symlinked directories
            if path.is_dir() {
                self.walk(&path, files)?;
            } else if self.matches(&path) {
                files.push(path);
            }
        }
        Ok(())
    }

    fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.is_match(name))
    }

    /// The output path for `input`: same directory, with the configured part
    /// of the file name replaced.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
            .replace(&self.config.replace_from, &self.config.replace_to);
        input.with_file_name(name)
    }

    /// Merges every document under `location` in parallel.
    ///
    /// Every file is attempted; failures are recorded in the report.
    pub fn run(&self, location: &Path) -> Result<Report> {
        let files = self.collect(location)?;
        tracing::debug!(location = %location.display(), files = files.len(), "collected mapping documents");

        let outcomes = files.par_iter().map(|input| self.process(input)).collect();
        Ok(Report { outcomes })
    }

    fn process(&self, input: &Path) -> Outcome {
        let output = self.output_path(input);

        if output == input {
            tracing::info!(input = %input.display(), "output name equals input name; skipping");
            return Outcome::Skipped {
                input: input.to_path_buf(),
                output,
                reason: SkipReason::SameAsInput,
            };
        }

        if !self.config.overwrite && output.exists() {
            tracing::info!(output = %output.display(), "output already exists; skipping");
            return Outcome::Skipped {
                input: input.to_path_buf(),
                output,
                reason: SkipReason::OutputExists,
            };
        }

        match self.merge_file(input, &output) {
            Ok(added) => {
                tracing::info!(
                    input = %input.display(),
                    output = %output.display(),
                    added = added.len(),
                    "wrote merged document"
                );
                Outcome::Written {
                    input: input.to_path_buf(),
                    output,
                    added,
                }
            }
            Err(error) => {
                tracing::warn!(input = %input.display(), "merge failed: {error:#}");
                Outcome::Failed {
                    input: input.to_path_buf(),
                    error,
                }
            }
        }
    }

    fn merge_file(&self, input: &Path, output: &Path) -> Result<Vec<String>> {
        let file = fs::File::open(input)
            .with_context(|| format!("failed to open `{}`", input.display()))?;

        // a failed merge must leave no partial output behind
        let mut buf = vec![];
        let merged = self.merger.merge(file, &mut buf)?;

        fs::write(output, buf)
            .with_context(|| format!("failed to write `{}`", output.display()))?;

        Ok(merged.added_ids().map(str::to_string).collect())
    }
}
