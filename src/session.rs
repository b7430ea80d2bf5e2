//! One input file, start to finish
//!
//! [`scan`] is the pure part of the pipeline: text in, records and scaffolds
//! out. [`ScanSession`] wraps it with the file system: reading the input,
//! checking the two required include directives and writing the artifact.
//! Nothing here outlives a single file.

use crate::codegen::writer::{render_artifact, write_artifact};
use crate::codegen::ClassMap;
use crate::config::ScanConfig;
use crate::errors::{Result, ScanError};
use crate::scanner::{extract, normalize, tokenize, MetaInfo};
use log::{debug, trace};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Result of scanning one source text
#[derive(Debug)]
pub struct Scan {
    pub records: Vec<MetaInfo>,
    pub classes: ClassMap,
}

/// Runs normalization, extraction and emission over `source`
pub fn scan(source: &str, config: &ScanConfig) -> Result<Scan> {
    let normalized = normalize(source)?;
    let tokens = tokenize(&normalized.text);
    trace!("{} tokens", tokens.len());

    let records = extract(&tokens, config)?;

    // Fails if the replay no longer lines up with the masked literals.
    normalized.restore()?;

    let classes: ClassMap = records.iter().collect();
    Ok(Scan { records, classes })
}

/// What a successful session produced
#[derive(Debug)]
pub struct SessionOutput {
    pub input: PathBuf,
    pub artifact_path: PathBuf,
    pub artifact_name: String,
    pub records: Vec<MetaInfo>,
    pub elapsed: Duration,
}

/// Processes a single input file against a shared configuration
pub struct ScanSession<'a> {
    input: PathBuf,
    config: &'a ScanConfig,
}

impl<'a> ScanSession<'a> {
    pub fn new(input: impl Into<PathBuf>, config: &'a ScanConfig) -> Self {
        Self {
            input: input.into(),
            config,
        }
    }

    /// Reads, validates, scans and writes; the artifact is only written on success
    pub fn run(self) -> Result<SessionOutput> {
        let started = Instant::now();

        let source = fs::read_to_string(&self.input).map_err(|source| {
            ScanError::Unreadable {
                path: self.input.clone(),
                source,
            }
        })?;
        self.check_includes(&source)?;

        let Scan { records, classes } = scan(&source, self.config)?;

        let input_name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let artifact_name = self.config.artifact_name(&self.input);
        let artifact_path = self.config.artifact_path(&self.input);
        write_artifact(&artifact_path, &render_artifact(&input_name, &classes))?;

        let elapsed = started.elapsed();
        debug!(
            "{}: {} marked members in {} types, {:?}",
            self.input.display(),
            records.len(),
            classes.len(),
            elapsed
        );

        Ok(SessionOutput {
            input: self.input,
            artifact_path,
            artifact_name,
            records,
            elapsed,
        })
    }

    fn check_includes(&self, source: &str) -> Result<()> {
        let quoted = self.config.reflection_directive();
        if !source.contains(&quoted)
            && !source.contains(&self.config.reflection_directive_angled())
        {
            return Err(ScanError::MissingReflectionInclude { expected: quoted });
        }

        let trailing = self.config.generated_directive(&self.input);
        if !source.contains(&trailing) {
            return Err(ScanError::MissingGeneratedInclude { expected: trailing });
        }
        Ok(())
    }
}
