//! Multi-file run driver
//!
//! Sessions run strictly one after another. The only state shared between them
//! is the master header, which every successful session appends to, and the
//! registry of artifact names used to spot two inputs overwriting each other.

use crate::codegen::writer::MasterHeader;
use crate::config::ScanConfig;
use crate::errors::{status, Result, ScanError};
use crate::session::{ScanSession, SessionOutput};
use log::{info, warn};
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one input file
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: Result<SessionOutput>,
}

impl FileReport {
    pub fn status(&self) -> i32 {
        match &self.outcome {
            Ok(_) => status::SUCCESS,
            Err(err) => err.status(),
        }
    }
}

/// Every file report of a run, in processing order
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
}

impl RunSummary {
    /// First non-zero per-file status, or success
    pub fn exit_status(&self) -> i32 {
        self.reports
            .iter()
            .map(FileReport::status)
            .find(|&code| code != status::SUCCESS)
            .unwrap_or(status::SUCCESS)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|r| r.outcome.is_err())
    }
}

/// Drives sessions over a list of inputs
pub struct Runner {
    config: ScanConfig,
    master: Option<MasterHeader>,
    owners: FxHashMap<String, PathBuf>,
}

impl Runner {
    /// Creates the output directory and a fresh master header
    pub fn new(config: ScanConfig) -> Result<Self> {
        fs::create_dir_all(&config.output_dir).map_err(|source| ScanError::Write {
            path: config.output_dir.clone(),
            source,
        })?;

        let master = if config.write_master {
            Some(MasterHeader::create(config.master_path())?)
        } else {
            None
        };

        Ok(Self {
            config,
            master,
            owners: FxHashMap::default(),
        })
    }

    /// Runs one session and records its artifact in the master header
    ///
    /// The master header is only touched once the artifact is on disk. If that
    /// append fails the file is reported with the write error while its
    /// artifact stays in the output directory.
    pub fn process(&mut self, input: &Path) -> FileReport {
        let session = ScanSession::new(input, &self.config).run();
        let outcome = session.and_then(|output| {
            self.register(&output);
            if let Some(master) = &self.master {
                master.append(&output.artifact_name)?;
            }
            Ok(output)
        });

        FileReport {
            input: input.to_path_buf(),
            outcome,
        }
    }

    /// Processes every input in order
    pub fn run<P: AsRef<Path>>(self, inputs: &[P]) -> RunSummary {
        self.run_with(inputs, |_| {})
    }

    /// Like [`Runner::run`], handing each report to `on_report` as soon as its
    /// file is done
    pub fn run_with<P, F>(mut self, inputs: &[P], mut on_report: F) -> RunSummary
    where
        P: AsRef<Path>,
        F: FnMut(&FileReport),
    {
        let mut summary = RunSummary::default();
        for input in inputs {
            let report = self.process(input.as_ref());
            on_report(&report);
            summary.reports.push(report);
        }

        info!(
            "{} of {} files processed successfully",
            summary.reports.len() - summary.failures().count(),
            summary.reports.len()
        );
        summary
    }

    fn register(&mut self, output: &SessionOutput) {
        if let Some(previous) = self
            .owners
            .insert(output.artifact_name.clone(), output.input.clone())
        {
            warn!(
                "{} and {} both generate {}; the later one wins",
                previous.display(),
                output.input.display(),
                output.artifact_name
            );
        }
    }
}
