//! Output writing
//!
//! One artifact per input file, plus the master header that a run grows by one
//! include per artifact. Both start with `#pragma once`.

use super::emitter::ClassMap;
use crate::errors::{Result, ScanError};
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const INCLUDE_GUARD: &str = "#pragma once";

/// Renders the artifact text for one input
///
/// `input_name` is the file name the artifact includes back, so the
/// specializations see the types they are written for.
pub fn render_artifact(input_name: &str, classes: &ClassMap) -> String {
    let mut out = String::new();
    out.push_str(INCLUDE_GUARD);
    out.push('\n');
    out.push_str(&format!("#include \"{}\"\n", input_name));

    for entry in classes.entries() {
        out.push('\n');
        out.push_str(&format!("// {}\n", entry.path));
        for line in entry.lines() {
            out.push_str(line);
            out.push('\n');
        }
    }

    out
}

/// Writes `contents` to `path`, creating the parent directory if needed
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| ScanError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)?;
    debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// The run-wide header that includes every generated artifact
#[derive(Debug)]
pub struct MasterHeader {
    path: PathBuf,
}

impl MasterHeader {
    /// Creates (or truncates) the header with only its guard line
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let header = Self { path: path.into() };
        write_artifact(&header.path, &format!("{}\n", INCLUDE_GUARD))?;
        Ok(header)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends an include for `artifact_name`; the file is closed again afterwards
    pub fn append(&self, artifact_name: &str) -> Result<()> {
        let write_error = |source| ScanError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(write_error)?;
        writeln!(file, "#include \"{}\"", artifact_name).map_err(write_error)?;
        Ok(())
    }
}
