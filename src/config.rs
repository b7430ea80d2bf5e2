//! Run configuration
//!
//! [`ScanConfig`] owns every tunable the pipeline consults: which marker
//! keywords exist and which generation strategy each requests, the name of the
//! reflection-enabling header, and where generated artifacts go. The CLI builds
//! one from its flags; library callers start from [`ScanConfig::default`].

use crate::codegen::Strategy;
use std::path::{Path, PathBuf};

pub const DEFAULT_REFLECTION_HEADER: &str = "Reflection.hpp";
pub const DEFAULT_ARTIFACT_SUFFIX: &str = "generated.hpp";
pub const DEFAULT_OUTPUT_DIR: &str = "generated";
pub const MASTER_ARTIFACT_STEM: &str = "reflection";

/// A marker keyword and the strategy it requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub keyword: String,
    pub strategy: Strategy,
}

impl Marker {
    pub fn new(keyword: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            keyword: keyword.into(),
            strategy,
        }
    }
}

/// Settings shared by every scan session in a run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub markers: Vec<Marker>,
    pub reflection_header: String,
    pub artifact_suffix: String,
    pub output_dir: PathBuf,
    pub write_master: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            markers: vec![
                Marker::new("printable", Strategy::Print),
                Marker::new("serializable", Strategy::Serialize),
            ],
            reflection_header: DEFAULT_REFLECTION_HEADER.to_string(),
            artifact_suffix: DEFAULT_ARTIFACT_SUFFIX.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            write_master: true,
        }
    }
}

impl ScanConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_artifact_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.artifact_suffix = suffix.into();
        self
    }

    pub fn with_reflection_header(mut self, header: impl Into<String>) -> Self {
        self.reflection_header = header.into();
        self
    }

    pub fn with_master(mut self, enabled: bool) -> Self {
        self.write_master = enabled;
        self
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.retain(|m| m.keyword != marker.keyword);
        self.markers.push(marker);
        self
    }

    /// Strategy requested by `token`, if it is a marker keyword
    pub fn marker_strategy(&self, token: &str) -> Option<Strategy> {
        self.markers
            .iter()
            .find(|m| m.keyword == token)
            .map(|m| m.strategy)
    }

    /// File name of the artifact generated for `input`
    ///
    /// `src/main.hpp` → `main.generated.hpp`
    pub fn artifact_name(&self, input: &Path) -> String {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}.{}", stem, self.artifact_suffix)
    }

    pub fn artifact_path(&self, input: &Path) -> PathBuf {
        self.output_dir.join(self.artifact_name(input))
    }

    pub fn master_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", MASTER_ARTIFACT_STEM, self.artifact_suffix))
    }

    /// The directive every input must carry to enable reflection
    pub fn reflection_directive(&self) -> String {
        format!("#include \"{}\"", self.reflection_header)
    }

    /// Angle-bracket spelling of [`Self::reflection_directive`], also accepted
    pub fn reflection_directive_angled(&self) -> String {
        format!("#include <{}>", self.reflection_header)
    }

    /// The directive that pulls the generated artifact back into `input`
    pub fn generated_directive(&self, input: &Path) -> String {
        format!("#include \"{}\"", self.artifact_name(input))
    }
}
