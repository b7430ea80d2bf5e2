//! Per-type scaffold accumulation
//!
//! The [`ClassMap`] keeps one [`ClassEntry`] per fully-qualified path, in the
//! order paths were first seen. Inside an entry there is at most one scaffold
//! per strategy; the first marker creates it and every later marker of the
//! same strategy only adds body lines.

use super::scaffold::Scaffold;
use crate::scanner::MetaInfo;
use log::{debug, warn};
use rustc_hash::FxHashMap;

/// Generated scaffolds for one fully-qualified type path
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub path: String,
    pub scaffolds: Vec<Scaffold>,
}

impl ClassEntry {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            scaffolds: Vec::new(),
        }
    }

    /// Every generated line of this entry, scaffolds in creation order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.scaffolds.iter().flat_map(|s| s.lines())
    }
}

/// Insertion-ordered map from type path to its generated scaffolds
#[derive(Debug, Default)]
pub struct ClassMap {
    entries: Vec<ClassEntry>,
    index: FxHashMap<String, usize>,
}

impl ClassMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into the entry for its path
    pub fn emit(&mut self, meta: &MetaInfo) {
        let path = meta.qualified_path.as_str();
        let slot = match self.index.get(path) {
            Some(&slot) => slot,
            None => {
                self.entries.push(ClassEntry::new(path));
                self.index.insert(path.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[slot];

        let strategy = meta.strategy;
        let scaffold = match entry
            .scaffolds
            .iter()
            .position(|s| s.strategy() == strategy)
        {
            Some(existing) => &mut entry.scaffolds[existing],
            None => {
                debug!("new {} scaffold for {}", strategy, path);
                entry.scaffolds.push(strategy.scaffold(path));
                let last = entry.scaffolds.len() - 1;
                &mut entry.scaffolds[last]
            }
        };

        if !strategy.add_member(scaffold, meta) {
            warn!("{} scaffold for {} has no region for {}", strategy, path, meta.variable_name);
        }
    }

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn get(&self, path: &str) -> Option<&ClassEntry> {
        self.index.get(path).map(|&slot| &self.entries[slot])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a MetaInfo> for ClassMap {
    fn from_iter<I: IntoIterator<Item = &'a MetaInfo>>(records: I) -> Self {
        let mut classes = ClassMap::new();
        for meta in records {
            classes.emit(meta);
        }
        classes
    }
}
