//! Generated code blocks with named insertion points
//!
//! A [`Scaffold`] is an ordered list of sections. Fixed sections hold lines
//! written once when the scaffold is created; body sections are named
//! [`Region`]s that grow by one line per marked member. Inserting into a region
//! never depends on a line index, so the surrounding template can change shape
//! freely.

use super::Strategy;

/// Named insertion point inside a scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Member lines of a `Printer<T>::Print` specialization
    PrintBody,
    /// Member lines of a `File::Write<T>` specialization
    WriteBody,
    /// Member lines of a `File::Read<T>` specialization
    ReadBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Fixed(Vec<String>),
    Body { region: Region, lines: Vec<String> },
}

/// One strategy's generated block for one type path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    strategy: Strategy,
    sections: Vec<Section>,
}

impl Scaffold {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            sections: Vec::new(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Appends a fixed line
    pub fn line(mut self, line: impl Into<String>) -> Self {
        match self.sections.last_mut() {
            Some(Section::Fixed(lines)) => lines.push(line.into()),
            _ => self.sections.push(Section::Fixed(vec![line.into()])),
        }
        self
    }

    /// Opens an empty named region at the current end of the scaffold
    pub fn region(mut self, region: Region) -> Self {
        self.sections.push(Section::Body {
            region,
            lines: Vec::new(),
        });
        self
    }

    /// Appends `line` to the end of `region`
    ///
    /// Returns false if the scaffold has no such region.
    pub fn insert(&mut self, region: Region, line: impl Into<String>) -> bool {
        let target = self.sections.iter_mut().find_map(|section| match section {
            Section::Body { region: r, lines } if *r == region => Some(lines),
            _ => None,
        });

        match target {
            Some(lines) => {
                lines.push(line.into());
                true
            }
            None => false,
        }
    }

    /// Current contents of `region`
    pub fn body(&self, region: Region) -> &[String] {
        self.sections
            .iter()
            .find_map(|section| match section {
                Section::Body { region: r, lines } if *r == region => {
                    Some(lines.as_slice())
                }
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Every line in output order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().flat_map(|section| {
            let lines = match section {
                Section::Fixed(lines) => lines,
                Section::Body { lines, .. } => lines,
            };
            lines.iter().map(String::as_str)
        })
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}
