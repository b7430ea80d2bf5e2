//! Generation strategies and their templates
//!
//! Each strategy knows the shape of its scaffold and the line(s) a single
//! marked member contributes. Member lines reach the member through its
//! fully-qualified owner (`item.app::Point::x`), so the generated code compiles
//! on its own once the input header is visible. Whether the member really
//! exists is left to that compilation.

use super::scaffold::{Region, Scaffold};
use crate::scanner::MetaInfo;
use std::fmt;

/// What a marker asks to be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `gep::detail::Printer<T>` specialization for `gep::Print`
    Print,
    /// `gep::json::File::Write<T>` / `Read<T>` specializations
    Serialize,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Print => "print",
            Strategy::Serialize => "serialize",
        }
    }

    /// Empty scaffold for the type at `path`
    pub fn scaffold(&self, path: &str) -> Scaffold {
        match self {
            Strategy::Print => Scaffold::new(*self)
                .line(format!("template <> struct gep::detail::Printer<{path}>"))
                .line("{")
                .line(format!(
                    "    static std::ostream& Print(std::ostream& os, size_t indent, const {path}& item)"
                ))
                .line("    {")
                .line(format!(
                    "        os << gep::detail::Color::GREEN << \"{path} {{\" << gep::detail::Color::RESET << '\\n';"
                ))
                .region(Region::PrintBody)
                .line("        os << std::string(indent, '\\t') << gep::detail::Color::GREEN << \"}\" << gep::detail::Color::RESET;")
                .line("        return os;")
                .line("    }")
                .line("};"),
            Strategy::Serialize => Scaffold::new(*self)
                .line(format!(
                    "template <> inline void gep::json::File::Write<{path}>(const {path}& item) {{"
                ))
                .line(format!("    // {path}"))
                .region(Region::WriteBody)
                .line("}")
                .line(format!(
                    "template <> inline void gep::json::File::Read<{path}>({path}& item) const {{"
                ))
                .line(format!("    // {path}"))
                .region(Region::ReadBody)
                .line("}"),
        }
    }

    /// Adds the lines `meta` contributes to an existing scaffold
    ///
    /// Returns false if `scaffold` lacks a region this strategy writes to; the
    /// lines for that region are then lost.
    #[must_use]
    pub fn add_member(&self, scaffold: &mut Scaffold, meta: &MetaInfo) -> bool {
        let member = format!("item.{}::{}", meta.qualified_path, meta.variable_name);
        match self {
            Strategy::Print => scaffold.insert(
                Region::PrintBody,
                format!(
                    "        os << std::string(indent + 1, '\\t') << \"{}: \"; gep::Print(os, indent + 1, {member}); os << '\\n';",
                    meta.variable_name
                ),
            ),
            Strategy::Serialize => {
                let wrote = scaffold.insert(Region::WriteBody, format!("    Write({member});"));
                let read = scaffold.insert(Region::ReadBody, format!("    Read({member});"));
                wrote && read
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
