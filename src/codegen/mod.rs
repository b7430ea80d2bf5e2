//! Code generation
//!
//! Turns extracted [`MetaInfo`](crate::scanner::MetaInfo) records into C++
//! scaffolding and writes it out.
//!
//! - [`strategy`]: the print and serialize templates
//! - [`scaffold`]: generated blocks with named body regions
//! - [`emitter`]: per-type accumulation in discovery order
//! - [`writer`]: per-file artifacts and the run's master header

pub mod emitter;
pub mod scaffold;
pub mod strategy;
pub mod writer;

pub use emitter::{ClassEntry, ClassMap};
pub use scaffold::{Region, Scaffold};
pub use strategy::Strategy;
