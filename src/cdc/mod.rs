//! Content-Defined Chunking (CDC) implementations.
//!
//! This module contains the core algorithms for identifying chunk boundaries
//! based on content patterns rather than fixed sizes.
//!
//! - [`GearHash`] - Gear rolling hash over a process-wide constant table
//! - [`BoundaryDetector`] - Normalized two-mask cut decision
//! - [`FastCdc`] - Rolling hash and detector driven together, byte by byte

mod fastcdc;
mod gear;

pub use fastcdc::{BoundaryDetector, FastCdc};
pub use gear::GearHash;
