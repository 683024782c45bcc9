//! Generator process management
//!
//! This module provides:
//! - The `Scaffolder` interface and its child-process implementation
//! - Generator availability checks

pub mod check;
pub mod generator;

pub use check::{check_generator, GeneratorInfo};
pub use generator::{LeafRequest, ProcessScaffolder, Scaffolder};
