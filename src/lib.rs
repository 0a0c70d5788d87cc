//! # rgstats
//!
//! Frequency statistics for reference genome annotation files: LCA label
//! frequencies from a k-mer minimizer file, and a match-size histogram from
//! a RepeatMasker match library.
//!
//! This crate provides both a library and a binary.
//!
#![doc = include_str!("../README.md")]

// Re-export public functionality
pub mod lca_freq;
pub mod match_sizes;

// Re-export the important functions for library users
pub use lca_freq::{run as run_lca_freq, tally as tally_lca_freqs};
pub use match_sizes::{run as run_match_sizes, tally as tally_match_sizes};

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Configuration for a statistics run over one genome's annotation files
pub struct StatsConfig {
    /// Reference genome name (e.g. "dm3")
    pub genome: String,

    /// Directory containing the input files and receiving the outputs
    pub base_dir: PathBuf,
}

impl StatsConfig {
    /// Create a new configuration for the named genome, rooted at the
    /// current directory
    pub fn new<S: Into<String>>(genome: S) -> Self {
        Self {
            genome: genome.into(),
            base_dir: PathBuf::from("."),
        }
    }

    /// Set the base directory
    pub fn with_base_dir<P: AsRef<Path>>(mut self, base_dir: P) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }

    /// Path to the `<genome>.mins` minimizer file
    pub fn mins_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.mins", self.genome))
    }

    /// Path to the `<genome>/<genome>.fa.out` RepeatMasker match library
    pub fn fa_out_path(&self) -> PathBuf {
        self.base_dir
            .join(&self.genome)
            .join(format!("{}.fa.out", self.genome))
    }

    /// Path to the `<genome>.lcafreq` output
    pub fn lca_freq_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.lcafreq", self.genome))
    }

    /// Path to the `<genome>.matchSizes` output
    pub fn match_sizes_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.matchSizes", self.genome))
    }

    /// Execute both passes in order, stopping at the first failure
    ///
    /// A failure in the match-size pass leaves the already-written
    /// `.lcafreq` file intact.
    pub fn execute(&self) -> Result<()> {
        lca_freq::run(&self.mins_path(), &self.lca_freq_path())?;
        match_sizes::run(&self.fa_out_path(), &self.match_sizes_path())?;
        Ok(())
    }
}
