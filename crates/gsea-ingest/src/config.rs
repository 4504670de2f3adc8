//! Parser options
//!
//! Options are copied into each parser; a parser keeps no per-parse state,
//! so one instance can serve any number of parses.

use gsea_common::{GseaError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Environment Variables
// ============================================================================

/// Demote import logging from `info` to `debug`
pub const SILENT_ENV: &str = "GSEA_PARSER_SILENT";

/// Toggle duplicate-member checking for column-oriented gene-set files
pub const GMX_CHECK_DUPLICATES_ENV: &str = "GSEA_GMX_CHECK_DUPLICATES";

/// Options shared by every format parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Log import start at `debug` instead of `info`
    #[serde(default)]
    pub silent: bool,

    /// Remove repeated members from GMX gene sets (with a warning)
    #[serde(default = "default_check_duplicates")]
    pub check_gene_set_duplicates: bool,
}

fn default_check_duplicates() -> bool {
    true
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            silent: false,
            check_gene_set_duplicates: default_check_duplicates(),
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `GSEA_PARSER_SILENT` and `GSEA_GMX_CHECK_DUPLICATES`
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();

        if let Ok(value) = std::env::var(SILENT_ENV) {
            options.silent = parse_flag(SILENT_ENV, &value)?;
        }

        if let Ok(value) = std::env::var(GMX_CHECK_DUPLICATES_ENV) {
            options.check_gene_set_duplicates = parse_flag(GMX_CHECK_DUPLICATES_ENV, &value)?;
        }

        Ok(options)
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn check_gene_set_duplicates(mut self, check: bool) -> Self {
        self.check_gene_set_duplicates = check;
        self
    }
}

fn parse_flag(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(GseaError::config(format!(
            "{} must be a boolean, got '{}'",
            var, other
        ))),
    }
}
