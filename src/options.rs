//! Tokenizer configuration
//!
//! HTML passthrough, autolinking, and disabled hard line breaks are fixed
//! pipeline behavior; the host only toggles math notation and the file-size
//! guard.

use serde::{Deserialize, Serialize};

/// Default maximum document size accepted by `tokenize_file` (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// Disable `$...$` inline math.
    pub inline_formula_disabled: bool,
    /// Disable `$$...$$` display math.
    pub block_formula_disabled: bool,
    /// Upper bound for `tokenize_file`; `None` disables the check.
    pub max_file_size: Option<usize>,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            inline_formula_disabled: false,
            block_formula_disabled: false,
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
        }
    }
}

impl TokenizerOptions {
    /// The math extension is registered only when neither formula flag is
    /// set; disabling either half turns the whole extension off and leaves
    /// dollar signs as literal text.
    pub fn math_enabled(&self) -> bool {
        !(self.inline_formula_disabled || self.block_formula_disabled)
    }
}
