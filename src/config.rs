//! Configuration for the pagescout core
//!
//! The core holds no process-wide mutable state; callers build a
//! `Config` once and pass it to the entry points. It only requires the
//! configured directories to exist; it never creates them.

use std::env;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the PDF corpus (read-only at query time)
    pub corpus_dir: PathBuf,
    /// Staging directory for uploaded query images (written externally)
    pub upload_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            corpus_dir: PathBuf::from("Solutions"),
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            corpus_dir: env::var("PAGESCOUT_CORPUS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.corpus_dir),
            upload_dir: env::var("PAGESCOUT_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
        }
    }
}
