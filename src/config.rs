use crate::cli::Args;
use crate::digest::{Filters, ObjRefDict};
use crate::pattern::TokenPattern;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub file: PathBuf,
    pub error_pattern: TokenPattern,
    pub filters: Filters,
    pub objref_dict: Option<ObjRefDict>,
    pub context: usize,
    pub skip_format: String,
    pub json: bool,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        let error_pattern = if let Some(ref pattern) = args.pattern {
            TokenPattern::from_regex(pattern, args.case_insensitive)?
        } else {
            TokenPattern::words(&args.error_words(), args.case_insensitive)
                .context("--error-words needs at least one word")?
        };

        let filters: Filters = args.filters().into_iter().collect();

        let objref_dict = match args.objref_file {
            Some(ref path) => Some(Self::load_objref_dict(path)?),
            None => None,
        };

        if !args.skip_format.contains("{}") {
            bail!("--skip-format must contain a {{}} placeholder for the run length");
        }

        Ok(Config {
            file: args.file.clone(),
            error_pattern,
            filters,
            objref_dict,
            context: args.context,
            skip_format: args.skip_format.clone(),
            json: args.json,
        })
    }

    fn load_objref_dict(path: &Path) -> Result<ObjRefDict> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read objref file: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid objref JSON in {}", path.display()))
    }

    /// Render the skip marker for a run of the given length.
    pub fn format_skip(&self, len: usize) -> String {
        self.skip_format.replacen("{}", &len.to_string(), 1)
    }
}
