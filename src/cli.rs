use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "logdigest",
    about = "Condense long CI build logs into short HTML excerpts with failure lines highlighted",
    version,
    long_about = "logdigest reads a build log and prints an HTML-safe excerpt: lines matching the \
failure vocabulary (or a filter token) are kept with surrounding context and highlighted, and \
long uninteresting stretches collapse into a single skip marker."
)]
pub struct Args {
    /// Path to the log file to digest
    pub file: PathBuf,

    /// Comma-separated failure words for the default error pattern
    #[arg(short = 'w', long = "error-words", default_value = "error,fail,fatal")]
    pub error_words: String,

    /// Raw regex to use as the error pattern instead of --error-words
    #[arg(short = 'p', long = "pattern")]
    pub pattern: Option<String>,

    /// Case-insensitive pattern matching
    #[arg(short = 'i', long = "case-insensitive")]
    pub case_insensitive: bool,

    /// Filter tokens as name=value pairs (e.g. "pod=my-pod-5x2vq"); repeatable
    #[arg(short = 'F', long = "filter")]
    pub filter: Vec<String>,

    /// JSON file mapping reference ids to descriptors, for indirect correlation
    #[arg(long = "objref-file")]
    pub objref_file: Option<PathBuf>,

    /// Lines of context to keep around each interesting line
    #[arg(short = 'c', long = "context", default_value = "4")]
    pub context: usize,

    /// Skip marker template; "{}" is replaced with the run length
    #[arg(long = "skip-format", default_value = "... skipping {} lines ...")]
    pub skip_format: String,

    /// Emit a JSON summary instead of the raw excerpt
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Get the failure words as a vector of strings
    pub fn error_words(&self) -> Vec<String> {
        self.error_words
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Get the filters as a vector of (name, value) tuples
    pub fn filters(&self) -> Vec<(String, String)> {
        self.filter
            .iter()
            .filter_map(|pair| {
                let parts: Vec<&str> = pair.splitn(2, '=').collect();
                if parts.len() == 2 {
                    Some((parts[0].trim().to_string(), parts[1].trim().to_string()))
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args() -> Args {
        Args {
            file: PathBuf::from("build-log.txt"),
            error_words: "error, fail ,fatal,".to_string(),
            pattern: None,
            case_insensitive: false,
            filter: vec![],
            objref_file: None,
            context: 4,
            skip_format: "... skipping {} lines ...".to_string(),
            json: false,
        }
    }

    #[test]
    fn test_error_words_trimmed_and_filtered() {
        let args = test_args();
        assert_eq!(args.error_words(), vec!["error", "fail", "fatal"]);
    }

    #[test]
    fn test_filters_parsing() {
        let mut args = test_args();
        args.filter = vec![
            "pod=my-pod-5x2vq".to_string(),
            "uid=".to_string(),
            "invalid_format".to_string(),
        ];

        let filters = args.filters();
        assert_eq!(
            filters,
            vec![
                ("pod".to_string(), "my-pod-5x2vq".to_string()),
                ("uid".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_filter_value_may_contain_equals() {
        let mut args = test_args();
        args.filter = vec!["pod=name=odd".to_string()];
        assert_eq!(
            args.filters(),
            vec![("pod".to_string(), "name=odd".to_string())]
        );
    }
}
