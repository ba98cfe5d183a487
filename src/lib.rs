pub mod cli;
pub mod config;
pub mod digest;
pub mod escape;
pub mod highlight;
pub mod pattern;
pub mod utils;

pub use cli::Args;
pub use config::Config;
pub use digest::{digest, Digester, Filters, ObjRefDict, DEFAULT_CONTEXT};
pub use escape::escape_html;
pub use pattern::{Span, TokenPattern};
