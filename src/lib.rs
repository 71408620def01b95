//! Injection directive scanner for command prompt templates.
//!
//! Splits a user-authored command template into literal text and embedded
//! *injection directives*: `@{path}` file inclusions, `!{command}` shell
//! inclusions, the `{{args}}` argument placeholder, and the generic
//! `{{marker:content}}` form. Directive content may itself contain
//! balanced `{`/`}` pairs; brace-depth counting finds the true
//! terminator, so `@{ {a:{b:1}} }` is a single directive.
//!
//! # Quick start
//!
//! ## Scan a template
//!
//! ```
//! use cmdtpl_rs::{MarkerKind, scan};
//!
//! let template = scan("summarize @{notes/today.md} briefly").unwrap();
//! let directive = template.directives().next().unwrap();
//! assert_eq!(directive.kind, MarkerKind::File);
//! assert_eq!(directive.raw_content, "notes/today.md");
//! ```
//!
//! ## Expand directives through a resolver
//!
//! ```
//! use cmdtpl_rs::{MapResolver, expand, scan};
//!
//! let template = scan("context: {{file:a.txt}}").unwrap();
//! let resolver = MapResolver::new().with_file("a.txt", "hello");
//! assert_eq!(expand(&template, &resolver).unwrap(), "context: hello");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod resolve;
pub mod scanner;
pub mod segment;
pub mod trigger;

pub use resolve::{ExpandError, MapResolver, ResolveError, Resolver, expand, shell_quote};
pub use scanner::{ScanError, ScanErrorKind, scan, scan_with};
pub use segment::{Directive, MarkerKind, ScanWarning, Segment, Span, Template};
pub use trigger::{TriggerAction, TriggerSet, TriggerSpec};

/// Unified error type covering both scanning and expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A scan error.
    #[error("{0}")]
    Scan(#[from] ScanError),
    /// An expansion error.
    #[error("{0}")]
    Expand(#[from] ExpandError),
}

/// Scan a template and expand every directive in one step.
pub fn expand_str<R: Resolver>(input: &str, resolver: &R) -> Result<String, Error> {
    let template = scan(input)?;
    Ok(expand(&template, resolver)?)
}
