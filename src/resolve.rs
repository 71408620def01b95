//! Directive resolution: splice resolved content over directive spans.
//!
//! The scanner never touches the filesystem or spawns processes. Callers
//! supply a [`Resolver`] that decides policy (which paths are readable,
//! which commands may run, where arguments come from) and this module
//! stitches the resolved text back into the template.

use std::collections::HashMap;

use crate::segment::{Directive, MarkerKind, Segment, Span, Template};

/// The argument placeholder looked for inside `Shell` content.
const ARGS_TOKEN: &str = "{{args}}";

/// Error returned by a [`Resolver`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ResolveError {
    pub message: String,
}

impl ResolveError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error produced while expanding a scanned template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot resolve {kind} directive at character {}: {source}", span.start)]
pub struct ExpandError {
    pub kind: MarkerKind,
    pub span: Span,
    pub source: ResolveError,
}

/// Supplies replacement text for scanned directives.
pub trait Resolver {
    /// Resolve a `File` directive's path to file contents.
    fn file(&self, path: &str) -> Result<String, ResolveError>;

    /// Resolve a `Shell` directive's command to captured output.
    fn shell(&self, command: &str) -> Result<String, ResolveError>;

    /// The argument string substituted for `{{args}}`.
    fn args(&self) -> Result<String, ResolveError>;

    /// Resolve a caller-registered named marker.
    fn named(&self, name: &str, content: &str) -> Result<String, ResolveError>;
}

/// Replace every directive in `template` with resolver output.
///
/// Literal segments are copied verbatim. An `{{args}}` token inside a
/// `Shell` directive's command is substituted shell-escaped before the
/// command reaches the resolver; `{{args}}` in plain template text is
/// substituted verbatim.
///
/// # Errors
///
/// Returns `ExpandError` when the resolver fails, carrying the
/// directive's kind and span.
pub fn expand<R: Resolver>(template: &Template, resolver: &R) -> Result<String, ExpandError> {
    let mut out = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Directive(directive) => {
                out.push_str(&resolve_directive(directive, resolver)?);
            }
        }
    }
    Ok(out)
}

fn resolve_directive<R: Resolver>(
    directive: &Directive,
    resolver: &R,
) -> Result<String, ExpandError> {
    let resolved = match &directive.kind {
        MarkerKind::File => resolver.file(&directive.raw_content),
        MarkerKind::Shell => substitute_args_quoted(&directive.raw_content, resolver)
            .and_then(|command| resolver.shell(&command)),
        MarkerKind::Args => resolver.args(),
        MarkerKind::Named(name) => resolver.named(name, &directive.raw_content),
    };

    resolved.map_err(|source| ExpandError {
        kind: directive.kind.clone(),
        span: directive.span,
        source,
    })
}

/// Substitute `{{args}}` inside a shell command, shell-escaped.
fn substitute_args_quoted<R: Resolver>(
    command: &str,
    resolver: &R,
) -> Result<String, ResolveError> {
    if !command.contains(ARGS_TOKEN) {
        return Ok(command.to_string());
    }
    let quoted = shell_quote(&resolver.args()?);
    Ok(command.replace(ARGS_TOKEN, &quoted))
}

/// Single-quote `value` for POSIX shells; embedded quotes become `'\''`.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// In-memory [`Resolver`] backed by lookup maps, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    files: HashMap<String, String>,
    commands: HashMap<String, String>,
    args: Option<String>,
}

impl MapResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register file contents for a path.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Register captured output for a command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.commands.insert(command.into(), output.into());
        self
    }

    /// Set the argument string.
    #[must_use]
    pub fn with_args(mut self, args: impl Into<String>) -> Self {
        self.args = Some(args.into());
        self
    }
}

impl Resolver for MapResolver {
    fn file(&self, path: &str) -> Result<String, ResolveError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ResolveError::new(format!("no such file: {path}")))
    }

    fn shell(&self, command: &str) -> Result<String, ResolveError> {
        self.commands
            .get(command)
            .cloned()
            .ok_or_else(|| ResolveError::new(format!("command not allowed: {command}")))
    }

    fn args(&self) -> Result<String, ResolveError> {
        self.args
            .clone()
            .ok_or_else(|| ResolveError::new("no arguments provided"))
    }

    fn named(&self, name: &str, _content: &str) -> Result<String, ResolveError> {
        Err(ResolveError::new(format!("no resolver for marker: {name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plain_value() {
        assert_eq!(shell_quote("abc"), "'abc'");
    }

    #[test]
    fn quote_embedded_single_quote() {
        assert_eq!(shell_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn quote_empty_value() {
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn args_untouched_without_token() {
        let resolver = MapResolver::new();
        let command = substitute_args_quoted("git status", &resolver).expect("no args needed");
        assert_eq!(command, "git status");
    }

    #[test]
    fn args_substituted_quoted() {
        let resolver = MapResolver::new().with_args("a b");
        let command = substitute_args_quoted("grep {{args}} src", &resolver).expect("should work");
        assert_eq!(command, "grep 'a b' src");
    }
}
