use std::fmt;

use crate::segment::{Directive, ScanWarning, Segment, Span, Template};
use crate::trigger::{TriggerAction, TriggerSet, TriggerSpec};

/// Longest distance the scanner looks for the `:` that ends a `{{marker`
/// name before giving up. Bounds the scan across unrelated `{{` pairs.
const MARKER_LOOKAHEAD: usize = 20;

/// Classifies a scan error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// `{{marker` never closed with `:` within the lookahead window.
    NoMarkerDelimiter,
    /// An opened directive never returned to brace depth zero.
    UnterminatedDirective,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMarkerDelimiter => {
                write!(f, "marker name never closed with ':'")
            }
            Self::UnterminatedDirective => {
                write!(f, "unclosed directive")
            }
        }
    }
}

/// Error produced while scanning a template.
///
/// `at` is a character offset, not a byte offset. For
/// [`ScanErrorKind::UnterminatedDirective`] it points at the first
/// content character of the unclosed directive; for
/// [`ScanErrorKind::NoMarkerDelimiter`] at the `{{` opener.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at character {at}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub at: usize,
}

/// Scan a template with the default trigger table: `@{path}`,
/// `!{command}`, `{{args}}`, and `{{marker:content}}`.
///
/// # Errors
///
/// Returns `ScanError` on an unclosed directive or a `{{marker` name
/// never terminated with `:`.
pub fn scan(input: &str) -> Result<Template, ScanError> {
    scan_with(input, &TriggerSet::default())
}

/// Scan a template with a caller-supplied trigger table.
///
/// Failure is atomic: on error no partial output is returned, so callers
/// never act on a half-scanned template.
///
/// # Errors
///
/// Returns `ScanError` on an unclosed directive or a `{{marker` name
/// never terminated with `:`.
pub fn scan_with(input: &str, triggers: &TriggerSet) -> Result<Template, ScanError> {
    Scanner::new(input, triggers).scan()
}

struct Scanner<'a> {
    chars: Vec<char>,
    pos: usize,
    literal_start: usize,
    triggers: &'a TriggerSet,
    segments: Vec<Segment>,
    warnings: Vec<ScanWarning>,
}

impl<'a> Scanner<'a> {
    fn new(input: &str, triggers: &'a TriggerSet) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            literal_start: 0,
            triggers,
            segments: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn scan(mut self) -> Result<Template, ScanError> {
        let triggers = self.triggers;
        while let Some((at, spec)) = triggers.find_next(&self.chars, self.pos) {
            match self.read_directive(at, spec)? {
                Some(directive) => {
                    self.flush_literal_to(at);
                    self.pos = directive.span.end;
                    self.literal_start = self.pos;
                    self.segments.push(Segment::Directive(directive));
                }
                None => {
                    // unknown marker: the opener stays literal text
                    self.pos = at + spec.prefix_len();
                }
            }
        }
        self.flush_literal_to(self.chars.len());

        Ok(Template {
            segments: self.segments,
            warnings: self.warnings,
        })
    }

    /// Resolve the marker for a matched trigger and extract its content.
    ///
    /// Returns `Ok(None)` when the trigger degrades to literal text
    /// (unknown marker name).
    fn read_directive(
        &mut self,
        at: usize,
        spec: &TriggerSpec,
    ) -> Result<Option<Directive>, ScanError> {
        match &spec.action {
            TriggerAction::Literal(kind) => {
                let end = at + spec.prefix_len();
                Ok(Some(Directive {
                    kind: kind.clone(),
                    raw_content: String::new(),
                    span: Span { start: at, end },
                }))
            }
            TriggerAction::Fixed(kind) => {
                let content_start = at + spec.prefix_len();
                let (raw_content, end) = self.extract_balanced(content_start, 1)?;
                Ok(Some(Directive {
                    kind: kind.clone(),
                    raw_content,
                    span: Span { start: at, end },
                }))
            }
            TriggerAction::NamedMarker => {
                let name_start = at + spec.prefix_len();
                let Some((name, content_start)) = self.read_marker_name(name_start) else {
                    return Err(ScanError {
                        kind: ScanErrorKind::NoMarkerDelimiter,
                        at,
                    });
                };
                let Some(kind) = self.triggers.marker(&name).cloned() else {
                    self.warnings.push(ScanWarning::UnknownMarker { name, at });
                    return Ok(None);
                };
                let (raw_content, end) = self.extract_balanced(content_start, 2)?;
                Ok(Some(Directive {
                    kind,
                    raw_content,
                    span: Span { start: at, end },
                }))
            }
        }
    }

    /// Scan up to [`MARKER_LOOKAHEAD`] characters for the `:` ending a
    /// marker name. Returns the name and the content start position.
    fn read_marker_name(&self, from: usize) -> Option<(String, usize)> {
        let window_end = (from + MARKER_LOOKAHEAD).min(self.chars.len());
        let offset = self.chars[from..window_end].iter().position(|&c| c == ':')?;
        let name = self.chars[from..from + offset].iter().collect();
        Some((name, from + offset + 1))
    }

    /// Walk forward from `content_start` counting brace depth to find the
    /// directive's true terminator.
    ///
    /// Depth starts at 1 for the already-consumed opening delimiter.
    /// Balanced `{`/`}` pairs inside the content are not mistaken for the
    /// terminator. With `closer_len == 2` a lone `}` at depth zero does
    /// not close the directive; the decrement is rolled back and the walk
    /// continues until a full `}}` is seen.
    fn extract_balanced(
        &self,
        content_start: usize,
        closer_len: usize,
    ) -> Result<(String, usize), ScanError> {
        let mut depth: usize = 1;
        let mut i = content_start;

        while i < self.chars.len() {
            match self.chars[i] {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        if closer_len == 2 && self.chars.get(i + 1) != Some(&'}') {
                            depth = 1;
                        } else {
                            let raw_content = self.chars[content_start..i].iter().collect();
                            return Ok((raw_content, i + closer_len));
                        }
                    }
                }
                _ => {}
            }
            i += 1;
        }

        Err(ScanError {
            kind: ScanErrorKind::UnterminatedDirective,
            at: content_start,
        })
    }

    /// Emit the pending literal run ending at `end`, if non-empty.
    fn flush_literal_to(&mut self, end: usize) {
        if end > self.literal_start {
            let text = self.chars[self.literal_start..end].iter().collect();
            self.segments.push(Segment::Literal(text));
            self.literal_start = end;
        }
    }
}
