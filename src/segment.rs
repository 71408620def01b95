use std::fmt;

/// Half-open character range in the source template.
///
/// Offsets count Unicode scalar values, not bytes, so positions stay
/// stable regardless of how the template is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Length of the span in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Semantic type of a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    /// File inclusion (`@{path}` or `{{file:path}}`).
    File,
    /// Shell output inclusion (`!{command}` or `{{shell:command}}`).
    Shell,
    /// Argument placeholder (`{{args}}`).
    Args,
    /// Caller-registered marker (`{{name:content}}`).
    Named(String),
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Shell => write!(f, "shell"),
            Self::Args => write!(f, "args"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A parsed injection directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: MarkerKind,
    /// Content strictly between the delimiters, marker prefix excluded.
    pub raw_content: String,
    /// Range covering the whole directive, delimiters included, so callers
    /// can splice replacement text back into the template.
    pub span: Span,
}

/// One piece of a scanned template: literal text or a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Directive(Directive),
}

/// Diagnostic recorded while scanning. Warnings never abort a scan; the
/// offending span is kept as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// `{{name:...}}` whose name is not in the known-marker table.
    UnknownMarker { name: String, at: usize },
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMarker { name, at } => {
                write!(f, "unknown marker '{name}' at character {at}")
            }
        }
    }
}

/// Scan output: ordered segments covering the source exactly once,
/// with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
    pub warnings: Vec<ScanWarning>,
}

impl Template {
    /// Iterate over the parsed directives in source order.
    #[must_use]
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Directive(directive) => Some(directive),
            Segment::Literal(_) => None,
        })
    }

    /// True when at least one directive was found.
    #[must_use]
    pub fn has_directives(&self) -> bool {
        self.directives().next().is_some()
    }

    /// Reassemble the text this template was scanned from.
    ///
    /// Literal segments carry their own text; directive segments are
    /// restored from their spans, so the result is the original input
    /// verbatim, delimiters included.
    #[must_use]
    pub fn reconstruct(&self, source: &str) -> String {
        let chars: Vec<char> = source.chars().collect();
        let mut out = String::with_capacity(source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Directive(directive) => {
                    out.extend(&chars[directive.span.start..directive.span.end]);
                }
            }
        }
        out
    }
}
