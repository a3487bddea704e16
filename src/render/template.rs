//! `{{.Field}}` placeholder templates.
//!
//! A template is parsed once into literal and placeholder segments, then
//! rendered against any `Serialize` record whose serialized form is a map of
//! field name to scalar. Values are inserted verbatim and never re-scanned.

use crate::error::RenderError;
use crate::render::RenderedDocument;

use serde::Serialize;
use serde_json::Value;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Field(&'a str),
}

/// A parsed template. Borrows the template text, which is normally `'static`.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    name: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Split `text` into literal runs and `{{.Field}}` placeholders.
    ///
    /// Fails with `RenderError::Syntax` on an unclosed `{{`, a stray `}}`, or a
    /// marker whose body is not `.Identifier`.
    pub fn parse(name: &'a str, text: &'a str) -> Result<Self, RenderError> {
        let syntax = |offset: usize, reason: &str| RenderError::Syntax {
            template: name.to_string(),
            offset,
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let rest = &text[pos..];
            let next_open = rest.find(OPEN);
            let next_close = rest.find(CLOSE);

            let open = match (next_open, next_close) {
                (None, None) => {
                    segments.push(Segment::Text(rest));
                    break;
                }
                (None, Some(close)) => return Err(syntax(pos + close, "'}}' without matching '{{'")),
                (Some(open), Some(close)) if close < open => {
                    return Err(syntax(pos + close, "'}}' without matching '{{'"));
                }
                (Some(open), _) => open,
            };

            if open > 0 {
                segments.push(Segment::Text(&rest[..open]));
            }

            let body_start = pos + open + OPEN.len();
            let body_len = text[body_start..]
                .find(CLOSE)
                .ok_or_else(|| syntax(pos + open, "'{{' is never closed"))?;
            let body = &text[body_start..body_start + body_len];
            if body.contains(OPEN) {
                return Err(syntax(pos + open, "nested '{{' inside placeholder"));
            }

            let field = parse_field(body).ok_or_else(|| {
                syntax(pos + open, "placeholder must have the form {{.FieldName}}")
            })?;
            segments.push(Segment::Field(field));

            pos = body_start + body_len + CLOSE.len();
        }

        Ok(Self { name, segments })
    }

    /// Field names referenced by this template, in order of appearance.
    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(f) => Some(*f),
            Segment::Text(_) => None,
        })
    }

    /// Render against `record`. Every placeholder must resolve to a scalar
    /// field of the record, otherwise `RenderError::Binding`.
    pub fn render<R: Serialize + ?Sized>(&self, record: &R) -> Result<RenderedDocument, RenderError> {
        // A record that does not serialize to a map exposes no fields; every
        // placeholder then reports as unbound.
        let fields = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(field) => {
                    let unbound = || RenderError::Binding {
                        template: self.name.to_string(),
                        field: field.to_string(),
                    };
                    match fields.get(*field).ok_or_else(unbound)? {
                        Value::String(s) => out.push_str(s),
                        Value::Number(n) => out.push_str(&n.to_string()),
                        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
                        Value::Null | Value::Array(_) | Value::Object(_) => return Err(unbound()),
                    }
                }
            }
        }

        Ok(RenderedDocument::new(out))
    }
}

/// Accepts `.Name` with optional surrounding whitespace.
fn parse_field(body: &str) -> Option<&str> {
    let ident = body.trim().strip_prefix('.')?;
    let mut chars = ident.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(ident)
    } else {
        None
    }
}

/// Parse and render in one call.
pub fn render<R: Serialize + ?Sized>(
    record: &R,
    name: &str,
    template: &str,
) -> Result<RenderedDocument, RenderError> {
    Template::parse(name, template)?.render(record)
}
