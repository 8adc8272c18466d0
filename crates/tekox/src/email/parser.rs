//! Walking a raw message's MIME tree for decoded HTML bodies.

use log::debug;
use mail_parser::{Message, MessageParser, MessagePart, MimeHeaders, PartType};

use super::error::{EmailError, Result};

/// Decoded text of one `text/html` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlPart(String);

impl HtmlPart {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// One-pass iterator over the HTML parts of a message, in MIME tree order.
///
/// Nested multiparts are covered, as are `message/rfc822` attachments.
/// A part whose payload could not be decoded is skipped.
pub struct HtmlParts<'a> {
    stack: Vec<(Message<'a>, usize)>,
}

enum PartKind<'a> {
    Html(String),
    Nested(Message<'a>),
    Skip,
}

impl<'a> HtmlParts<'a> {
    /// Parses `raw` and prepares the walk. Nothing is decoded until the
    /// iterator is advanced.
    pub fn parse(raw: &'a [u8]) -> Result<Self> {
        let message = MessageParser::default()
            .parse(raw)
            .ok_or_else(|| EmailError::ParseError("Failed to parse email message".to_string()))?;

        Ok(Self {
            stack: vec![(message, 0)],
        })
    }
}

impl Iterator for HtmlParts<'_> {
    type Item = HtmlPart;

    fn next(&mut self) -> Option<HtmlPart> {
        loop {
            let (message, cursor) = self.stack.last_mut()?;
            let Some(part) = message.parts.get(*cursor) else {
                self.stack.pop();
                continue;
            };
            let index = *cursor;
            *cursor += 1;

            match classify(part) {
                PartKind::Html(text) => return Some(HtmlPart(text)),
                PartKind::Nested(nested) => {
                    debug!("Descending into attached message at part {}", index);
                    self.stack.push((nested, 0));
                }
                PartKind::Skip => {}
            }
        }
    }
}

fn classify<'a>(part: &MessagePart<'a>) -> PartKind<'a> {
    if let PartType::Message(nested) = &part.body {
        return PartKind::Nested(nested.clone());
    }

    if !is_html(part) {
        return PartKind::Skip;
    }

    if part.is_encoding_problem {
        debug!("Skipping HTML part with undecodable payload");
        return PartKind::Skip;
    }

    match &part.body {
        PartType::Html(html) => PartKind::Html(html.to_string()),
        PartType::Text(text) => PartKind::Html(text.to_string()),
        PartType::Binary(data) | PartType::InlineBinary(data) => match std::str::from_utf8(data) {
            Ok(text) => PartKind::Html(text.to_string()),
            Err(e) => {
                debug!("Skipping HTML part that is not valid UTF-8: {}", e);
                PartKind::Skip
            }
        },
        _ => PartKind::Skip,
    }
}

/// Declared content type is exactly `text/html`.
fn is_html(part: &MessagePart<'_>) -> bool {
    part.content_type().is_some_and(|ct| {
        ct.ctype().eq_ignore_ascii_case("text")
            && ct
                .subtype()
                .is_some_and(|subtype| subtype.eq_ignore_ascii_case("html"))
    })
}
