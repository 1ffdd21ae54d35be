use log::{debug, trace};

use crate::delimiters::{Delimiters, HEADER_MARKER, SEGMENT_SEPARATOR};
use crate::error::{HL7Error, Result};
use crate::model::{Composite, Field, Message, Repeat, Segment, SubComposite};
use crate::split::split_escaped;

/// Bring raw text into the form the parser works on.
///
/// Surrounding whitespace is trimmed, CRLF and bare LF become CR, and a final
/// CR is appended when missing so every segment line is terminated.
pub fn normalize(input: &str) -> String {
    let mut text = input
        .trim()
        .replace("\r\n", "\r")
        .replace('\n', "\r");
    if !text.ends_with(SEGMENT_SEPARATOR) {
        text.push(SEGMENT_SEPARATOR);
    }
    text
}

/// Decode one HL7v2 message into a [`Message`] tree.
///
/// The delimiters are taken from the header itself, so messages using
/// non-standard separators parse the same way as `MSH|^~\&` ones.
pub fn parse_hl7(input: &str) -> Result<Message> {
    if input.is_empty() {
        return Err(HL7Error::EmptyInput);
    }

    let text = normalize(input);
    if !text.starts_with(HEADER_MARKER) {
        return Err(HL7Error::NotAMessage);
    }

    let header = text.split(SEGMENT_SEPARATOR).next().unwrap_or_default();
    let delimiters = Delimiters::from_header(header)?;
    debug!("parsing HL7 message with delimiters {delimiters}");

    // The guaranteed trailing separator leaves one empty piece at the end.
    let mut lines: Vec<&str> = text.split(SEGMENT_SEPARATOR).collect();
    lines.pop();

    let segments: Vec<Segment> = lines
        .into_iter()
        .map(|line| parse_segment(line, &delimiters))
        .collect();

    debug!("parsed {} segment(s)", segments.len());
    Ok(Message::new(delimiters, segments))
}

impl Message {
    /// Decode a message from raw bytes, which must already be UTF-8.
    pub fn from_bytes(input: &[u8]) -> Result<Message> {
        if input.is_empty() {
            return Err(HL7Error::EmptyInput);
        }
        parse_hl7(std::str::from_utf8(input)?)
    }
}

impl std::str::FromStr for Message {
    type Err = HL7Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_hl7(s)
    }
}

fn parse_segment(line: &str, delimiters: &Delimiters) -> Segment {
    trace!("segment: {line:?}");
    let items = split_escaped(line, delimiters.field, delimiters.escape);
    let is_header = items.first().map(String::as_str) == Some(HEADER_MARKER);

    let fields = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            // MSH-2 holds the encoding characters themselves and must not be split by them.
            if is_header && i == 1 {
                atomic_field(item, delimiters)
            } else {
                parse_field(&item, delimiters)
            }
        })
        .collect();

    Segment::new(delimiters.field, fields)
}

fn parse_field(text: &str, delimiters: &Delimiters) -> Field {
    let repeats = split_escaped(text, delimiters.repeat, delimiters.escape)
        .iter()
        .map(|item| parse_repeat(item, delimiters))
        .collect();
    Field::new(delimiters.repeat, repeats)
}

fn parse_repeat(text: &str, delimiters: &Delimiters) -> Repeat {
    let composites = split_escaped(text, delimiters.composite, delimiters.escape)
        .iter()
        .map(|item| parse_composite(item, delimiters))
        .collect();
    Repeat::new(delimiters.composite, composites)
}

fn parse_composite(text: &str, delimiters: &Delimiters) -> Composite {
    let sub_composites = split_escaped(text, delimiters.sub_composite, delimiters.escape)
        .into_iter()
        .map(SubComposite::new)
        .collect();
    Composite::new(delimiters.sub_composite, sub_composites)
}

fn atomic_field(text: String, delimiters: &Delimiters) -> Field {
    let composite = Composite::new(delimiters.sub_composite, vec![SubComposite::new(text)]);
    let repeat = Repeat::new(delimiters.composite, vec![composite]);
    Field::new(delimiters.repeat, vec![repeat])
}
