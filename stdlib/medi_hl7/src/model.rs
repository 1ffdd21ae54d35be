//! The decoded message tree.
//!
//! Message → Segment → Field → Repeat → Composite → SubComposite. Each level
//! keeps its children in input order together with the delimiter that joins
//! them, so rendering a node with `Display` reproduces its source text. Trees
//! are only built by the parser and are read-only afterwards.

use std::fmt;

use serde::Serialize;

use crate::delimiters::{Delimiters, SEGMENT_SEPARATOR};

/// One decoded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    #[serde(rename = "segmentSeparator")]
    segment_separator: char,
    #[serde(flatten)]
    delimiters: Delimiters,
    segments: Vec<Segment>,
}

/// One line of the message, e.g. `PID|1||123456^^^DH&MR`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    #[serde(skip)]
    separator: char,
    fields: Vec<Field>,
}

/// One attribute slot of a segment, holding one or more repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    #[serde(skip)]
    separator: char,
    repeats: Vec<Repeat>,
}

/// One occurrence of a possibly repeated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repeat {
    #[serde(skip)]
    separator: char,
    composites: Vec<Composite>,
}

/// A structured sub-value of a repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composite {
    #[serde(skip)]
    separator: char,
    #[serde(rename = "subComposites")]
    sub_composites: Vec<SubComposite>,
}

/// The atomic text token at the bottom of the tree.
///
/// The parser always stores exactly one raw token; escape sequences are kept
/// as they appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubComposite {
    values: Vec<String>,
}

impl Message {
    pub(crate) fn new(delimiters: Delimiters, segments: Vec<Segment>) -> Self {
        Self {
            segment_separator: SEGMENT_SEPARATOR,
            delimiters,
            segments,
        }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn segment_separator(&self) -> char {
        self.segment_separator
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// First segment carrying `name`, scanning from the top of the message.
    pub fn find_segment(&self, name: &str) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|segment| segment.name().as_deref() == Some(name))
    }

    /// All segments carrying `name`, in message order.
    pub fn segments_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Segment> + 'a {
        self.segments
            .iter()
            .filter(move |segment| segment.name().as_deref() == Some(name))
    }
}

impl Segment {
    pub(crate) fn new(separator: char, fields: Vec<Field>) -> Self {
        Self { separator, fields }
    }

    /// The segment name: the text of the first subcomposite of the first field.
    pub fn name(&self) -> Option<String> {
        self.field(0)
            .and_then(|field| field.repeat(0))
            .and_then(|repeat| repeat.composite(0))
            .and_then(|composite| composite.sub_composite(0))
            .map(SubComposite::to_string)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }
}

impl Field {
    pub(crate) fn new(separator: char, repeats: Vec<Repeat>) -> Self {
        Self { separator, repeats }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn repeats(&self) -> &[Repeat] {
        &self.repeats
    }

    pub fn repeat(&self, index: usize) -> Option<&Repeat> {
        self.repeats.get(index)
    }
}

impl Repeat {
    pub(crate) fn new(separator: char, composites: Vec<Composite>) -> Self {
        Self {
            separator,
            composites,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn composites(&self) -> &[Composite] {
        &self.composites
    }

    pub fn composite(&self, index: usize) -> Option<&Composite> {
        self.composites.get(index)
    }
}

impl Composite {
    pub(crate) fn new(separator: char, sub_composites: Vec<SubComposite>) -> Self {
        Self {
            separator,
            sub_composites,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn sub_composites(&self) -> &[SubComposite] {
        &self.sub_composites
    }

    pub fn sub_composite(&self, index: usize) -> Option<&SubComposite> {
        self.sub_composites.get(index)
    }
}

impl SubComposite {
    pub(crate) fn new(value: String) -> Self {
        Self {
            values: vec![value],
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: char,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{separator}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Every segment is written followed by the segment separator, which matches
/// the normalized form the parser works from.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}{}", self.segment_separator)?;
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.fields, self.separator)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.repeats, self.separator)
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.composites, self.separator)
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.sub_composites, self.separator)
    }
}

impl fmt::Display for SubComposite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.values {
            f.write_str(value)?;
        }
        Ok(())
    }
}
