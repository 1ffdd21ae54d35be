//! Path addresses such as `PID.3.4.1` or `PID-3-4-1`.
//!
//! The first component names a segment; the rest are positions. Field
//! positions index the segment directly (position 0 is the segment name), while
//! composite and subcomposite positions are 1-based. Repeats cannot be
//! addressed: deeper lookups always read the first repeat of the field.
//! Positions are plain ASCII digits; signs are rejected.

use std::fmt;

use log::debug;

use crate::error::{HL7Error, Result};
use crate::model::{Composite, Field, Message, Segment};

/// A parsed address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    address: String,
    segment: String,
    target: Target,
}

/// How deep an address reaches into its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Segment,
    Field {
        field: usize,
    },
    Composite {
        field: usize,
        composite: usize,
    },
    SubComposite {
        field: usize,
        composite: usize,
        sub_composite: usize,
    },
}

/// Why an address failed. Only surfaced through logging; callers get
/// [`HL7Error::InvalidLocation`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cause {
    Empty,
    NotANumber(String),
    ZeroPosition(String),
    UnknownSegment(String),
    OutOfRange(&'static str, usize),
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cause::Empty => write!(f, "empty address"),
            Cause::NotANumber(c) => write!(f, "component {c:?} is not a number"),
            Cause::ZeroPosition(c) => write!(f, "component {c:?} is 1-based"),
            Cause::UnknownSegment(name) => write!(f, "no segment named {name:?}"),
            Cause::OutOfRange(level, index) => write!(f, "{level} index {index} out of range"),
        }
    }
}

impl Location {
    /// Parse an address. Dashes and dots are interchangeable.
    pub fn parse(address: &str) -> Result<Self> {
        Self::parse_inner(address).map_err(|cause| invalid(address, cause))
    }

    /// The address exactly as it was given to [`Location::parse`].
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn target(&self) -> Target {
        self.target
    }

    fn parse_inner(address: &str) -> std::result::Result<Self, Cause> {
        let normalized = address.replace('-', ".");
        let ids: Vec<&str> = normalized.split('.').collect();

        let segment = match ids.first() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(Cause::Empty),
        };

        // Any arity other than 2..=4 reads the whole segment.
        let target = match ids.len() {
            2 => Target::Field {
                field: field_index(ids[1])?,
            },
            3 => Target::Composite {
                field: field_index(ids[1])?,
                composite: one_based(ids[2])?,
            },
            4 => Target::SubComposite {
                field: field_index(ids[1])?,
                composite: one_based(ids[2])?,
                sub_composite: one_based(ids[3])?,
            },
            _ => Target::Segment,
        };

        Ok(Self {
            address: address.to_string(),
            segment,
            target,
        })
    }

    /// Look this location up in `message`. Failures carry the original address.
    pub fn resolve(&self, message: &Message) -> Result<String> {
        self.resolve_inner(message)
            .map_err(|cause| invalid(&self.address, cause))
    }

    fn resolve_inner(&self, message: &Message) -> std::result::Result<String, Cause> {
        let segment = message
            .find_segment(&self.segment)
            .ok_or_else(|| Cause::UnknownSegment(self.segment.clone()))?;

        let value = match self.target {
            Target::Segment => segment.to_string(),
            Target::Field { field } => field_of(segment, field)?.to_string(),
            Target::Composite { field, composite } => {
                composite_of(segment, field, composite)?.to_string()
            }
            Target::SubComposite {
                field,
                composite,
                sub_composite,
            } => composite_of(segment, field, composite)?
                .sub_composite(sub_composite)
                .ok_or(Cause::OutOfRange("subcomposite", sub_composite + 1))?
                .to_string(),
        };
        Ok(value)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segment)?;
        match self.target {
            Target::Segment => Ok(()),
            Target::Field { field } => write!(f, ".{field}"),
            Target::Composite { field, composite } => {
                write!(f, ".{field}.{}", composite + 1)
            }
            Target::SubComposite {
                field,
                composite,
                sub_composite,
            } => write!(f, ".{field}.{}.{}", composite + 1, sub_composite + 1),
        }
    }
}

/// Resolve `address` against `message`.
///
/// Every failure, whatever its cause, is reported as
/// [`HL7Error::InvalidLocation`] carrying the address as given.
pub fn resolve(message: &Message, address: &str) -> Result<String> {
    Location::parse(address)?.resolve(message)
}

impl Message {
    /// Shorthand for [`resolve`].
    pub fn get_value(&self, address: &str) -> Result<String> {
        resolve(self, address)
    }
}

fn invalid(address: &str, cause: Cause) -> HL7Error {
    debug!("invalid location {address:?}: {cause}");
    HL7Error::invalid_location(address)
}

fn field_of(segment: &Segment, index: usize) -> std::result::Result<&Field, Cause> {
    segment
        .field(index)
        .ok_or(Cause::OutOfRange("field", index))
}

fn composite_of(
    segment: &Segment,
    field: usize,
    composite: usize,
) -> std::result::Result<&Composite, Cause> {
    field_of(segment, field)?
        .repeat(0)
        .ok_or(Cause::OutOfRange("repeat", 0))?
        .composite(composite)
        .ok_or(Cause::OutOfRange("composite", composite + 1))
}

fn field_index(component: &str) -> std::result::Result<usize, Cause> {
    let not_a_number = || Cause::NotANumber(component.to_string());
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_a_number());
    }
    component.parse::<usize>().map_err(|_| not_a_number())
}

fn one_based(component: &str) -> std::result::Result<usize, Cause> {
    field_index(component)?
        .checked_sub(1)
        .ok_or_else(|| Cause::ZeroPosition(component.to_string()))
}
