//! Visitor pattern implementation for walking a decoded message.
//!
//! Generic consumers (JSON converters, template engines, statistics) can
//! implement [`Visitor`] and override only the levels they care about. The
//! default methods walk every child in message order.

use crate::model::{Composite, Field, Message, Repeat, Segment, SubComposite};

/// The result type for visitor operations.
pub type VisitResult<T = ()> = Result<T, VisitError>;

/// An error raised by a visitor to stop the walk.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// An error with a custom message.
    #[error("{0}")]
    Custom(String),
}

impl VisitError {
    /// Creates a new custom error with the given message.
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        VisitError::Custom(msg.into())
    }
}

/// A node of the message tree that can be handed to a [`Visitor`].
pub trait Visitable {
    /// Accepts a visitor and calls the matching visit method.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult;

    /// Visits the children of this node in order.
    fn visit_children<V: Visitor + ?Sized>(&self, _visitor: &mut V) -> VisitResult {
        Ok(())
    }
}

/// A visitor over the message tree.
///
/// Each method receives the node and its 0-based position among its siblings.
pub trait Visitor {
    fn visit_message(&mut self, node: &Message) -> VisitResult {
        node.visit_children(self)
    }

    fn visit_segment(&mut self, _index: usize, node: &Segment) -> VisitResult {
        node.visit_children(self)
    }

    fn visit_field(&mut self, _index: usize, node: &Field) -> VisitResult {
        node.visit_children(self)
    }

    fn visit_repeat(&mut self, _index: usize, node: &Repeat) -> VisitResult {
        node.visit_children(self)
    }

    fn visit_composite(&mut self, _index: usize, node: &Composite) -> VisitResult {
        node.visit_children(self)
    }

    fn visit_sub_composite(&mut self, _index: usize, _node: &SubComposite) -> VisitResult {
        Ok(())
    }
}

impl Visitable for Message {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        visitor.visit_message(self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        for (i, segment) in self.segments().iter().enumerate() {
            visitor.visit_segment(i, segment)?;
        }
        Ok(())
    }
}

impl Visitable for Segment {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        visitor.visit_segment(0, self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        for (i, field) in self.fields().iter().enumerate() {
            visitor.visit_field(i, field)?;
        }
        Ok(())
    }
}

impl Visitable for Field {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        visitor.visit_field(0, self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        for (i, repeat) in self.repeats().iter().enumerate() {
            visitor.visit_repeat(i, repeat)?;
        }
        Ok(())
    }
}

impl Visitable for Repeat {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        visitor.visit_repeat(0, self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        for (i, composite) in self.composites().iter().enumerate() {
            visitor.visit_composite(i, composite)?;
        }
        Ok(())
    }
}

impl Visitable for Composite {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        visitor.visit_composite(0, self)
    }

    fn visit_children<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        for (i, sub) in self.sub_composites().iter().enumerate() {
            visitor.visit_sub_composite(i, sub)?;
        }
        Ok(())
    }
}

impl Visitable for SubComposite {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        visitor.visit_sub_composite(0, self)
    }
}
