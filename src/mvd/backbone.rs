//! Read-only access to an ordered segment sequence.

use crate::error::Result;
use crate::mvd::pair::Pair;

/// Trait for the ordered segment sequence the match engine reads.
///
/// Implementors guarantee that, for every version id, concatenating the
/// segments containing that id in index order reproduces that version.
pub trait Backbone: Send + Sync {
    /// Number of segments.
    fn segment_count(&self) -> usize;

    /// Segment at `index`. Out-of-range indices yield a range error.
    fn segment_at(&self, index: usize) -> Result<&Pair>;

    /// Short name (siglum) of a version. Unknown ids yield a range error.
    fn version_short_name(&self, version: u16) -> Result<&str>;

    /// Iterate over segments in backbone order.
    fn segments(&self) -> Segments<'_>
    where
        Self: Sized,
    {
        Segments {
            backbone: self,
            next: 0,
        }
    }
}

/// Iterator over the segments of a [`Backbone`].
pub struct Segments<'a> {
    backbone: &'a dyn Backbone,
    next: usize,
}

impl<'a> Segments<'a> {
    /// Create an iterator over a trait object.
    pub fn new(backbone: &'a dyn Backbone) -> Self {
        Segments { backbone, next: 0 }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a Pair;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.backbone.segment_count() {
            return None;
        }
        let pair = self.backbone.segment_at(self.next).ok()?;
        self.next += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.backbone.segment_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}
