use serde::Serialize;

/// A half-open byte range into the source buffer.
///
/// `Span::DUMMY` stands for "no location": statements synthesized by the
/// compiler carry it for keywords that never appeared in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span end precedes start");
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Span covering `self` through `other`, where either may be missing.
    pub fn to(self, other: Span) -> Span {
        self.merge(other)
    }

    pub fn len(self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn is_dummy(self) -> bool {
        self == Self::DUMMY
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::DUMMY
    }
}
