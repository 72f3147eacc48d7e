//! Labels on loops and `switch`, and the targets of `break`, `continue` and
//! `fallthrough`.
//!
//! A branch target starts out unresolved: the parser only knows the textual
//! label, if any. The semantic pass later links it to the statement it
//! exits, repeats or falls into. The link is written exactly once.

use std::cell::Cell;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{Span, Stmt, StmtTag};

/// `name:` in front of a loop or `switch`. An unlabelled statement has an
/// empty name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelInfo<'a> {
    pub name: &'a str,
    pub span: Span,
}

impl LabelInfo<'static> {
    pub const NONE: LabelInfo<'static> = LabelInfo {
        name: "",
        span: Span::DUMMY,
    };
}

impl<'a> LabelInfo<'a> {
    pub fn new(name: &'a str, span: Span) -> Self {
        Self { name, span }
    }

    pub fn is_some(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_none(&self) -> bool {
        self.name.is_empty()
    }
}

/// Resolution state of a control-transfer statement.
///
/// An unresolved `break` or `continue` keeps what resolution needs on the
/// statement itself: see `BreakStmt::target_name`/`target_loc` and the
/// `ContinueStmt` equivalents.
#[derive(Clone, Copy)]
pub enum BranchTarget<'a> {
    Unresolved,
    Resolved(&'a Stmt<'a>),
}

impl<'a> BranchTarget<'a> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, BranchTarget::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&'a Stmt<'a>> {
        match *self {
            BranchTarget::Resolved(stmt) => Some(stmt),
            BranchTarget::Unresolved => None,
        }
    }
}

// Targets point back up the tree; print them by reference.
impl fmt::Debug for BranchTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchTarget::Unresolved => f.write_str("Unresolved"),
            BranchTarget::Resolved(stmt) => f
                .debug_tuple("Resolved")
                .field(&stmt.tag())
                .field(&stmt.span())
                .finish(),
        }
    }
}

struct TargetRef {
    kind: StmtTag,
    span: Span,
}

impl Serialize for TargetRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TargetRef", 2)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("span", &self.span)?;
        state.end()
    }
}

impl Serialize for BranchTarget<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BranchTarget::Unresolved => {
                serializer.serialize_unit_variant("BranchTarget", 0, "Unresolved")
            }
            BranchTarget::Resolved(stmt) => serializer.serialize_newtype_variant(
                "BranchTarget",
                1,
                "Resolved",
                &TargetRef {
                    kind: stmt.tag(),
                    span: stmt.span(),
                },
            ),
        }
    }
}

/// Write-once cell holding a [`BranchTarget`].
pub struct TargetSlot<'a> {
    state: Cell<BranchTarget<'a>>,
}

impl<'a> TargetSlot<'a> {
    pub fn new() -> Self {
        Self {
            state: Cell::new(BranchTarget::Unresolved),
        }
    }

    pub fn state(&self) -> BranchTarget<'a> {
        self.state.get()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.get().is_resolved()
    }

    pub fn get(&self) -> Option<&'a Stmt<'a>> {
        self.state.get().resolved()
    }

    /// The resolved target.
    ///
    /// # Panics
    /// If the slot has not been resolved yet.
    #[track_caller]
    pub fn target(&self) -> &'a Stmt<'a> {
        match self.state.get() {
            BranchTarget::Resolved(stmt) => stmt,
            BranchTarget::Unresolved => panic!("branch target read before resolution"),
        }
    }

    /// Link the slot to `target`.
    ///
    /// # Panics
    /// If the slot was already resolved.
    #[track_caller]
    pub fn resolve(&self, target: &'a Stmt<'a>) {
        if let BranchTarget::Resolved(previous) = self.state.get() {
            panic!(
                "branch target already resolved to {} at {:?}",
                previous.tag(),
                previous.span()
            );
        }
        self.state.set(BranchTarget::Resolved(target));
    }
}

impl Default for TargetSlot<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TargetSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.get().fmt(f)
    }
}

impl Serialize for TargetSlot<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state.get().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;

    use super::*;
    use crate::{AstContext, BreakStmt};

    #[test]
    fn test_label_info_empty_name_means_absent() {
        assert!(LabelInfo::NONE.is_none());
        assert!(LabelInfo::default().is_none());
        assert!(LabelInfo::new("outer", Span::new(0, 5)).is_some());
    }

    #[test]
    fn test_slot_starts_unresolved() {
        let slot = TargetSlot::new();
        assert!(!slot.is_resolved());
        assert!(slot.get().is_none());
        assert!(matches!(slot.state(), BranchTarget::Unresolved));
    }

    #[test]
    fn test_slot_resolves_once() {
        let bump = Bump::new();
        let ctx = AstContext::new(&bump);
        let target = BreakStmt::create(ctx, Span::new(0, 5), None, Span::DUMMY, None);
        let slot = TargetSlot::new();
        slot.resolve(target);
        assert!(std::ptr::eq(slot.target(), target));
        assert!(std::ptr::eq(slot.get().unwrap(), target));
    }

    #[test]
    #[should_panic(expected = "already resolved")]
    fn test_slot_rejects_second_resolution() {
        let bump = Bump::new();
        let ctx = AstContext::new(&bump);
        let target = BreakStmt::create(ctx, Span::new(0, 5), None, Span::DUMMY, None);
        let slot = TargetSlot::new();
        slot.resolve(target);
        slot.resolve(target);
    }

    #[test]
    #[should_panic(expected = "before resolution")]
    fn test_slot_read_before_resolution() {
        let slot = TargetSlot::new();
        slot.target();
    }

    #[test]
    fn test_unresolved_serializes_as_unit_variant() {
        let slot = TargetSlot::new();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"Unresolved\"");
    }
}
