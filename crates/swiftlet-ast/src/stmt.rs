use std::cell::Cell;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::cond::{IfConfigStmt, IfStmt};
use crate::container::{BraceStmt, CaseStmt, SwitchStmt};
use crate::jump::{BreakStmt, ContinueStmt, FallthroughStmt, ReturnStmt};
use crate::label::LabelInfo;
use crate::loops::{DoWhileStmt, ForEachStmt, ForStmt, WhileStmt};
use crate::{Span, StmtTag};

// =============================================================================
// Base node
// =============================================================================

/// A statement. Always allocated in an [`AstContext`](crate::AstContext) and handed around as
/// `&'a Stmt<'a>`.
#[derive(Debug)]
pub struct Stmt<'a> {
    pub kind: StmtKind<'a>,
    implicit: bool,
    trailing_semi: Cell<Option<Span>>,
}

#[derive(Debug, Serialize)]
pub enum StmtKind<'a> {
    Brace(BraceStmt<'a>),
    Return(ReturnStmt<'a>),
    Break(BreakStmt<'a>),
    Continue(ContinueStmt<'a>),
    Fallthrough(FallthroughStmt<'a>),
    If(IfStmt<'a>),
    IfConfig(IfConfigStmt<'a>),
    Case(CaseStmt<'a>),
    While(WhileStmt<'a>),
    DoWhile(DoWhileStmt<'a>),
    For(ForStmt<'a>),
    ForEach(ForEachStmt<'a>),
    Switch(SwitchStmt<'a>),
}

/// `implicit` if given, otherwise whether the keyword is missing from the
/// source.
pub(crate) fn implicit_flag(implicit: Option<bool>, keyword: Span) -> bool {
    implicit.unwrap_or_else(|| keyword.is_dummy())
}

/// Start of a labelled statement: the label when present, else the keyword.
pub(crate) fn label_or_keyword(label: LabelInfo<'_>, keyword: Span) -> Span {
    if label.is_some() {
        label.span
    } else {
        keyword
    }
}

impl<'a> Stmt<'a> {
    pub(crate) fn new(kind: StmtKind<'a>, implicit: bool) -> Self {
        Self {
            kind,
            implicit,
            trailing_semi: Cell::new(None),
        }
    }

    pub fn tag(&self) -> StmtTag {
        match &self.kind {
            StmtKind::Brace(_) => StmtTag::Brace,
            StmtKind::Return(_) => StmtTag::Return,
            StmtKind::Break(_) => StmtTag::Break,
            StmtKind::Continue(_) => StmtTag::Continue,
            StmtKind::Fallthrough(_) => StmtTag::Fallthrough,
            StmtKind::If(_) => StmtTag::If,
            StmtKind::IfConfig(_) => StmtTag::IfConfig,
            StmtKind::Case(_) => StmtTag::Case,
            StmtKind::While(_) => StmtTag::While,
            StmtKind::DoWhile(_) => StmtTag::DoWhile,
            StmtKind::For(_) => StmtTag::For,
            StmtKind::ForEach(_) => StmtTag::ForEach,
            StmtKind::Switch(_) => StmtTag::Switch,
        }
    }

    /// Whether the statement was synthesized rather than written in source.
    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    pub fn span(&self) -> Span {
        match &self.kind {
            StmtKind::Brace(s) => s.span(),
            StmtKind::Return(s) => s.span(),
            StmtKind::Break(s) => s.span(),
            StmtKind::Continue(s) => s.span(),
            StmtKind::Fallthrough(s) => s.span(),
            StmtKind::If(s) => s.span(),
            StmtKind::IfConfig(s) => s.span(),
            StmtKind::Case(s) => s.span(),
            StmtKind::While(s) => s.span(),
            StmtKind::DoWhile(s) => s.span(),
            StmtKind::For(s) => s.span(),
            StmtKind::ForEach(s) => s.span(),
            StmtKind::Switch(s) => s.span(),
        }
    }

    pub fn start(&self) -> u32 {
        self.span().start
    }

    pub fn end(&self) -> u32 {
        self.span().end
    }

    pub fn trailing_semi(&self) -> Option<Span> {
        self.trailing_semi.get()
    }

    pub fn set_trailing_semi(&self, semi: Span) {
        self.trailing_semi.set(Some(semi));
    }

    // =========================================================================
    // Downcasting
    // =========================================================================

    pub fn is<T: StmtNode<'a>>(&self) -> bool {
        self.tag() == T::TAG
    }

    pub fn downcast<T: StmtNode<'a>>(&self) -> Option<&T> {
        T::from_kind(&self.kind)
    }

    /// Downcast to a variant the caller already knows this statement is.
    ///
    /// # Panics
    /// If the statement is of a different kind.
    #[track_caller]
    pub fn cast<T: StmtNode<'a>>(&self) -> &T {
        match T::from_kind(&self.kind) {
            Some(node) => node,
            None => panic!("cannot cast {} to {}", self.tag(), T::TAG),
        }
    }

    /// Loops and `switch`.
    pub fn is_labeled(&self) -> bool {
        self.tag().is_labeled()
    }

    pub fn is_loop(&self) -> bool {
        self.tag().is_loop()
    }

    pub fn label_info(&self) -> Option<LabelInfo<'a>> {
        self.label_cell().map(Cell::get)
    }

    /// # Panics
    /// If the statement cannot carry a label.
    #[track_caller]
    pub fn set_label_info(&self, label: LabelInfo<'a>) {
        match self.label_cell() {
            Some(cell) => cell.set(label),
            None => panic!("{} cannot carry a label", self.tag()),
        }
    }

    fn label_cell(&self) -> Option<&Cell<LabelInfo<'a>>> {
        match &self.kind {
            StmtKind::While(s) => Some(&s.label),
            StmtKind::DoWhile(s) => Some(&s.label),
            StmtKind::For(s) => Some(&s.label),
            StmtKind::ForEach(s) => Some(&s.label),
            StmtKind::Switch(s) => Some(&s.label),
            _ => None,
        }
    }
}

impl Serialize for Stmt<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Stmt", 3)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("span", &self.span())?;
        state.serialize_field("implicit", &self.implicit)?;
        state.end()
    }
}

/// Implemented by every statement variant payload so a [`Stmt`] can be
/// tested and cast by tag.
pub trait StmtNode<'a>: Sized {
    const TAG: StmtTag;

    fn from_kind<'s>(kind: &'s StmtKind<'a>) -> Option<&'s Self>;
}

macro_rules! stmt_node {
    ($($variant:ident => $ty:ident),+ $(,)?) => {
        $(
            impl<'a> StmtNode<'a> for $ty<'a> {
                const TAG: StmtTag = StmtTag::$variant;

                fn from_kind<'s>(kind: &'s StmtKind<'a>) -> Option<&'s Self> {
                    match kind {
                        StmtKind::$variant(node) => Some(node),
                        _ => None,
                    }
                }
            }
        )+
    };
}

stmt_node!(
    Brace => BraceStmt,
    Return => ReturnStmt,
    Break => BreakStmt,
    Continue => ContinueStmt,
    Fallthrough => FallthroughStmt,
    If => IfStmt,
    IfConfig => IfConfigStmt,
    Case => CaseStmt,
    While => WhileStmt,
    DoWhile => DoWhileStmt,
    For => ForStmt,
    ForEach => ForEachStmt,
    Switch => SwitchStmt,
);
