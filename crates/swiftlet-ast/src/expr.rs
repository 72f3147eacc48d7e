//! Expression, pattern and declaration nodes referenced by statements.
//!
//! Only the shapes statements need to point at are modelled here: enough to
//! write conditions, case patterns, loop bindings and brace elements.

use serde::Serialize;

use crate::Span;

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Expr<'a> {
    pub kind: ExprKind<'a>,
    pub span: Span,
}

impl<'a> Expr<'a> {
    pub fn new(kind: ExprKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum ExprKind<'a> {
    Ident(&'a str),
    Int(i64),
    Bool(bool),
    /// `(a, b)`; the empty tuple is `()`.
    Tuple(&'a [&'a Expr<'a>]),
    Call {
        callee: &'a Expr<'a>,
        args: &'a [&'a Expr<'a>],
    },
    Binary {
        op: BinaryOp,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
    },
    Assign {
        target: &'a Expr<'a>,
        value: &'a Expr<'a>,
    },
    /// Placeholder left behind by error recovery.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Lt,
    Eq,
    And,
    Or,
}

// =============================================================================
// Patterns
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pattern<'a> {
    pub kind: PatternKind<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum PatternKind<'a> {
    /// `_`
    Any,
    /// `let x` / `var x`
    Binding(&'a str),
    /// An expression pattern matched with `~=`.
    Expr(&'a Expr<'a>),
    Tuple(&'a [&'a Pattern<'a>]),
}

impl<'a> Pattern<'a> {
    pub fn new(kind: PatternKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }

    /// True if matching this pattern introduces at least one variable.
    pub fn binds_variables(&self) -> bool {
        match self.kind {
            PatternKind::Binding(_) => true,
            PatternKind::Tuple(elements) => elements.iter().any(|p| p.binds_variables()),
            PatternKind::Any | PatternKind::Expr(_) => false,
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Decl<'a> {
    pub kind: DeclKind<'a>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum DeclKind<'a> {
    Var(VarDecl<'a>),
    PatternBinding(PatternBindingDecl<'a>),
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct VarDecl<'a> {
    pub name: &'a str,
    pub is_let: bool,
}

/// `let <pattern> = <init>`; also the conditional binding of `if let`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PatternBindingDecl<'a> {
    pub pattern: &'a Pattern<'a>,
    pub init: Option<&'a Expr<'a>>,
}

impl<'a> Decl<'a> {
    pub fn new(kind: DeclKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn as_pattern_binding(&self) -> Option<&PatternBindingDecl<'a>> {
        match &self.kind {
            DeclKind::PatternBinding(binding) => Some(binding),
            DeclKind::Var(_) => None,
        }
    }
}
