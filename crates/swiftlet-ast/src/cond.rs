//! Conditional statements: `if` and `#if`.

use std::cell::Cell;

use serde::Serialize;

use crate::expr::{Decl, Expr};
use crate::stmt::{implicit_flag, Stmt, StmtKind};
use crate::{AstContext, Span};

// =============================================================================
// Conditions
// =============================================================================

/// Condition of an `if` or `while`: either a conditional pattern binding
/// (`if let x = f()`) or a boolean expression.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum StmtCondition<'a> {
    Binding(&'a Decl<'a>),
    Expr(&'a Expr<'a>),
}

impl<'a> StmtCondition<'a> {
    /// # Panics
    /// If `decl` is not a pattern binding.
    #[track_caller]
    pub fn binding(decl: &'a Decl<'a>) -> Self {
        assert!(
            decl.as_pattern_binding().is_some(),
            "conditional binding must be a pattern binding declaration"
        );
        StmtCondition::Binding(decl)
    }

    pub fn span(&self) -> Span {
        match self {
            StmtCondition::Binding(decl) => decl.span,
            StmtCondition::Expr(expr) => expr.span,
        }
    }

    pub fn as_expr(&self) -> Option<&'a Expr<'a>> {
        match *self {
            StmtCondition::Expr(expr) => Some(expr),
            StmtCondition::Binding(_) => None,
        }
    }

    pub fn as_binding(&self) -> Option<&'a Decl<'a>> {
        match *self {
            StmtCondition::Binding(decl) => Some(decl),
            StmtCondition::Expr(_) => None,
        }
    }
}

// =============================================================================
// If / IfConfig
// =============================================================================

/// `if cond { } else { }`. A missing `else` is `None`, not an empty brace.
#[derive(Debug, Serialize)]
pub struct IfStmt<'a> {
    pub(crate) if_loc: Span,
    pub(crate) else_loc: Span,
    pub(crate) cond: Cell<StmtCondition<'a>>,
    pub(crate) then_stmt: Cell<&'a Stmt<'a>>,
    pub(crate) else_stmt: Cell<Option<&'a Stmt<'a>>>,
}

impl<'a> IfStmt<'a> {
    pub fn create(
        ctx: AstContext<'a>,
        if_loc: Span,
        cond: StmtCondition<'a>,
        then_stmt: &'a Stmt<'a>,
        else_loc: Span,
        else_stmt: Option<&'a Stmt<'a>>,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        let stmt = IfStmt {
            if_loc,
            else_loc,
            cond: Cell::new(cond),
            then_stmt: Cell::new(then_stmt),
            else_stmt: Cell::new(else_stmt),
        };
        ctx.alloc_stmt(StmtKind::If(stmt), implicit_flag(implicit, if_loc))
    }

    pub fn if_loc(&self) -> Span {
        self.if_loc
    }

    pub fn else_loc(&self) -> Span {
        self.else_loc
    }

    pub fn cond(&self) -> StmtCondition<'a> {
        self.cond.get()
    }

    pub fn set_cond(&self, cond: StmtCondition<'a>) {
        self.cond.set(cond);
    }

    pub fn then_stmt(&self) -> &'a Stmt<'a> {
        self.then_stmt.get()
    }

    pub fn set_then_stmt(&self, stmt: &'a Stmt<'a>) {
        self.then_stmt.set(stmt);
    }

    pub fn else_stmt(&self) -> Option<&'a Stmt<'a>> {
        self.else_stmt.get()
    }

    pub fn set_else_stmt(&self, stmt: Option<&'a Stmt<'a>>) {
        self.else_stmt.set(stmt);
    }

    pub fn span(&self) -> Span {
        let end = match self.else_stmt.get() {
            Some(else_stmt) => else_stmt.span(),
            None => self.then_stmt.get().span(),
        };
        self.if_loc.to(self.cond.get().span()).to(end)
    }
}

/// `#if cond ... #else ... #endif`. Which branch is active is decided before
/// the tree is built and recorded in `if_block_active`.
#[derive(Debug, Serialize)]
pub struct IfConfigStmt<'a> {
    pub(crate) if_block_active: bool,
    pub(crate) if_loc: Span,
    pub(crate) else_loc: Span,
    pub(crate) end_loc: Span,
    pub(crate) cond: Cell<&'a Expr<'a>>,
    pub(crate) then_stmt: Cell<&'a Stmt<'a>>,
    pub(crate) else_stmt: Cell<Option<&'a Stmt<'a>>>,
}

impl<'a> IfConfigStmt<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        ctx: AstContext<'a>,
        if_block_active: bool,
        if_loc: Span,
        cond: &'a Expr<'a>,
        then_stmt: &'a Stmt<'a>,
        else_loc: Span,
        else_stmt: Option<&'a Stmt<'a>>,
        end_loc: Span,
    ) -> &'a Stmt<'a> {
        let stmt = IfConfigStmt {
            if_block_active,
            if_loc,
            else_loc,
            end_loc,
            cond: Cell::new(cond),
            then_stmt: Cell::new(then_stmt),
            else_stmt: Cell::new(else_stmt),
        };
        ctx.alloc_stmt(StmtKind::IfConfig(stmt), false)
    }

    pub fn if_loc(&self) -> Span {
        self.if_loc
    }

    pub fn else_loc(&self) -> Span {
        self.else_loc
    }

    pub fn end_loc(&self) -> Span {
        self.end_loc
    }

    pub fn is_if_block_active(&self) -> bool {
        self.if_block_active
    }

    pub fn has_else(&self) -> bool {
        self.else_stmt.get().is_some()
    }

    pub fn cond(&self) -> &'a Expr<'a> {
        self.cond.get()
    }

    pub fn set_cond(&self, cond: &'a Expr<'a>) {
        self.cond.set(cond);
    }

    pub fn then_stmt(&self) -> &'a Stmt<'a> {
        self.then_stmt.get()
    }

    pub fn set_then_stmt(&self, stmt: &'a Stmt<'a>) {
        self.then_stmt.set(stmt);
    }

    pub fn else_stmt(&self) -> Option<&'a Stmt<'a>> {
        self.else_stmt.get()
    }

    pub fn set_else_stmt(&self, stmt: Option<&'a Stmt<'a>>) {
        self.else_stmt.set(stmt);
    }

    /// The branch selected by the configuration; `None` when the `#if` block
    /// is inactive and there is no `#else`.
    pub fn active_stmt(&self) -> Option<&'a Stmt<'a>> {
        if self.if_block_active {
            Some(self.then_stmt.get())
        } else {
            self.else_stmt.get()
        }
    }

    pub fn span(&self) -> Span {
        let mut span = self.if_loc.to(self.then_stmt.get().span());
        if let Some(else_stmt) = self.else_stmt.get() {
            span = span.to(else_stmt.span());
        }
        span.to(self.end_loc)
    }
}
