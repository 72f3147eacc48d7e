use bumpalo::Bump;

use crate::expr::*;
use crate::{Span, Stmt, StmtKind};

/// Handle to the arena every node of one tree is allocated in.
///
/// Nodes are never freed individually; dropping the [`Bump`] releases the
/// whole tree at once. All factories take the context by value.
#[derive(Clone, Copy)]
pub struct AstContext<'a> {
    bump: &'a Bump,
}

impl<'a> AstContext<'a> {
    pub fn new(bump: &'a Bump) -> Self {
        Self { bump }
    }

    pub fn bump(&self) -> &'a Bump {
        self.bump
    }

    /// Bytes handed out by the arena so far.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    pub fn alloc_str(&self, s: &str) -> &'a str {
        self.bump.alloc_str(s)
    }

    pub fn alloc_slice<T: Copy>(&self, items: &[T]) -> &'a [T] {
        self.bump.alloc_slice_copy(items)
    }

    pub(crate) fn alloc_stmt(&self, kind: StmtKind<'a>, implicit: bool) -> &'a Stmt<'a> {
        self.bump.alloc(Stmt::new(kind, implicit))
    }

    // =========================================================================
    // Leaf nodes
    // =========================================================================

    pub fn expr(&self, kind: ExprKind<'a>, span: Span) -> &'a Expr<'a> {
        self.bump.alloc(Expr::new(kind, span))
    }

    pub fn ident(&self, name: &str, span: Span) -> &'a Expr<'a> {
        let name = self.alloc_str(name);
        self.expr(ExprKind::Ident(name), span)
    }

    pub fn int(&self, value: i64, span: Span) -> &'a Expr<'a> {
        self.expr(ExprKind::Int(value), span)
    }

    pub fn bool(&self, value: bool, span: Span) -> &'a Expr<'a> {
        self.expr(ExprKind::Bool(value), span)
    }

    pub fn call(&self, callee: &'a Expr<'a>, args: &[&'a Expr<'a>], span: Span) -> &'a Expr<'a> {
        let args = self.alloc_slice(args);
        self.expr(ExprKind::Call { callee, args }, span)
    }

    pub fn pattern(&self, kind: PatternKind<'a>, span: Span) -> &'a Pattern<'a> {
        self.bump.alloc(Pattern::new(kind, span))
    }

    pub fn decl(&self, kind: DeclKind<'a>, span: Span) -> &'a Decl<'a> {
        self.bump.alloc(Decl::new(kind, span))
    }

    /// `let <pattern> = <init>` as a declaration node.
    pub fn pattern_binding(
        &self,
        pattern: &'a Pattern<'a>,
        init: Option<&'a Expr<'a>>,
        span: Span,
    ) -> &'a Decl<'a> {
        self.decl(
            DeclKind::PatternBinding(PatternBindingDecl { pattern, init }),
            span,
        )
    }
}
