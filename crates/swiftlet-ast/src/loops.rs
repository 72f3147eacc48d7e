use std::cell::Cell;

use serde::Serialize;

use crate::cond::StmtCondition;
use crate::expr::{Decl, Expr, Pattern};
use crate::label::LabelInfo;
use crate::stmt::{implicit_flag, label_or_keyword, Stmt, StmtKind};
use crate::{AstContext, Span};

// =============================================================================
// Loops
// =============================================================================

/// `while cond { }`
#[derive(Debug, Serialize)]
pub struct WhileStmt<'a> {
    pub(crate) label: Cell<LabelInfo<'a>>,
    pub(crate) while_loc: Span,
    pub(crate) cond: Cell<StmtCondition<'a>>,
    pub(crate) body: Cell<&'a Stmt<'a>>,
}

impl<'a> WhileStmt<'a> {
    pub fn create(
        ctx: AstContext<'a>,
        label: LabelInfo<'a>,
        while_loc: Span,
        cond: StmtCondition<'a>,
        body: &'a Stmt<'a>,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        let stmt = WhileStmt {
            label: Cell::new(label),
            while_loc,
            cond: Cell::new(cond),
            body: Cell::new(body),
        };
        ctx.alloc_stmt(StmtKind::While(stmt), implicit_flag(implicit, while_loc))
    }

    pub fn label_info(&self) -> LabelInfo<'a> {
        self.label.get()
    }

    pub fn while_loc(&self) -> Span {
        self.while_loc
    }

    pub fn cond(&self) -> StmtCondition<'a> {
        self.cond.get()
    }

    pub fn set_cond(&self, cond: StmtCondition<'a>) {
        self.cond.set(cond);
    }

    pub fn body(&self) -> &'a Stmt<'a> {
        self.body.get()
    }

    pub fn set_body(&self, body: &'a Stmt<'a>) {
        self.body.set(body);
    }

    pub fn span(&self) -> Span {
        label_or_keyword(self.label.get(), self.while_loc)
            .to(self.cond.get().span())
            .to(self.body.get().span())
    }
}

/// `do { } while cond`. The condition is always a plain boolean expression.
#[derive(Debug, Serialize)]
pub struct DoWhileStmt<'a> {
    pub(crate) label: Cell<LabelInfo<'a>>,
    pub(crate) do_loc: Span,
    pub(crate) while_loc: Span,
    pub(crate) body: Cell<&'a Stmt<'a>>,
    pub(crate) cond: Cell<&'a Expr<'a>>,
}

impl<'a> DoWhileStmt<'a> {
    pub fn create(
        ctx: AstContext<'a>,
        label: LabelInfo<'a>,
        do_loc: Span,
        cond: &'a Expr<'a>,
        while_loc: Span,
        body: &'a Stmt<'a>,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        let stmt = DoWhileStmt {
            label: Cell::new(label),
            do_loc,
            while_loc,
            body: Cell::new(body),
            cond: Cell::new(cond),
        };
        ctx.alloc_stmt(StmtKind::DoWhile(stmt), implicit_flag(implicit, do_loc))
    }

    pub fn label_info(&self) -> LabelInfo<'a> {
        self.label.get()
    }

    pub fn do_loc(&self) -> Span {
        self.do_loc
    }

    pub fn while_loc(&self) -> Span {
        self.while_loc
    }

    pub fn body(&self) -> &'a Stmt<'a> {
        self.body.get()
    }

    pub fn set_body(&self, body: &'a Stmt<'a>) {
        self.body.set(body);
    }

    pub fn cond(&self) -> &'a Expr<'a> {
        self.cond.get()
    }

    pub fn set_cond(&self, cond: &'a Expr<'a>) {
        self.cond.set(cond);
    }

    pub fn span(&self) -> Span {
        label_or_keyword(self.label.get(), self.do_loc)
            .to(self.body.get().span())
            .to(self.while_loc)
            .to(self.cond.get().span)
    }
}

/// C-style `for init; cond; incr { }`. Every clause is optional; a missing
/// condition is always true.
#[derive(Debug, Serialize)]
pub struct ForStmt<'a> {
    pub(crate) label: Cell<LabelInfo<'a>>,
    pub(crate) for_loc: Span,
    pub(crate) semi1_loc: Span,
    pub(crate) semi2_loc: Span,
    pub(crate) initializer: Cell<Option<&'a Expr<'a>>>,
    pub(crate) initializer_var_decls: &'a [Cell<&'a Decl<'a>>],
    pub(crate) cond: Cell<Option<&'a Expr<'a>>>,
    pub(crate) increment: Cell<Option<&'a Expr<'a>>>,
    pub(crate) body: Cell<&'a Stmt<'a>>,
}

/// Clauses of a C-style `for`, in source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForClauses<'a> {
    pub initializer: Option<&'a Expr<'a>>,
    pub initializer_var_decls: &'a [&'a Decl<'a>],
    pub semi1_loc: Span,
    pub cond: Option<&'a Expr<'a>>,
    pub semi2_loc: Span,
    pub increment: Option<&'a Expr<'a>>,
}

impl<'a> ForStmt<'a> {
    pub fn create(
        ctx: AstContext<'a>,
        label: LabelInfo<'a>,
        for_loc: Span,
        clauses: ForClauses<'a>,
        body: &'a Stmt<'a>,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        let stmt = ForStmt {
            label: Cell::new(label),
            for_loc,
            semi1_loc: clauses.semi1_loc,
            semi2_loc: clauses.semi2_loc,
            initializer: Cell::new(clauses.initializer),
            initializer_var_decls: ctx.bump().alloc_slice_fill_iter(
                clauses.initializer_var_decls.iter().copied().map(Cell::new),
            ),
            cond: Cell::new(clauses.cond),
            increment: Cell::new(clauses.increment),
            body: Cell::new(body),
        };
        ctx.alloc_stmt(StmtKind::For(stmt), implicit_flag(implicit, for_loc))
    }

    pub fn label_info(&self) -> LabelInfo<'a> {
        self.label.get()
    }

    pub fn for_loc(&self) -> Span {
        self.for_loc
    }

    pub fn semi1_loc(&self) -> Span {
        self.semi1_loc
    }

    pub fn semi2_loc(&self) -> Span {
        self.semi2_loc
    }

    pub fn initializer(&self) -> Option<&'a Expr<'a>> {
        self.initializer.get()
    }

    pub fn set_initializer(&self, expr: Option<&'a Expr<'a>>) {
        self.initializer.set(expr);
    }

    /// Variables introduced by the initializer clause, in source order.
    pub fn initializer_var_decls(&self) -> impl ExactSizeIterator<Item = &'a Decl<'a>> + 'a {
        self.initializer_var_decls.iter().map(Cell::get)
    }

    /// Replace one initializer variable in place.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn set_initializer_var_decl(&self, index: usize, decl: &'a Decl<'a>) {
        self.initializer_var_decls[index].set(decl);
    }

    pub fn cond(&self) -> Option<&'a Expr<'a>> {
        self.cond.get()
    }

    pub fn set_cond(&self, cond: Option<&'a Expr<'a>>) {
        self.cond.set(cond);
    }

    pub fn increment(&self) -> Option<&'a Expr<'a>> {
        self.increment.get()
    }

    pub fn set_increment(&self, expr: Option<&'a Expr<'a>>) {
        self.increment.set(expr);
    }

    pub fn body(&self) -> &'a Stmt<'a> {
        self.body.get()
    }

    pub fn set_body(&self, body: &'a Stmt<'a>) {
        self.body.set(body);
    }

    pub fn span(&self) -> Span {
        label_or_keyword(self.label.get(), self.for_loc).to(self.body.get().span())
    }
}

/// `for pattern in sequence { }`.
///
/// `generator` and `generator_next` are filled in by semantic analysis via
/// [`ForEachStmt::complete`]. Until then the loop is still a well-formed
/// tree; walkers simply see fewer children.
#[derive(Debug, Serialize)]
pub struct ForEachStmt<'a> {
    pub(crate) label: Cell<LabelInfo<'a>>,
    pub(crate) for_loc: Span,
    pub(crate) in_loc: Span,
    pub(crate) pattern: Cell<&'a Pattern<'a>>,
    pub(crate) sequence: Cell<&'a Expr<'a>>,
    pub(crate) body: Cell<&'a Stmt<'a>>,
    pub(crate) generator: Cell<Option<&'a Decl<'a>>>,
    pub(crate) generator_next: Cell<Option<&'a Expr<'a>>>,
}

impl<'a> ForEachStmt<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        ctx: AstContext<'a>,
        label: LabelInfo<'a>,
        for_loc: Span,
        pattern: &'a Pattern<'a>,
        in_loc: Span,
        sequence: &'a Expr<'a>,
        body: &'a Stmt<'a>,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        let stmt = ForEachStmt {
            label: Cell::new(label),
            for_loc,
            in_loc,
            pattern: Cell::new(pattern),
            sequence: Cell::new(sequence),
            body: Cell::new(body),
            generator: Cell::new(None),
            generator_next: Cell::new(None),
        };
        ctx.alloc_stmt(StmtKind::ForEach(stmt), implicit_flag(implicit, for_loc))
    }

    pub fn label_info(&self) -> LabelInfo<'a> {
        self.label.get()
    }

    pub fn for_loc(&self) -> Span {
        self.for_loc
    }

    pub fn in_loc(&self) -> Span {
        self.in_loc
    }

    /// Iteration variables; visible only inside the body.
    pub fn pattern(&self) -> &'a Pattern<'a> {
        self.pattern.get()
    }

    pub fn set_pattern(&self, pattern: &'a Pattern<'a>) {
        self.pattern.set(pattern);
    }

    /// The sequence as written in source.
    pub fn sequence(&self) -> &'a Expr<'a> {
        self.sequence.get()
    }

    pub fn set_sequence(&self, sequence: &'a Expr<'a>) {
        self.sequence.set(sequence);
    }

    pub fn body(&self) -> &'a Stmt<'a> {
        self.body.get()
    }

    pub fn set_body(&self, body: &'a Stmt<'a>) {
        self.body.set(body);
    }

    pub fn is_complete(&self) -> bool {
        self.generator.get().is_some()
    }

    /// Attach the implicit generator binding and the expression that
    /// advances it.
    ///
    /// # Panics
    /// If the loop was already completed.
    #[track_caller]
    pub fn complete(&self, generator: &'a Decl<'a>, generator_next: &'a Expr<'a>) {
        assert!(!self.is_complete(), "for-each loop already completed");
        self.generator.set(Some(generator));
        self.generator_next.set(Some(generator_next));
    }

    /// # Panics
    /// Before [`ForEachStmt::complete`].
    #[track_caller]
    pub fn generator(&self) -> &'a Decl<'a> {
        match self.generator.get() {
            Some(decl) => decl,
            None => panic!("for-each generator read before completion"),
        }
    }

    /// # Panics
    /// Before [`ForEachStmt::complete`].
    #[track_caller]
    pub fn generator_next(&self) -> &'a Expr<'a> {
        match self.generator_next.get() {
            Some(expr) => expr,
            None => panic!("for-each generator advance read before completion"),
        }
    }

    pub fn generator_opt(&self) -> Option<&'a Decl<'a>> {
        self.generator.get()
    }

    pub fn generator_next_opt(&self) -> Option<&'a Expr<'a>> {
        self.generator_next.get()
    }

    pub fn span(&self) -> Span {
        label_or_keyword(self.label.get(), self.for_loc).to(self.body.get().span())
    }
}
