//! Statements whose number of children is fixed at construction: braces,
//! case clauses and `switch`.
//!
//! Children are copied into a single arena slice when the node is created.
//! Individual entries can be replaced in place afterwards, but the slice never
//! grows or shrinks; changing the arity means building a new node.

use std::cell::Cell;

use serde::Serialize;

use crate::expr::{Decl, Expr, Pattern};
use crate::label::LabelInfo;
use crate::stmt::{implicit_flag, label_or_keyword, Stmt, StmtKind};
use crate::{AstContext, Span, StmtTag};

/// An element of a brace statement.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum AstNode<'a> {
    Stmt(&'a Stmt<'a>),
    Decl(&'a Decl<'a>),
    Expr(&'a Expr<'a>),
}

impl<'a> AstNode<'a> {
    pub fn span(&self) -> Span {
        match self {
            AstNode::Stmt(stmt) => stmt.span(),
            AstNode::Decl(decl) => decl.span,
            AstNode::Expr(expr) => expr.span,
        }
    }

    pub fn as_stmt(&self) -> Option<&'a Stmt<'a>> {
        match *self {
            AstNode::Stmt(stmt) => Some(stmt),
            _ => None,
        }
    }

    /// Identity comparison: same arena node, not structural equality.
    pub fn ptr_eq(&self, other: &AstNode<'a>) -> bool {
        match (self, other) {
            (AstNode::Stmt(a), AstNode::Stmt(b)) => std::ptr::eq(*a, *b),
            (AstNode::Decl(a), AstNode::Decl(b)) => std::ptr::eq(*a, *b),
            (AstNode::Expr(a), AstNode::Expr(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

// =============================================================================
// Brace
// =============================================================================

/// Conditional-compilation state of a brace statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ConfigBlockState {
    /// An ordinary block.
    #[default]
    Normal,
    /// The body of a `#if`/`#else` clause that is compiled.
    ActiveConfig,
    /// The body of a `#if`/`#else` clause that is skipped.
    InactiveConfig,
}

/// `{ ... }`: an ordered mix of statements, declarations and expressions.
#[derive(Debug, Serialize)]
pub struct BraceStmt<'a> {
    pub(crate) lbrace: Span,
    pub(crate) rbrace: Span,
    pub(crate) elements: &'a [Cell<AstNode<'a>>],
    pub(crate) config: Cell<ConfigBlockState>,
}

impl<'a> BraceStmt<'a> {
    pub fn create(
        ctx: AstContext<'a>,
        lbrace: Span,
        elements: &[AstNode<'a>],
        rbrace: Span,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        let elements = ctx
            .bump()
            .alloc_slice_fill_iter(elements.iter().copied().map(Cell::new));
        let stmt = BraceStmt {
            lbrace,
            rbrace,
            elements,
            config: Cell::new(ConfigBlockState::Normal),
        };
        ctx.alloc_stmt(StmtKind::Brace(stmt), implicit_flag(implicit, lbrace))
    }

    pub fn lbrace(&self) -> Span {
        self.lbrace
    }

    pub fn rbrace(&self) -> Span {
        self.rbrace
    }

    /// The element slots, in source order.
    pub fn elements(&self) -> &'a [Cell<AstNode<'a>>] {
        self.elements
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = AstNode<'a>> + 'a {
        self.elements.iter().map(Cell::get)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// # Panics
    /// If `index` is out of bounds.
    pub fn element(&self, index: usize) -> AstNode<'a> {
        self.elements[index].get()
    }

    /// Replace one element in place.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn set_element(&self, index: usize, node: AstNode<'a>) {
        self.elements[index].set(node);
    }

    pub fn config_state(&self) -> ConfigBlockState {
        self.config.get()
    }

    pub fn mark_as_config_block(&self) {
        if self.config.get() == ConfigBlockState::Normal {
            self.config.set(ConfigBlockState::ActiveConfig);
        }
    }

    /// An inactive block is always also a config block.
    pub fn mark_as_inactive_config_block(&self) {
        self.config.set(ConfigBlockState::InactiveConfig);
    }

    pub fn is_config_block(&self) -> bool {
        self.config.get() != ConfigBlockState::Normal
    }

    pub fn is_inactive_config_block(&self) -> bool {
        self.config.get() == ConfigBlockState::InactiveConfig
    }

    /// From `{` to `}`. A missing brace is replaced by the outermost element
    /// on that side.
    pub fn span(&self) -> Span {
        let elements = self
            .iter()
            .fold(Span::DUMMY, |span, element| span.to(element.span()));
        self.lbrace.to(elements).to(self.rbrace)
    }
}

// =============================================================================
// Case
// =============================================================================

/// One `pattern where guard` entry of a case label, or the `default` label.
#[derive(Debug, Clone, Serialize)]
pub struct CaseLabelItem<'a> {
    pub(crate) pattern: Cell<&'a Pattern<'a>>,
    pub(crate) where_loc: Span,
    pub(crate) guard: Cell<Option<&'a Expr<'a>>>,
    pub(crate) is_default: bool,
}

impl<'a> CaseLabelItem<'a> {
    pub fn new(
        is_default: bool,
        pattern: &'a Pattern<'a>,
        where_loc: Span,
        guard: Option<&'a Expr<'a>>,
    ) -> Self {
        Self {
            pattern: Cell::new(pattern),
            where_loc,
            guard: Cell::new(guard),
            is_default,
        }
    }

    pub fn pattern(&self) -> &'a Pattern<'a> {
        self.pattern.get()
    }

    pub fn set_pattern(&self, pattern: &'a Pattern<'a>) {
        self.pattern.set(pattern);
    }

    pub fn where_loc(&self) -> Span {
        self.where_loc
    }

    pub fn guard_expr(&self) -> Option<&'a Expr<'a>> {
        self.guard.get()
    }

    pub fn set_guard_expr(&self, guard: Option<&'a Expr<'a>>) {
        self.guard.set(guard);
    }

    /// True for a syntactic `default:` label.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn span(&self) -> Span {
        let span = self.pattern.get().span;
        match self.guard.get() {
            Some(guard) => span.to(guard.span),
            None => span,
        }
    }
}

/// A `case ...:` or `default:` clause. Only valid as a child of a
/// [`SwitchStmt`].
#[derive(Debug, Serialize)]
pub struct CaseStmt<'a> {
    pub(crate) case_loc: Span,
    pub(crate) colon_loc: Span,
    pub(crate) label_items: &'a [CaseLabelItem<'a>],
    pub(crate) body: Cell<&'a Stmt<'a>>,
    pub(crate) has_bound_decls: bool,
}

impl<'a> CaseStmt<'a> {
    /// # Panics
    /// If `label_items` is empty.
    #[track_caller]
    pub fn create(
        ctx: AstContext<'a>,
        case_loc: Span,
        label_items: &[CaseLabelItem<'a>],
        has_bound_decls: bool,
        colon_loc: Span,
        body: &'a Stmt<'a>,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        assert!(
            !label_items.is_empty(),
            "case clause needs at least one label item"
        );
        let stmt = CaseStmt {
            case_loc,
            colon_loc,
            label_items: ctx.bump().alloc_slice_clone(label_items),
            body: Cell::new(body),
            has_bound_decls,
        };
        ctx.alloc_stmt(StmtKind::Case(stmt), implicit_flag(implicit, case_loc))
    }

    /// Location of the `case` or `default` keyword.
    pub fn case_loc(&self) -> Span {
        self.case_loc
    }

    pub fn colon_loc(&self) -> Span {
        self.colon_loc
    }

    pub fn label_items(&self) -> &'a [CaseLabelItem<'a>] {
        self.label_items
    }

    pub fn body(&self) -> &'a Stmt<'a> {
        self.body.get()
    }

    pub fn set_body(&self, body: &'a Stmt<'a>) {
        self.body.set(body);
    }

    /// Whether any pattern of the clause binds variables.
    pub fn has_bound_decls(&self) -> bool {
        self.has_bound_decls
    }

    pub fn is_default(&self) -> bool {
        self.label_items[0].is_default()
    }

    pub fn span(&self) -> Span {
        self.case_loc.to(self.body.get().span())
    }
}

// =============================================================================
// Switch
// =============================================================================

/// `switch subject { case ... }`. Case order is source order; it decides
/// where a `fallthrough` lands.
#[derive(Debug, Serialize)]
pub struct SwitchStmt<'a> {
    pub(crate) label: Cell<LabelInfo<'a>>,
    pub(crate) switch_loc: Span,
    pub(crate) lbrace: Span,
    pub(crate) rbrace: Span,
    pub(crate) subject: Cell<&'a Expr<'a>>,
    pub(crate) cases: &'a [Cell<&'a Stmt<'a>>],
}

impl<'a> SwitchStmt<'a> {
    /// # Panics
    /// If any of `cases` is not a case clause.
    #[allow(clippy::too_many_arguments)]
    #[track_caller]
    pub fn create(
        ctx: AstContext<'a>,
        label: LabelInfo<'a>,
        switch_loc: Span,
        subject: &'a Expr<'a>,
        lbrace: Span,
        cases: &[&'a Stmt<'a>],
        rbrace: Span,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        for case in cases {
            assert!(
                case.is::<CaseStmt>(),
                "switch child must be a case clause, found {}",
                case.tag()
            );
        }
        let cases = ctx
            .bump()
            .alloc_slice_fill_iter(cases.iter().copied().map(Cell::new));
        let stmt = SwitchStmt {
            label: Cell::new(label),
            switch_loc,
            lbrace,
            rbrace,
            subject: Cell::new(subject),
            cases,
        };
        ctx.alloc_stmt(StmtKind::Switch(stmt), implicit_flag(implicit, switch_loc))
    }

    pub fn label_info(&self) -> LabelInfo<'a> {
        self.label.get()
    }

    pub fn switch_loc(&self) -> Span {
        self.switch_loc
    }

    pub fn lbrace(&self) -> Span {
        self.lbrace
    }

    pub fn rbrace(&self) -> Span {
        self.rbrace
    }

    pub fn subject(&self) -> &'a Expr<'a> {
        self.subject.get()
    }

    pub fn set_subject(&self, subject: &'a Expr<'a>) {
        self.subject.set(subject);
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Case clauses as statements, in source order.
    pub fn cases(&self) -> impl ExactSizeIterator<Item = &'a Stmt<'a>> + 'a {
        self.cases.iter().map(Cell::get)
    }

    /// Case clauses with their payload, in source order.
    pub fn case_stmts(&self) -> impl ExactSizeIterator<Item = &'a CaseStmt<'a>> + 'a {
        self.cases.iter().map(|case| case.get().cast::<CaseStmt>())
    }

    /// # Panics
    /// If `index` is out of bounds.
    pub fn case(&self, index: usize) -> &'a Stmt<'a> {
        self.cases[index].get()
    }

    /// Replace one case clause in place.
    ///
    /// # Panics
    /// If `index` is out of bounds or `case` is not a case clause.
    #[track_caller]
    pub fn set_case(&self, index: usize, case: &'a Stmt<'a>) {
        assert_eq!(case.tag(), StmtTag::Case, "switch child must be a case clause");
        self.cases[index].set(case);
    }

    /// Position of `case` among this switch's clauses, by identity.
    pub fn case_index(&self, case: &Stmt<'a>) -> Option<usize> {
        self.cases
            .iter()
            .position(|slot| std::ptr::eq(slot.get(), case))
    }

    /// The clause after `case`, which is where a `fallthrough` in `case`
    /// lands. `None` for the last clause or a clause of another switch.
    pub fn next_case(&self, case: &Stmt<'a>) -> Option<&'a Stmt<'a>> {
        let index = self.case_index(case)?;
        self.cases.get(index + 1).map(Cell::get)
    }

    pub fn span(&self) -> Span {
        let start = label_or_keyword(self.label.get(), self.switch_loc);
        let mut span = start.to(self.subject.get().span).to(self.lbrace);
        if let Some(last) = self.cases.last() {
            span = span.to(last.get().span());
        }
        span.to(self.rbrace)
    }
}
