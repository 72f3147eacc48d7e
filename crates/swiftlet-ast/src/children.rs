//! Uniform, in-place access to the immediate children of a statement.

use std::cell::Cell;

use crate::cond::StmtCondition;
use crate::container::AstNode;
use crate::expr::{Decl, Expr, Pattern};
use crate::stmt::{Stmt, StmtKind};
use crate::StmtTag;

/// A child node of any family.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Stmt(&'a Stmt<'a>),
    Decl(&'a Decl<'a>),
    Expr(&'a Expr<'a>),
    Pattern(&'a Pattern<'a>),
}

impl<'a> Child<'a> {
    pub fn ptr_eq(&self, other: &Child<'a>) -> bool {
        match (self, other) {
            (Child::Stmt(a), Child::Stmt(b)) => std::ptr::eq(*a, *b),
            (Child::Decl(a), Child::Decl(b)) => std::ptr::eq(*a, *b),
            (Child::Expr(a), Child::Expr(b)) => std::ptr::eq(*a, *b),
            (Child::Pattern(a), Child::Pattern(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }

    fn family(&self) -> &'static str {
        match self {
            Child::Stmt(_) => "statement",
            Child::Decl(_) => "declaration",
            Child::Expr(_) => "expression",
            Child::Pattern(_) => "pattern",
        }
    }
}

impl<'a> From<AstNode<'a>> for Child<'a> {
    fn from(node: AstNode<'a>) -> Self {
        match node {
            AstNode::Stmt(stmt) => Child::Stmt(stmt),
            AstNode::Decl(decl) => Child::Decl(decl),
            AstNode::Expr(expr) => Child::Expr(expr),
        }
    }
}

/// A reference to the storage of one child. Optional fields only produce a
/// slot while they are populated.
#[derive(Clone, Copy)]
pub enum ChildSlot<'n, 'a> {
    Stmt(&'n Cell<&'a Stmt<'a>>),
    OptStmt(&'n Cell<Option<&'a Stmt<'a>>>),
    Case(&'n Cell<&'a Stmt<'a>>),
    Expr(&'n Cell<&'a Expr<'a>>),
    Decl(&'n Cell<&'a Decl<'a>>),
    OptExpr(&'n Cell<Option<&'a Expr<'a>>>),
    OptDecl(&'n Cell<Option<&'a Decl<'a>>>),
    Pattern(&'n Cell<&'a Pattern<'a>>),
    Condition(&'n Cell<StmtCondition<'a>>),
    Element(&'n Cell<AstNode<'a>>),
}

impl<'n, 'a> ChildSlot<'n, 'a> {
    /// # Panics
    /// If an optional slot was cleared after the slot list was taken.
    #[track_caller]
    pub fn get(&self) -> Child<'a> {
        match *self {
            ChildSlot::Stmt(cell) | ChildSlot::Case(cell) => Child::Stmt(cell.get()),
            ChildSlot::OptStmt(cell) => Child::Stmt(unwrap_slot(cell.get())),
            ChildSlot::Expr(cell) => Child::Expr(cell.get()),
            ChildSlot::Decl(cell) => Child::Decl(cell.get()),
            ChildSlot::OptExpr(cell) => Child::Expr(unwrap_slot(cell.get())),
            ChildSlot::OptDecl(cell) => Child::Decl(unwrap_slot(cell.get())),
            ChildSlot::Pattern(cell) => Child::Pattern(cell.get()),
            ChildSlot::Condition(cell) => match cell.get() {
                StmtCondition::Binding(decl) => Child::Decl(decl),
                StmtCondition::Expr(expr) => Child::Expr(expr),
            },
            ChildSlot::Element(cell) => cell.get().into(),
        }
    }

    /// Store `child` in this slot and return what was there.
    ///
    /// # Panics
    /// If `child` belongs to a node family the slot cannot hold, or a case
    /// slot is given something other than a case clause.
    #[track_caller]
    pub fn replace(&self, child: Child<'a>) -> Child<'a> {
        let old = self.get();
        match (*self, child) {
            (ChildSlot::Stmt(cell), Child::Stmt(stmt)) => cell.set(stmt),
            (ChildSlot::OptStmt(cell), Child::Stmt(stmt)) => cell.set(Some(stmt)),
            (ChildSlot::Case(cell), Child::Stmt(stmt)) => {
                assert_eq!(stmt.tag(), StmtTag::Case, "switch child must be a case clause");
                cell.set(stmt);
            }
            (ChildSlot::Expr(cell), Child::Expr(expr)) => cell.set(expr),
            (ChildSlot::Decl(cell), Child::Decl(decl)) => cell.set(decl),
            (ChildSlot::OptExpr(cell), Child::Expr(expr)) => cell.set(Some(expr)),
            (ChildSlot::OptDecl(cell), Child::Decl(decl)) => cell.set(Some(decl)),
            (ChildSlot::Pattern(cell), Child::Pattern(pattern)) => cell.set(pattern),
            (ChildSlot::Condition(cell), Child::Expr(expr)) => {
                cell.set(StmtCondition::Expr(expr))
            }
            (ChildSlot::Condition(cell), Child::Decl(decl)) => {
                cell.set(StmtCondition::binding(decl))
            }
            (ChildSlot::Element(cell), Child::Stmt(stmt)) => cell.set(AstNode::Stmt(stmt)),
            (ChildSlot::Element(cell), Child::Decl(decl)) => cell.set(AstNode::Decl(decl)),
            (ChildSlot::Element(cell), Child::Expr(expr)) => cell.set(AstNode::Expr(expr)),
            (_, child) => panic!(
                "cannot store a {} in a slot holding a {}",
                child.family(),
                old.family()
            ),
        }
        old
    }
}

#[track_caller]
fn unwrap_slot<T>(value: Option<T>) -> T {
    match value {
        Some(value) => value,
        None => panic!("optional child slot is empty"),
    }
}

impl<'a> Stmt<'a> {
    /// The immediate children in source order. Each slot can be read and
    /// overwritten in place; none can be added or removed.
    pub fn children<'n>(&'n self) -> Vec<ChildSlot<'n, 'a>> {
        let mut out = Vec::new();
        match &self.kind {
            StmtKind::Brace(s) => out.extend(s.elements.iter().map(ChildSlot::Element)),
            StmtKind::Return(s) => push_opt_expr(&mut out, &s.result),
            StmtKind::Break(_) | StmtKind::Continue(_) | StmtKind::Fallthrough(_) => {}
            StmtKind::If(s) => {
                out.push(ChildSlot::Condition(&s.cond));
                out.push(ChildSlot::Stmt(&s.then_stmt));
                push_opt_stmt(&mut out, &s.else_stmt);
            }
            StmtKind::IfConfig(s) => {
                out.push(ChildSlot::Expr(&s.cond));
                out.push(ChildSlot::Stmt(&s.then_stmt));
                push_opt_stmt(&mut out, &s.else_stmt);
            }
            StmtKind::Case(s) => {
                for item in s.label_items {
                    out.push(ChildSlot::Pattern(&item.pattern));
                    push_opt_expr(&mut out, &item.guard);
                }
                out.push(ChildSlot::Stmt(&s.body));
            }
            StmtKind::While(s) => {
                out.push(ChildSlot::Condition(&s.cond));
                out.push(ChildSlot::Stmt(&s.body));
            }
            StmtKind::DoWhile(s) => {
                out.push(ChildSlot::Stmt(&s.body));
                out.push(ChildSlot::Expr(&s.cond));
            }
            StmtKind::For(s) => {
                out.extend(s.initializer_var_decls.iter().map(ChildSlot::Decl));
                push_opt_expr(&mut out, &s.initializer);
                push_opt_expr(&mut out, &s.cond);
                push_opt_expr(&mut out, &s.increment);
                out.push(ChildSlot::Stmt(&s.body));
            }
            StmtKind::ForEach(s) => {
                out.push(ChildSlot::Pattern(&s.pattern));
                out.push(ChildSlot::Expr(&s.sequence));
                if s.generator.get().is_some() {
                    out.push(ChildSlot::OptDecl(&s.generator));
                }
                push_opt_expr(&mut out, &s.generator_next);
                out.push(ChildSlot::Stmt(&s.body));
            }
            StmtKind::Switch(s) => {
                out.push(ChildSlot::Expr(&s.subject));
                out.extend(s.cases.iter().map(ChildSlot::Case));
            }
        }
        out
    }
}

fn push_opt_expr<'n, 'a>(
    out: &mut Vec<ChildSlot<'n, 'a>>,
    cell: &'n Cell<Option<&'a Expr<'a>>>,
) {
    if cell.get().is_some() {
        out.push(ChildSlot::OptExpr(cell));
    }
}

fn push_opt_stmt<'n, 'a>(
    out: &mut Vec<ChildSlot<'n, 'a>>,
    cell: &'n Cell<Option<&'a Stmt<'a>>>,
) {
    if cell.get().is_some() {
        out.push(ChildSlot::OptStmt(cell));
    }
}
