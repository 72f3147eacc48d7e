//! Statements that transfer control: `return`, `break`, `continue` and
//! `fallthrough`.

use std::cell::Cell;

use serde::Serialize;

use crate::container::CaseStmt;
use crate::expr::Expr;
use crate::label::{BranchTarget, TargetSlot};
use crate::stmt::{implicit_flag, Stmt, StmtKind};
use crate::{AstContext, Span};

// =============================================================================
// Return
// =============================================================================

/// `return` or `return <expr>`. A bare `return` returns `()`.
#[derive(Debug, Serialize)]
pub struct ReturnStmt<'a> {
    pub(crate) return_loc: Span,
    pub(crate) result: Cell<Option<&'a Expr<'a>>>,
}

impl<'a> ReturnStmt<'a> {
    pub fn create(
        ctx: AstContext<'a>,
        return_loc: Span,
        result: Option<&'a Expr<'a>>,
        implicit: Option<bool>,
    ) -> &'a Stmt<'a> {
        let stmt = ReturnStmt {
            return_loc,
            result: Cell::new(result),
        };
        ctx.alloc_stmt(StmtKind::Return(stmt), implicit_flag(implicit, return_loc))
    }

    pub fn return_loc(&self) -> Span {
        self.return_loc
    }

    pub fn has_result(&self) -> bool {
        self.result.get().is_some()
    }

    /// # Panics
    /// If this is a bare `return`.
    #[track_caller]
    pub fn result(&self) -> &'a Expr<'a> {
        match self.result.get() {
            Some(expr) => expr,
            None => panic!("return statement has no result"),
        }
    }

    pub fn result_opt(&self) -> Option<&'a Expr<'a>> {
        self.result.get()
    }

    pub fn set_result(&self, expr: &'a Expr<'a>) {
        self.result.set(Some(expr));
    }

    pub fn span(&self) -> Span {
        match self.result.get() {
            Some(expr) => self.return_loc.to(expr.span),
            None => self.return_loc,
        }
    }
}

// =============================================================================
// Break / Continue / Fallthrough
// =============================================================================

fn written_label(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.is_empty())
}

macro_rules! jump_stmt {
    ($ty:ident, $variant:ident, $keyword:literal, $accepts:ident, $what:literal) => {
        impl<'a> $ty<'a> {
            /// `target_name` is the label written after the keyword, if any;
            /// without one the statement binds to the nearest enclosing
            /// candidate during resolution. An empty name counts as no label.
            pub fn create(
                ctx: AstContext<'a>,
                loc: Span,
                target_name: Option<&'a str>,
                target_loc: Span,
                implicit: Option<bool>,
            ) -> &'a Stmt<'a> {
                let stmt = $ty {
                    loc,
                    target_name: Cell::new(written_label(target_name)),
                    target_loc: Cell::new(target_loc),
                    target: TargetSlot::new(),
                };
                ctx.alloc_stmt(StmtKind::$variant(stmt), implicit_flag(implicit, loc))
            }

            #[doc = concat!("Location of the `", $keyword, "` keyword.")]
            pub fn loc(&self) -> Span {
                self.loc
            }

            pub fn target_name(&self) -> Option<&'a str> {
                self.target_name.get()
            }

            pub fn set_target_name(&self, name: Option<&'a str>) {
                self.target_name.set(written_label(name));
            }

            pub fn target_loc(&self) -> Span {
                self.target_loc.get()
            }

            pub fn set_target_loc(&self, loc: Span) {
                self.target_loc.set(loc);
            }

            pub fn is_resolved(&self) -> bool {
                self.target.is_resolved()
            }

            /// The resolved target, or `None` while unresolved.
            pub fn resolved_target(&self) -> Option<&'a Stmt<'a>> {
                self.target.get()
            }

            pub fn target_state(&self) -> BranchTarget<'a> {
                self.target.state()
            }

            /// # Panics
            /// If the target has not been resolved yet.
            #[track_caller]
            pub fn target(&self) -> &'a Stmt<'a> {
                self.target.target()
            }

            #[doc = concat!("Link to the ", $what, " this statement transfers control to.")]
            ///
            /// # Panics
            /// If the target was already set, or is not a valid kind of target.
            #[track_caller]
            pub fn set_target(&self, target: &'a Stmt<'a>) {
                assert!(
                    target.$accepts(),
                    concat!("`", $keyword, "` cannot target {}"),
                    target.tag()
                );
                self.target.resolve(target);
            }

            pub fn span(&self) -> Span {
                let target_loc = self.target_loc.get();
                if target_loc.is_dummy() {
                    self.loc
                } else {
                    self.loc.to(target_loc)
                }
            }
        }
    };
}

/// `break` or `break label`.
#[derive(Debug, Serialize)]
pub struct BreakStmt<'a> {
    pub(crate) loc: Span,
    pub(crate) target_name: Cell<Option<&'a str>>,
    pub(crate) target_loc: Cell<Span>,
    pub(crate) target: TargetSlot<'a>,
}

jump_stmt!(BreakStmt, Break, "break", is_labeled, "loop or switch");

/// `continue` or `continue label`.
#[derive(Debug, Serialize)]
pub struct ContinueStmt<'a> {
    pub(crate) loc: Span,
    pub(crate) target_name: Cell<Option<&'a str>>,
    pub(crate) target_loc: Cell<Span>,
    pub(crate) target: TargetSlot<'a>,
}

jump_stmt!(ContinueStmt, Continue, "continue", is_loop, "loop");

/// `fallthrough`: transfers control into the next case of the same switch.
#[derive(Debug, Serialize)]
pub struct FallthroughStmt<'a> {
    pub(crate) loc: Span,
    pub(crate) dest: TargetSlot<'a>,
}

impl<'a> FallthroughStmt<'a> {
    pub fn create(ctx: AstContext<'a>, loc: Span, implicit: Option<bool>) -> &'a Stmt<'a> {
        let stmt = FallthroughStmt {
            loc,
            dest: TargetSlot::new(),
        };
        ctx.alloc_stmt(StmtKind::Fallthrough(stmt), implicit_flag(implicit, loc))
    }

    pub fn loc(&self) -> Span {
        self.loc
    }

    pub fn is_resolved(&self) -> bool {
        self.dest.is_resolved()
    }

    /// # Panics
    /// If the destination has not been resolved yet.
    #[track_caller]
    pub fn fallthrough_dest(&self) -> &'a CaseStmt<'a> {
        self.dest.target().cast::<CaseStmt>()
    }

    /// The destination case as a statement, or `None` while unresolved.
    pub fn dest_stmt(&self) -> Option<&'a Stmt<'a>> {
        self.dest.get()
    }

    /// # Panics
    /// If the destination was already set or `case` is not a case clause.
    #[track_caller]
    pub fn set_fallthrough_dest(&self, case: &'a Stmt<'a>) {
        assert!(
            case.is::<CaseStmt>(),
            "`fallthrough` cannot target {}",
            case.tag()
        );
        self.dest.resolve(case);
    }

    pub fn span(&self) -> Span {
        self.loc
    }
}
