//! Links `break`, `continue` and `fallthrough` to the statements they
//! transfer control to.
//!
//! Labels are lexically scoped: a transfer only sees the label-bearing
//! statements that enclose it. Unlabelled `break` binds to the innermost loop
//! or switch, unlabelled `continue` to the innermost loop. `fallthrough` moves
//! into the case that follows the one it appears in.

use swiftlet_ast::visitor::{walk_stmt, Visitor};
use swiftlet_ast::*;

use crate::error::ResolveError;

/// Resolve every branch target under `root` and return the transfers that
/// could not be resolved. Those are left unresolved in the tree.
pub fn resolve_branches<'a>(root: &'a Stmt<'a>) -> Vec<ResolveError> {
    let mut resolver = BranchResolver::new();
    resolver.visit_stmt(root);
    resolver.finish()
}

/// The case a `fallthrough` would leave.
#[derive(Clone, Copy)]
struct CaseFrame<'a> {
    switch: &'a SwitchStmt<'a>,
    case: &'a Stmt<'a>,
}

/// Tree walker holding the lexical context of the statement being visited.
#[derive(Default)]
pub struct BranchResolver<'a> {
    /// Enclosing loops and switches, innermost last.
    labeled: Vec<&'a Stmt<'a>>,
    /// Enclosing case clauses, innermost last.
    cases: Vec<CaseFrame<'a>>,
    errors: Vec<ResolveError>,
}

impl<'a> BranchResolver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors collected so far, in source order of the offending statements.
    pub fn errors(&self) -> &[ResolveError] {
        &self.errors
    }

    pub fn finish(self) -> Vec<ResolveError> {
        tracing::debug!(errors = self.errors.len(), "branch resolution finished");
        self.errors
    }

    fn find_label(&self, name: &str) -> Option<&'a Stmt<'a>> {
        self.labeled.iter().rev().copied().find(|stmt| {
            stmt.label_info()
                .is_some_and(|label| label.is_some() && label.name == name)
        })
    }

    fn innermost_loop(&self) -> Option<&'a Stmt<'a>> {
        self.labeled.iter().rev().copied().find(|stmt| stmt.is_loop())
    }

    fn report(&mut self, stmt: &Stmt<'a>, error: ResolveError) {
        tracing::debug!(kind = %stmt.tag(), start = stmt.start(), %error, "unresolved branch");
        self.errors.push(error);
    }

    fn resolve_break(&mut self, stmt: &'a Stmt<'a>, brk: &'a BreakStmt<'a>) {
        if brk.is_resolved() {
            return;
        }
        let target = match brk.target_name() {
            Some(name) => match self.find_label(name) {
                Some(target) => target,
                None => {
                    return self.report(stmt, ResolveError::unmatched_label(name, brk.target_loc()))
                }
            },
            None => match self.labeled.last() {
                Some(&target) => target,
                None => return self.report(stmt, ResolveError::break_outside_loop(brk.loc())),
            },
        };
        brk.set_target(target);
        log_resolved(stmt, target);
    }

    fn resolve_continue(&mut self, stmt: &'a Stmt<'a>, cont: &'a ContinueStmt<'a>) {
        if cont.is_resolved() {
            return;
        }
        let target = match cont.target_name() {
            Some(name) => match self.find_label(name) {
                Some(target) if target.is_loop() => target,
                Some(_) => {
                    let error = ResolveError::continue_not_loop(name, cont.target_loc());
                    return self.report(stmt, error);
                }
                None => {
                    return self.report(stmt, ResolveError::unmatched_label(name, cont.target_loc()))
                }
            },
            None => match self.innermost_loop() {
                Some(target) => target,
                None => return self.report(stmt, ResolveError::continue_outside_loop(cont.loc())),
            },
        };
        cont.set_target(target);
        log_resolved(stmt, target);
    }

    fn resolve_fallthrough(&mut self, stmt: &'a Stmt<'a>, fallthrough: &'a FallthroughStmt<'a>) {
        if fallthrough.is_resolved() {
            return;
        }
        let Some(frame) = self.cases.last().copied() else {
            return self.report(stmt, ResolveError::fallthrough_outside_switch(fallthrough.loc()));
        };
        let Some(next) = frame.switch.next_case(frame.case) else {
            return self.report(stmt, ResolveError::fallthrough_from_last_case(fallthrough.loc()));
        };
        let dest = next.cast::<CaseStmt>();
        if dest.has_bound_decls() {
            let error =
                ResolveError::fallthrough_into_binding_case(fallthrough.loc(), dest.case_loc());
            return self.report(stmt, error);
        }
        fallthrough.set_fallthrough_dest(next);
        log_resolved(stmt, next);
    }

    fn visit_labeled(&mut self, stmt: &'a Stmt<'a>) {
        tracing::trace!(kind = %stmt.tag(), depth = self.labeled.len(), "enter label scope");
        self.labeled.push(stmt);
        match &stmt.kind {
            StmtKind::Switch(switch) => {
                self.visit_expr(switch.subject());
                for case in switch.cases() {
                    self.cases.push(CaseFrame { switch, case });
                    walk_stmt(self, case);
                    self.cases.pop();
                }
            }
            _ => walk_stmt(self, stmt),
        }
        self.labeled.pop();
    }
}

fn log_resolved(stmt: &Stmt<'_>, target: &Stmt<'_>) {
    tracing::debug!(
        kind = %stmt.tag(),
        start = stmt.start(),
        target = %target.tag(),
        target_start = target.start(),
        "resolved branch target"
    );
}

impl<'a> Visitor<'a> for BranchResolver<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt<'a>) {
        match &stmt.kind {
            StmtKind::Break(brk) => self.resolve_break(stmt, brk),
            StmtKind::Continue(cont) => self.resolve_continue(stmt, cont),
            StmtKind::Fallthrough(fallthrough) => self.resolve_fallthrough(stmt, fallthrough),
            // Only the compiled branch of a `#if` is checked.
            StmtKind::IfConfig(config) => {
                if let Some(active) = config.active_stmt() {
                    self.visit_stmt(active);
                }
            }
            StmtKind::Brace(brace) if brace.is_inactive_config_block() => {}
            _ if stmt.is_labeled() => self.visit_labeled(stmt),
            _ => walk_stmt(self, stmt),
        }
    }
}
