use crate::*;

/// Visitor trait for AST traversal. All methods have default implementations
/// that recursively walk child nodes, so implementors only need to override
/// the node types they care about.
pub trait Visitor<'a> {
    fn visit_stmt(&mut self, stmt: &'a Stmt<'a>) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &'a Expr<'a>) {
        walk_expr(self, expr);
    }

    fn visit_decl(&mut self, decl: &'a Decl<'a>) {
        walk_decl(self, decl);
    }

    fn visit_pattern(&mut self, pattern: &'a Pattern<'a>) {
        walk_pattern(self, pattern);
    }

    fn visit_condition(&mut self, cond: StmtCondition<'a>) {
        walk_condition(self, cond);
    }

    fn visit_case_label_item(&mut self, item: &'a CaseLabelItem<'a>) {
        walk_case_label_item(self, item);
    }
}

pub fn walk_node<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, node: AstNode<'a>) {
    match node {
        AstNode::Stmt(stmt) => visitor.visit_stmt(stmt),
        AstNode::Decl(decl) => visitor.visit_decl(decl),
        AstNode::Expr(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_stmt<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, stmt: &'a Stmt<'a>) {
    match &stmt.kind {
        StmtKind::Brace(brace) => {
            for node in brace.iter() {
                walk_node(visitor, node);
            }
        }
        StmtKind::Return(ret) => {
            if let Some(result) = ret.result_opt() {
                visitor.visit_expr(result);
            }
        }
        StmtKind::Break(_) | StmtKind::Continue(_) | StmtKind::Fallthrough(_) => {}
        StmtKind::If(if_stmt) => {
            visitor.visit_condition(if_stmt.cond());
            visitor.visit_stmt(if_stmt.then_stmt());
            if let Some(else_stmt) = if_stmt.else_stmt() {
                visitor.visit_stmt(else_stmt);
            }
        }
        StmtKind::IfConfig(config) => {
            visitor.visit_expr(config.cond());
            visitor.visit_stmt(config.then_stmt());
            if let Some(else_stmt) = config.else_stmt() {
                visitor.visit_stmt(else_stmt);
            }
        }
        StmtKind::Case(case) => {
            for item in case.label_items() {
                visitor.visit_case_label_item(item);
            }
            visitor.visit_stmt(case.body());
        }
        StmtKind::While(while_stmt) => {
            visitor.visit_condition(while_stmt.cond());
            visitor.visit_stmt(while_stmt.body());
        }
        StmtKind::DoWhile(do_while) => {
            visitor.visit_stmt(do_while.body());
            visitor.visit_expr(do_while.cond());
        }
        StmtKind::For(for_stmt) => {
            for decl in for_stmt.initializer_var_decls() {
                visitor.visit_decl(decl);
            }
            if let Some(init) = for_stmt.initializer() {
                visitor.visit_expr(init);
            }
            if let Some(cond) = for_stmt.cond() {
                visitor.visit_expr(cond);
            }
            if let Some(incr) = for_stmt.increment() {
                visitor.visit_expr(incr);
            }
            visitor.visit_stmt(for_stmt.body());
        }
        StmtKind::ForEach(for_each) => {
            visitor.visit_pattern(for_each.pattern());
            visitor.visit_expr(for_each.sequence());
            if let Some(generator) = for_each.generator_opt() {
                visitor.visit_decl(generator);
            }
            if let Some(next) = for_each.generator_next_opt() {
                visitor.visit_expr(next);
            }
            visitor.visit_stmt(for_each.body());
        }
        StmtKind::Switch(switch) => {
            visitor.visit_expr(switch.subject());
            for case in switch.cases() {
                visitor.visit_stmt(case);
            }
        }
    }
}

pub fn walk_condition<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, cond: StmtCondition<'a>) {
    match cond {
        StmtCondition::Binding(decl) => visitor.visit_decl(decl),
        StmtCondition::Expr(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_case_label_item<'a, V: Visitor<'a> + ?Sized>(
    visitor: &mut V,
    item: &'a CaseLabelItem<'a>,
) {
    visitor.visit_pattern(item.pattern());
    if let Some(guard) = item.guard_expr() {
        visitor.visit_expr(guard);
    }
}

pub fn walk_expr<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, expr: &'a Expr<'a>) {
    match expr.kind {
        ExprKind::Tuple(elements) => {
            for element in elements {
                visitor.visit_expr(element);
            }
        }
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        ExprKind::Assign { target, value } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::Ident(_) | ExprKind::Int(_) | ExprKind::Bool(_) | ExprKind::Error => {}
    }
}

pub fn walk_decl<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, decl: &'a Decl<'a>) {
    match decl.kind {
        DeclKind::PatternBinding(binding) => {
            visitor.visit_pattern(binding.pattern);
            if let Some(init) = binding.init {
                visitor.visit_expr(init);
            }
        }
        DeclKind::Var(_) => {}
    }
}

pub fn walk_pattern<'a, V: Visitor<'a> + ?Sized>(visitor: &mut V, pattern: &'a Pattern<'a>) {
    match pattern.kind {
        PatternKind::Expr(expr) => visitor.visit_expr(expr),
        PatternKind::Tuple(elements) => {
            for element in elements {
                visitor.visit_pattern(element);
            }
        }
        PatternKind::Any | PatternKind::Binding(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;

    use super::*;
    use crate::{AstContext, Span};

    /// A simple visitor that counts identifiers and jump statements
    #[derive(Default)]
    struct Counter {
        idents: usize,
        jumps: usize,
    }

    impl<'a> Visitor<'a> for Counter {
        fn visit_stmt(&mut self, stmt: &'a Stmt<'a>) {
            if stmt.tag().is_branch_transfer() {
                self.jumps += 1;
            }
            walk_stmt(self, stmt);
        }

        fn visit_expr(&mut self, expr: &'a Expr<'a>) {
            if matches!(expr.kind, ExprKind::Ident(_)) {
                self.idents += 1;
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn test_visitor_reaches_nested_statements() {
        let bump = Bump::new();
        let ctx = AstContext::new(&bump);
        // while c { if f(x) { break } ; return y }
        let brk = BreakStmt::create(ctx, Span::new(20, 25), None, Span::DUMMY, None);
        let then = BraceStmt::create(
            ctx,
            Span::new(18, 19),
            &[AstNode::Stmt(brk)],
            Span::new(26, 27),
            None,
        );
        let f = ctx.ident("f", Span::new(12, 13));
        let x = ctx.ident("x", Span::new(14, 15));
        let call = ctx.call(f, &[x], Span::new(12, 16));
        let if_stmt = IfStmt::create(
            ctx,
            Span::new(9, 11),
            StmtCondition::Expr(call),
            then,
            Span::DUMMY,
            None,
            None,
        );
        let y = ctx.ident("y", Span::new(36, 37));
        let ret = ReturnStmt::create(ctx, Span::new(29, 35), Some(y), None);
        let body = BraceStmt::create(
            ctx,
            Span::new(8, 9),
            &[AstNode::Stmt(if_stmt), AstNode::Stmt(ret)],
            Span::new(38, 39),
            None,
        );
        let cond = ctx.ident("c", Span::new(6, 7));
        let root = WhileStmt::create(
            ctx,
            LabelInfo::NONE,
            Span::new(0, 5),
            StmtCondition::Expr(cond),
            body,
            None,
        );

        let mut counter = Counter::default();
        counter.visit_stmt(root);
        assert_eq!(counter.idents, 4);
        assert_eq!(counter.jumps, 2);
    }
}
