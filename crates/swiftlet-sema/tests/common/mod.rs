#![allow(dead_code)]

use swiftlet_ast::*;

pub fn sp(start: u32, end: u32) -> Span {
    Span::new(start, end)
}

pub fn to_json<'a>(stmt: &'a Stmt<'a>) -> String {
    serde_json::to_string_pretty(stmt).unwrap()
}

pub fn block<'a>(ctx: AstContext<'a>, stmts: &[&'a Stmt<'a>]) -> &'a Stmt<'a> {
    let nodes: Vec<AstNode<'a>> = stmts.iter().copied().map(AstNode::Stmt).collect();
    BraceStmt::create(ctx, Span::DUMMY, &nodes, Span::DUMMY, None)
}

/// `label: while true { stmts }`
pub fn while_loop<'a>(
    ctx: AstContext<'a>,
    label: LabelInfo<'a>,
    stmts: &[&'a Stmt<'a>],
) -> &'a Stmt<'a> {
    let cond = StmtCondition::Expr(ctx.bool(true, Span::DUMMY));
    WhileStmt::create(ctx, label, sp(0, 5), cond, block(ctx, stmts), None)
}

pub fn label(name: &str) -> LabelInfo<'_> {
    LabelInfo::new(name, sp(0, name.len() as u32))
}

/// `break` or `break name` with the keyword at `at`.
pub fn brk<'a>(ctx: AstContext<'a>, at: u32, name: Option<&'a str>) -> &'a Stmt<'a> {
    let target_loc = target_loc(at + 6, name);
    BreakStmt::create(ctx, sp(at, at + 5), name, target_loc, None)
}

/// `continue` or `continue name` with the keyword at `at`.
pub fn cont<'a>(ctx: AstContext<'a>, at: u32, name: Option<&'a str>) -> &'a Stmt<'a> {
    let target_loc = target_loc(at + 9, name);
    ContinueStmt::create(ctx, sp(at, at + 8), name, target_loc, None)
}

fn target_loc(at: u32, name: Option<&str>) -> Span {
    match name {
        Some(name) => sp(at, at + name.len() as u32),
        None => Span::DUMMY,
    }
}

pub fn fallthrough<'a>(ctx: AstContext<'a>, at: u32) -> &'a Stmt<'a> {
    FallthroughStmt::create(ctx, sp(at, at + 11), None)
}

/// `case let v:` when `binds`, `default:` when `is_default`, else `case _:`.
pub fn case<'a>(
    ctx: AstContext<'a>,
    at: u32,
    is_default: bool,
    binds: bool,
    stmts: &[&'a Stmt<'a>],
) -> &'a Stmt<'a> {
    let kind = if binds {
        PatternKind::Binding("v")
    } else {
        PatternKind::Any
    };
    let pattern = ctx.pattern(kind, sp(at + 5, at + 6));
    let items = [CaseLabelItem::new(is_default, pattern, Span::DUMMY, None)];
    CaseStmt::create(
        ctx,
        sp(at, at + 4),
        &items,
        binds,
        sp(at + 6, at + 7),
        block(ctx, stmts),
        None,
    )
}

pub fn switch<'a>(
    ctx: AstContext<'a>,
    label: LabelInfo<'a>,
    cases: &[&'a Stmt<'a>],
) -> &'a Stmt<'a> {
    let subject = ctx.ident("x", sp(7, 8));
    SwitchStmt::create(ctx, label, sp(0, 6), subject, sp(9, 10), cases, Span::DUMMY, None)
}

/// The target a resolved `break` or `continue` points at.
pub fn target_of<'a>(stmt: &'a Stmt<'a>) -> Option<&'a Stmt<'a>> {
    match &stmt.kind {
        StmtKind::Break(brk) => brk.resolved_target(),
        StmtKind::Continue(cont) => cont.resolved_target(),
        StmtKind::Fallthrough(fallthrough) => fallthrough.dest_stmt(),
        _ => panic!("{} has no branch target", stmt.tag()),
    }
}

pub fn same<'a>(a: Option<&'a Stmt<'a>>, b: &'a Stmt<'a>) -> bool {
    a.is_some_and(|a| std::ptr::eq(a, b))
}
