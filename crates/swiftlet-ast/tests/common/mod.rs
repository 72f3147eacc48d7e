#![allow(dead_code)]

use serde::Serialize;
use swiftlet_ast::*;

pub fn sp(start: u32, end: u32) -> Span {
    Span::new(start, end)
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap()
}

/// `{ stmts }` with one-byte braces at `lbrace` and `rbrace`.
pub fn block<'a>(
    ctx: AstContext<'a>,
    lbrace: u32,
    stmts: &[&'a Stmt<'a>],
    rbrace: u32,
) -> &'a Stmt<'a> {
    let nodes: Vec<AstNode<'a>> = stmts.iter().copied().map(AstNode::Stmt).collect();
    BraceStmt::create(ctx, sp(lbrace, lbrace + 1), &nodes, sp(rbrace, rbrace + 1), None)
}

/// A brace with no written braces, as the parser builds for case bodies.
pub fn implicit_block<'a>(ctx: AstContext<'a>, nodes: &[AstNode<'a>]) -> &'a Stmt<'a> {
    BraceStmt::create(ctx, Span::DUMMY, nodes, Span::DUMMY, None)
}

pub fn expr_pattern<'a>(ctx: AstContext<'a>, expr: &'a Expr<'a>) -> &'a Pattern<'a> {
    ctx.pattern(PatternKind::Expr(expr), expr.span)
}

/// `name()` spanning `start..start + name.len() + 2`.
pub fn call0<'a>(ctx: AstContext<'a>, name: &str, start: u32) -> &'a Expr<'a> {
    let end = start + name.len() as u32;
    let callee = ctx.ident(name, sp(start, end));
    ctx.call(callee, &[], sp(start, end + 2))
}
