mod common;

use bumpalo::Bump;
use common::*;
use swiftlet_ast::*;
use swiftlet_sema::{resolve_branches, ResolveErrorKind};

// =============================================================================
// break / continue
// =============================================================================

#[test]
fn test_unlabeled_break_binds_innermost_loop() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let b = brk(ctx, 20, None);
    let inner = while_loop(ctx, LabelInfo::NONE, &[b]);
    let outer = while_loop(ctx, LabelInfo::NONE, &[inner]);

    assert!(resolve_branches(outer).is_empty());
    assert!(same(target_of(b), inner));
}

#[test]
fn test_labeled_break_binds_matching_outer_loop() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let b = brk(ctx, 20, Some("outer"));
    let inner = while_loop(ctx, label("inner"), &[b]);
    let outer = while_loop(ctx, label("outer"), &[inner]);

    assert!(resolve_branches(outer).is_empty());
    assert!(same(target_of(b), outer));
}

#[test]
fn test_empty_label_binds_like_unlabeled() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let b = brk(ctx, 20, Some(""));
    let c = cont(ctx, 30, Some(""));
    let inner = while_loop(ctx, label("inner"), &[b, c]);
    let outer = while_loop(ctx, label("outer"), &[inner]);

    assert!(resolve_branches(outer).is_empty());
    assert!(same(target_of(b), inner));
    assert!(same(target_of(c), inner));
}

#[test]
fn test_unlabeled_break_in_switch_binds_switch() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let b = brk(ctx, 20, None);
    let sw = switch(ctx, LabelInfo::NONE, &[case(ctx, 11, true, false, &[b])]);
    let root = while_loop(ctx, LabelInfo::NONE, &[sw]);

    assert!(resolve_branches(root).is_empty());
    assert!(same(target_of(b), sw));
}

#[test]
fn test_unlabeled_continue_skips_switch() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let c = cont(ctx, 20, None);
    let sw = switch(ctx, LabelInfo::NONE, &[case(ctx, 11, true, false, &[c])]);
    let root = while_loop(ctx, LabelInfo::NONE, &[sw]);

    assert!(resolve_branches(root).is_empty());
    assert!(same(target_of(c), root));
}

#[test]
fn test_every_loop_kind_is_a_target() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let in_do = cont(ctx, 3, None);
    let do_while = DoWhileStmt::create(
        ctx,
        LabelInfo::NONE,
        sp(0, 2),
        ctx.bool(true, sp(20, 24)),
        sp(14, 19),
        block(ctx, &[in_do]),
        None,
    );
    let in_for = brk(ctx, 10, None);
    let for_stmt = ForStmt::create(
        ctx,
        LabelInfo::NONE,
        sp(0, 3),
        ForClauses::default(),
        block(ctx, &[in_for]),
        None,
    );
    let in_for_each = brk(ctx, 20, Some("each"));
    let for_each = ForEachStmt::create(
        ctx,
        label("each"),
        sp(6, 9),
        ctx.pattern(PatternKind::Any, sp(10, 11)),
        sp(12, 14),
        ctx.ident("xs", sp(15, 17)),
        block(ctx, &[in_for_each]),
        None,
    );
    let root = block(ctx, &[do_while, for_stmt, for_each]);

    assert!(resolve_branches(root).is_empty());
    assert!(same(target_of(in_do), do_while));
    assert!(same(target_of(in_for), for_stmt));
    assert!(same(target_of(in_for_each), for_each));
}

#[test]
fn test_labeled_continue_naming_switch_is_rejected() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let c = cont(ctx, 20, Some("sw"));
    let sw = switch(ctx, label("sw"), &[case(ctx, 11, true, false, &[c])]);
    let root = while_loop(ctx, LabelInfo::NONE, &[sw]);

    let errors = resolve_branches(root);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind,
        ResolveErrorKind::ContinueNotLoop {
            label: "sw".to_string()
        }
    );
    assert_eq!(errors[0].span, sp(29, 31));
    assert!(target_of(c).is_none());
}

#[test]
fn test_unmatched_label_leaves_target_unresolved() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let b = brk(ctx, 20, Some("missing"));
    let root = while_loop(ctx, label("outer"), &[b]);

    let errors = resolve_branches(root);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind,
        ResolveErrorKind::UnmatchedLabel {
            label: "missing".to_string()
        }
    );
    assert_eq!(errors[0].span, sp(26, 33));
    assert!(!b.cast::<BreakStmt>().is_resolved());
}

#[test]
fn test_labels_are_lexically_scoped() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    // a: while true { }  while true { break a }
    let first = while_loop(ctx, label("a"), &[]);
    let b = brk(ctx, 40, Some("a"));
    let second = while_loop(ctx, LabelInfo::NONE, &[b]);
    let root = block(ctx, &[first, second]);

    let errors = resolve_branches(root);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].kind, ResolveErrorKind::UnmatchedLabel { .. }));
}

#[test]
fn test_transfers_outside_loops_are_rejected() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let b = brk(ctx, 0, None);
    let c = cont(ctx, 6, None);
    let root = block(ctx, &[b, c]);

    let errors = resolve_branches(root);
    let kinds: Vec<ResolveErrorKind> = errors.into_iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ResolveErrorKind::BreakOutsideLoop,
            ResolveErrorKind::ContinueOutsideLoop
        ]
    );
}

#[test]
fn test_continue_in_switch_without_loop_is_rejected() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let c = cont(ctx, 20, None);
    let root = switch(ctx, LabelInfo::NONE, &[case(ctx, 11, true, false, &[c])]);

    let errors = resolve_branches(root);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ResolveErrorKind::ContinueOutsideLoop);
    assert_eq!(errors[0].span, sp(20, 28));
}

// =============================================================================
// fallthrough
// =============================================================================

#[test]
fn test_fallthrough_lands_in_next_case() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let f = fallthrough(ctx, 19);
    let first = case(ctx, 11, false, false, &[f]);
    let second = case(ctx, 31, false, false, &[]);
    let third = case(ctx, 45, true, false, &[]);
    let root = switch(ctx, LabelInfo::NONE, &[first, second, third]);

    assert!(resolve_branches(root).is_empty());
    assert!(same(target_of(f), second));
}

#[test]
fn test_fallthrough_inside_loop_in_case_uses_enclosing_case() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let f = fallthrough(ctx, 30);
    let looped = while_loop(ctx, LabelInfo::NONE, &[f]);
    let first = case(ctx, 11, false, false, &[looped]);
    let second = case(ctx, 50, true, false, &[]);
    let root = switch(ctx, LabelInfo::NONE, &[first, second]);

    assert!(resolve_branches(root).is_empty());
    assert!(same(target_of(f), second));
}

#[test]
fn test_fallthrough_from_last_case_is_rejected() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let f = fallthrough(ctx, 30);
    let first = case(ctx, 11, false, false, &[]);
    let last = case(ctx, 20, true, false, &[f]);
    let root = switch(ctx, LabelInfo::NONE, &[first, last]);

    let errors = resolve_branches(root);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ResolveErrorKind::FallthroughFromLastCase);
    assert_eq!(errors[0].span, sp(30, 41));
    assert!(target_of(f).is_none());
}

#[test]
fn test_fallthrough_into_binding_case_is_rejected() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let f = fallthrough(ctx, 19);
    let first = case(ctx, 11, false, false, &[f]);
    let binding = case(ctx, 31, false, true, &[]);
    let root = switch(ctx, LabelInfo::NONE, &[first, binding]);

    let errors = resolve_branches(root);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].kind,
        ResolveErrorKind::FallthroughIntoBindingCase {
            case_loc: sp(31, 35)
        }
    );
    assert!(target_of(f).is_none());
}

#[test]
fn test_fallthrough_outside_switch_is_rejected() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let f = fallthrough(ctx, 12);
    let root = while_loop(ctx, LabelInfo::NONE, &[f]);

    let errors = resolve_branches(root);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ResolveErrorKind::FallthroughOutsideSwitch);
}

// =============================================================================
// Pass behaviour
// =============================================================================

#[test]
fn test_only_active_config_branch_is_resolved() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    // while true { #if DEBUG { break nowhere } #else { break } #endif }
    let skipped = brk(ctx, 20, Some("nowhere"));
    let taken = brk(ctx, 40, None);
    let then = block(ctx, &[skipped]);
    then.cast::<BraceStmt>().mark_as_inactive_config_block();
    let else_stmt = block(ctx, &[taken]);
    else_stmt.cast::<BraceStmt>().mark_as_config_block();
    let cond = ctx.ident("DEBUG", sp(16, 21));
    let config = IfConfigStmt::create(
        ctx,
        false,
        sp(12, 15),
        cond,
        then,
        sp(30, 35),
        Some(else_stmt),
        sp(50, 56),
    );
    let root = while_loop(ctx, LabelInfo::NONE, &[config]);

    assert!(resolve_branches(root).is_empty());
    assert!(target_of(skipped).is_none());
    assert!(same(target_of(taken), root));
}

#[test]
fn test_resolving_twice_keeps_targets() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let b = brk(ctx, 20, None);
    let root = while_loop(ctx, LabelInfo::NONE, &[b]);

    assert!(resolve_branches(root).is_empty());
    assert!(resolve_branches(root).is_empty());
    assert!(same(target_of(b), root));
}

#[test]
fn test_errors_are_reported_in_source_order() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    let first = brk(ctx, 20, Some("x"));
    let ok = brk(ctx, 40, None);
    let second = fallthrough(ctx, 60);
    let root = while_loop(ctx, LabelInfo::NONE, &[first, ok, second]);

    let errors = resolve_branches(root);
    let starts: Vec<u32> = errors.iter().map(|e| e.span.start).collect();
    assert_eq!(starts, vec![26, 60]);
    assert!(same(target_of(ok), root));
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_resolved_switch() {
    let bump = Bump::new();
    let ctx = AstContext::new(&bump);
    // switch x { case 1: fallthrough default: break }
    let f = fallthrough(ctx, 19);
    let one = ctx.int(1, sp(16, 17));
    let items = [CaseLabelItem::new(
        false,
        ctx.pattern(PatternKind::Expr(one), sp(16, 17)),
        Span::DUMMY,
        None,
    )];
    let first = CaseStmt::create(
        ctx,
        sp(11, 15),
        &items,
        false,
        sp(17, 18),
        block(ctx, &[f]),
        None,
    );
    let items = [CaseLabelItem::new(
        true,
        ctx.pattern(PatternKind::Any, sp(31, 38)),
        Span::DUMMY,
        None,
    )];
    let b = brk(ctx, 40, None);
    let second = CaseStmt::create(
        ctx,
        sp(31, 38),
        &items,
        false,
        sp(38, 39),
        block(ctx, &[b]),
        None,
    );
    let subject = ctx.ident("x", sp(7, 8));
    let root = SwitchStmt::create(
        ctx,
        LabelInfo::NONE,
        sp(0, 6),
        subject,
        sp(9, 10),
        &[first, second],
        sp(46, 47),
        None,
    );

    assert!(resolve_branches(root).is_empty());
    insta::assert_snapshot!(to_json(root));
}
