//! Diagnostics reported by the branch resolution pass.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};
use swiftlet_ast::Span;
use thiserror::Error;

/// A control transfer that could not be linked to a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub span: Span,
}

impl ResolveError {
    pub fn unmatched_label(label: &str, span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::UnmatchedLabel {
                label: label.to_string(),
            },
            span,
        }
    }

    pub fn break_outside_loop(span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::BreakOutsideLoop,
            span,
        }
    }

    pub fn continue_outside_loop(span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::ContinueOutsideLoop,
            span,
        }
    }

    pub fn continue_not_loop(label: &str, span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::ContinueNotLoop {
                label: label.to_string(),
            },
            span,
        }
    }

    pub fn fallthrough_outside_switch(span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::FallthroughOutsideSwitch,
            span,
        }
    }

    pub fn fallthrough_from_last_case(span: Span) -> Self {
        Self {
            kind: ResolveErrorKind::FallthroughFromLastCase,
            span,
        }
    }

    pub fn fallthrough_into_binding_case(span: Span, case_loc: Span) -> Self {
        Self {
            kind: ResolveErrorKind::FallthroughIntoBindingCase { case_loc },
            span,
        }
    }
}

/// The kind of resolution error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveErrorKind {
    #[error("use of unresolved label `{label}`")]
    #[diagnostic(code(swiftlet::resolve::unmatched_label))]
    UnmatchedLabel { label: String },

    #[error("`break` is only allowed inside a loop or switch")]
    #[diagnostic(code(swiftlet::resolve::break_outside_loop))]
    BreakOutsideLoop,

    #[error("`continue` is only allowed inside a loop")]
    #[diagnostic(code(swiftlet::resolve::continue_outside_loop))]
    ContinueOutsideLoop,

    #[error("`continue` cannot be used with switch label `{label}`")]
    #[diagnostic(
        code(swiftlet::resolve::continue_not_loop),
        help("use `break` to leave the switch")
    )]
    ContinueNotLoop { label: String },

    #[error("`fallthrough` is only allowed inside a switch")]
    #[diagnostic(code(swiftlet::resolve::fallthrough_outside_switch))]
    FallthroughOutsideSwitch,

    #[error("`fallthrough` without a following `case` or `default` block")]
    #[diagnostic(code(swiftlet::resolve::fallthrough_from_last_case))]
    FallthroughFromLastCase,

    #[error("`fallthrough` cannot transfer control to a case label that declares variables")]
    #[diagnostic(code(swiftlet::resolve::fallthrough_into_binding_case))]
    FallthroughIntoBindingCase { case_loc: Span },
}

fn source_span(span: Span) -> std::ops::Range<usize> {
    span.start as usize..span.end as usize
}

impl Diagnostic for ResolveError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let mut labels = vec![LabeledSpan::at(source_span(self.span), "here")];
        if let ResolveErrorKind::FallthroughIntoBindingCase { case_loc } = self.kind {
            labels.push(LabeledSpan::at(source_span(case_loc), "this case binds variables"));
        }
        Some(Box::new(labels.into_iter()))
    }
}
