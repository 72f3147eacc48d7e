pub mod children;
pub mod cond;
pub mod container;
pub mod context;
pub mod expr;
pub mod jump;
pub mod kind;
pub mod label;
pub mod loops;
pub mod span;
pub mod stmt;
pub mod visitor;

pub use children::{Child, ChildSlot};
pub use cond::{IfConfigStmt, IfStmt, StmtCondition};
pub use container::{AstNode, BraceStmt, CaseLabelItem, CaseStmt, ConfigBlockState, SwitchStmt};
pub use context::AstContext;
pub use expr::*;
pub use jump::{BreakStmt, ContinueStmt, FallthroughStmt, ReturnStmt};
pub use kind::StmtTag;
pub use label::{BranchTarget, LabelInfo, TargetSlot};
pub use loops::{DoWhileStmt, ForClauses, ForEachStmt, ForStmt, WhileStmt};
pub use span::Span;
pub use stmt::{Stmt, StmtKind, StmtNode};
