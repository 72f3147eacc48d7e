use serde::Serialize;

/// Discriminant of every statement variant.
///
/// The declaration order is significant: related variants occupy contiguous
/// ranges so that category membership is a pair of comparisons. Loops sit
/// inside the label-bearing range, which additionally ends with `Switch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum StmtTag {
    Brace,
    Return,
    Break,
    Continue,
    Fallthrough,
    If,
    IfConfig,
    Case,
    While,
    DoWhile,
    For,
    ForEach,
    Switch,
}

impl StmtTag {
    pub const FIRST_LABELED: StmtTag = StmtTag::While;
    pub const LAST_LABELED: StmtTag = StmtTag::Switch;

    pub const FIRST_LOOP: StmtTag = StmtTag::While;
    pub const LAST_LOOP: StmtTag = StmtTag::ForEach;

    pub const ALL: [StmtTag; 13] = [
        StmtTag::Brace,
        StmtTag::Return,
        StmtTag::Break,
        StmtTag::Continue,
        StmtTag::Fallthrough,
        StmtTag::If,
        StmtTag::IfConfig,
        StmtTag::Case,
        StmtTag::While,
        StmtTag::DoWhile,
        StmtTag::For,
        StmtTag::ForEach,
        StmtTag::Switch,
    ];

    /// Loops and `switch`: statements a `break` can target by label.
    #[inline]
    pub fn is_labeled(self) -> bool {
        self >= Self::FIRST_LABELED && self <= Self::LAST_LABELED
    }

    /// Statements a `continue` can target.
    #[inline]
    pub fn is_loop(self) -> bool {
        self >= Self::FIRST_LOOP && self <= Self::LAST_LOOP
    }

    /// Statements that transfer control elsewhere in the function.
    pub fn is_branch_transfer(self) -> bool {
        matches!(
            self,
            StmtTag::Return | StmtTag::Break | StmtTag::Continue | StmtTag::Fallthrough
        )
    }

    /// Debugging name of the statement kind. Not meant for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            StmtTag::Brace => "BraceStmt",
            StmtTag::Return => "ReturnStmt",
            StmtTag::Break => "BreakStmt",
            StmtTag::Continue => "ContinueStmt",
            StmtTag::Fallthrough => "FallthroughStmt",
            StmtTag::If => "IfStmt",
            StmtTag::IfConfig => "IfConfigStmt",
            StmtTag::Case => "CaseStmt",
            StmtTag::While => "WhileStmt",
            StmtTag::DoWhile => "DoWhileStmt",
            StmtTag::For => "ForStmt",
            StmtTag::ForEach => "ForEachStmt",
            StmtTag::Switch => "SwitchStmt",
        }
    }
}

impl std::fmt::Display for StmtTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
