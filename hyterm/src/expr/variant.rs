use strum::{Display, EnumIs, EnumIter, FromRepr, IntoStaticStr};

/// Discriminant identifying the constructor of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum ExprType {
    // Constant expr
    Bool,
    Int,
    Symbol,

    // Unary expr
    Not,

    // N-ary expr
    And,
    Or,

    // Binary expr
    Implies,
    Binary,

    // Ternary expr
    Ite,

    // Binders
    Forall,
    Exists,

    // Uninterpreted application
    App,
}

/// Coarse classification of a node used to drive traversals.
///
/// Horn clause bookkeeping only ever needs to tell implications, quantifiers and
/// applications of named symbols apart from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum NodeKind {
    /// `A => B`.
    Implication,
    /// `forall` or `exists`.
    Quantifier,
    /// Application of an uninterpreted named symbol.
    Application,
    /// Anything else.
    Other,
}

impl From<ExprType> for NodeKind {
    fn from(value: ExprType) -> Self {
        match value {
            ExprType::Implies => NodeKind::Implication,
            ExprType::Forall | ExprType::Exists => NodeKind::Quantifier,
            ExprType::App => NodeKind::Application,
            _ => NodeKind::Other,
        }
    }
}

/// Interpreted binary operators of the background theory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Display,
    EnumIs,
    IntoStaticStr,
)]
pub enum BinOp {
    #[strum(serialize = "=")]
    Eq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
}

impl BinOp {
    /// Whether the operator yields a boolean.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Eq | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge
        )
    }
}
