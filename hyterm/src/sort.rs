use strum::EnumIs;

/// Sort of a quantified variable.
///
/// Sorts are carried by binders only; the expression language itself is untyped and
/// well-sortedness is left to the producer of the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs)]
pub enum Sort {
    /// Booleans.
    Bool,
    /// Mathematical integers.
    Int,
    /// Fixed-width bit-vectors.
    BitVec(u32),
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sort::Bool => f.write_str("Bool"),
            Sort::Int => f.write_str("Int"),
            Sort::BitVec(width) => write!(f, "BitVec<{}>", width),
        }
    }
}
