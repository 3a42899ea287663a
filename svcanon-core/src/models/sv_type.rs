use std::fmt::{self, Display};

///
/// Canonical SV type of an accepted record.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SvType {
    Del,
    Dup,
    Inv,
    Ins,
    /// Breakend or translocation with a confident BND/TRA tag.
    Bnd,
    /// Type text that could not be canonicalized; carries the raw allele text.
    Literal(String),
    /// Breakend notation without any type tag.
    Unresolved,
}

impl SvType {
    pub fn as_str(&self) -> &str {
        match self {
            SvType::Del => "DEL",
            SvType::Dup => "DUP",
            SvType::Inv => "INV",
            SvType::Ins => "INS",
            SvType::Bnd => "BND",
            SvType::Literal(text) => text,
            SvType::Unresolved => "",
        }
    }
}

impl Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
