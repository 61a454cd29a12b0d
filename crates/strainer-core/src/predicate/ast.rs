use crate::value::Value;
use std::fmt;

///
/// Predicate AST
///
/// Tagged, translator-friendly representation of a built criterion.
/// Criterion values are never baked into the tree as literals: each one is
/// captured as a positional `Param`, so a query translator can bind them as
/// parameters instead of inlining constants.
///

///
/// Accessor
///
/// Identity → the row itself is the value under test
/// Field    → a named field read from the row
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Accessor {
    Identity,
    Field(String),
}

impl Accessor {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }
}

impl From<&str> for Accessor {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<String> for Accessor {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("it"),
            Self::Field(name) => f.write_str(name),
        }
    }
}

///
/// Param
///
/// A captured criterion value and the position it was supplied at.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub slot: usize,
    pub value: Value,
}

impl Param {
    #[must_use]
    pub const fn new(slot: usize, value: Value) -> Self {
        Self { slot, value }
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Lt = 0x02,
    Lte = 0x03,
    Gt = 0x04,
    Gte = 0x05,
    Contains = 0x06,
    StartsWith = 0x07,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Contains => "CONTAINS",
            Self::StartsWith => "STARTS WITH",
        }
    }
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub accessor: Accessor,
    pub op: CompareOp,
    pub param: Param,
}

impl ComparePredicate {
    #[must_use]
    pub const fn new(accessor: Accessor, op: CompareOp, param: Param) -> Self {
        Self {
            accessor,
            op,
            param,
        }
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    IsNull { accessor: Accessor },
}

impl Predicate {
    #[must_use]
    pub fn compare(accessor: Accessor, op: CompareOp, param: Param) -> Self {
        Self::Compare(ComparePredicate::new(accessor, op, param))
    }

    /// Conjunction that collapses the trivial cases: no children is `True`,
    /// a single child is returned as is.
    #[must_use]
    pub fn all(mut children: Vec<Self>) -> Self {
        match children.len() {
            0 => Self::True,
            1 => children.remove(0),
            _ => Self::And(children),
        }
    }

    /// Disjunction; a single child is returned as is.
    #[must_use]
    pub fn any(mut children: Vec<Self>) -> Self {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Self::Or(children)
        }
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Captured parameters in tree order.
    #[must_use]
    pub fn params(&self) -> Vec<&Param> {
        let mut out = Vec::new();
        self.collect_params(&mut out);
        out
    }

    fn collect_params<'a>(&'a self, out: &mut Vec<&'a Param>) {
        match self {
            Self::True | Self::IsNull { .. } => {}
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_params(out);
                }
            }
            Self::Not(inner) => inner.collect_params(out),
            Self::Compare(cmp) => out.push(&cmp.param),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::And(children) => write_joined(f, children, " AND "),
            Self::Or(children) => write_joined(f, children, " OR "),
            Self::Not(inner) => write!(f, "NOT {inner}"),
            Self::Compare(cmp) => {
                write!(f, "{} {} ${}", cmp.accessor, cmp.op.symbol(), cmp.param.slot)
            }
            Self::IsNull { accessor } => write!(f, "{accessor} IS NULL"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
    if children.is_empty() {
        // an empty disjunction never holds
        return f.write_str(if sep == " OR " { "FALSE" } else { "TRUE" });
    }

    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}
