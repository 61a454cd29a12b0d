mod ast;
mod eval;


pub use ast::{Accessor, CompareOp, ComparePredicate, Param, Predicate};
pub use eval::{FieldPresence, FnRow, Row, eval};
