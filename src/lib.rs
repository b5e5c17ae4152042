#![allow(nonstandard_style)]

pub mod binding;
pub mod config;
pub mod error_handling;
pub mod evaluating;
pub mod expression;
pub mod matching;
pub mod scanning;
pub mod symbols;

pub use config::{BracketRule, EvalConfig, LookupPolicy};
pub use error_handling::{CalcError, Result};
pub use evaluating::evaluate;
pub use expression::Expression;
pub use symbols::{ArraySymbol, ScalarSymbol, SymbolTable};
