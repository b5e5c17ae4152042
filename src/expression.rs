use crate::binding;
use crate::config::EvalConfig;
use crate::error_handling::*;
use crate::evaluating::Evaluator;
use crate::matching::{match_brackets, BracketIndex};
use crate::scanning::tokenize;
use crate::symbols::*;

use std::io::BufRead;

/// An expression text together with what has been derived from it so far.
///
/// The usual order is [`is_legally_matched`](Self::is_legally_matched),
/// [`build_symbols`](Self::build_symbols), [`load_symbol_values`](Self::load_symbol_values),
/// then [`evaluate`](Self::evaluate) as many times as needed.
#[derive(Clone, Debug)]
pub struct Expression {
    text: String,
    config: EvalConfig,
    symbols: Option<SymbolTable>,
    brackets: Option<BracketIndex>,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_config(text, EvalConfig::default())
    }

    pub fn with_config(text: impl Into<String>, config: EvalConfig) -> Self {
        Self{text: text.into(), config, symbols: None, brackets: None}
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Checks that every bracket is closed by one of its own kind and keeps the pairing on success.
    pub fn is_legally_matched(&mut self) -> bool {
        self.brackets = match_brackets(&self.text, self.config.brackets);
        self.brackets.is_some()
    }

    pub fn bracket_index(&self) -> Option<&BracketIndex> {
        self.brackets.as_ref()
    }

    /// Discovers the scalar and array names in the text. Later calls keep the first table.
    pub fn build_symbols(&mut self) -> &mut SymbolTable {
        let text = &self.text;
        self.symbols.get_or_insert_with(|| SymbolTable::build(&tokenize(text)))
    }

    pub fn symbols(&self) -> Option<&SymbolTable> {
        self.symbols.as_ref()
    }

    pub fn scalars(&self) -> impl Iterator<Item = &ScalarSymbol> {
        self.symbols.iter().flat_map(SymbolTable::scalars)
    }

    pub fn arrays(&self) -> impl Iterator<Item = &ArraySymbol> {
        self.symbols.iter().flat_map(SymbolTable::arrays)
    }

    /// Reads `name value` and `name size (index,value)...` lines into the discovered symbols.
    pub fn load_symbol_values<R: BufRead>(&mut self, reader: R) -> Result<()> {
        binding::load_symbol_values(self.build_symbols(), reader)
    }

    /// Evaluates the whole text. Fails with `unbalanced_brackets` before touching any token
    /// when the brackets do not match.
    pub fn evaluate(&self) -> Result<f32> {
        if self.brackets.is_none() && match_brackets(&self.text, self.config.brackets).is_none() {
            return Err(CalcError::unbalanced_brackets);
        }
        let empty = SymbolTable::new();
        let symbols = self.symbols.as_ref().unwrap_or(&empty);
        Evaluator::new(symbols, &self.config).evaluate(&tokenize(&self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BracketRule, LookupPolicy};

    #[test]
    fn lifecycle() {
        let mut expression = Expression::new("a - A[b] * 2");
        assert!(expression.symbols().is_none());
        assert!(expression.is_legally_matched());
        assert_eq!(expression.bracket_index().unwrap().pairs().collect::<Vec<_>>(), vec![(5, 7)]);

        expression.build_symbols();
        expression.load_symbol_values("a 20\nb 1\nA 2 (1,3)".as_bytes()).unwrap();
        assert_eq!(expression.evaluate().unwrap(), 14.0);
    }

    #[test]
    fn building_twice_keeps_bound_values() {
        let mut expression = Expression::new("x");
        expression.build_symbols().assign_scalar("x", 9);
        expression.build_symbols();
        assert_eq!(expression.scalars().count(), 1);
        assert_eq!(expression.evaluate().unwrap(), 9.0);
    }

    #[test]
    fn loading_builds_symbols_on_demand() {
        let mut expression = Expression::new("x + 1");
        expression.load_symbol_values("x 4".as_bytes()).unwrap();
        assert_eq!(expression.evaluate().unwrap(), 5.0);
    }

    #[test]
    fn unbuilt_symbols_read_as_zero() {
        assert_eq!(Expression::new("x + 1").evaluate().unwrap(), 1.0);
        let strict = EvalConfig::default().with_lookup(LookupPolicy::strict);
        assert!(matches!(
            Expression::with_config("x + 1", strict).evaluate(),
            Err(CalcError::undefined(_))
        ));
    }

    #[test]
    fn illegal_brackets_are_refused() {
        let mut expression = Expression::new("(1+2");
        assert!(!expression.is_legally_matched());
        assert!(expression.bracket_index().is_none());
        assert!(matches!(expression.evaluate(), Err(CalcError::unbalanced_brackets)));
    }

    #[test]
    fn positional_rule_is_configurable() {
        let positional = EvalConfig::default().with_brackets(BracketRule::positional);
        let mut expression = Expression::with_config("(A[1])", positional);
        assert!(!expression.is_legally_matched());
        assert!(Expression::new("(A[1])").is_legally_matched());
    }

    #[test]
    fn dumps_list_symbols_in_discovery_order() {
        let mut expression = Expression::new("b + A[a] + a + B[1]");
        expression.load_symbol_values("a 1\nA 2 (1,5)".as_bytes()).unwrap();
        let scalars: Vec<String> = expression.scalars().map(ToString::to_string).collect();
        let arrays: Vec<String> = expression.arrays().map(ToString::to_string).collect();
        assert_eq!(scalars, vec!["b=0", "a=1"]);
        assert_eq!(arrays, vec!["A=[0,5]", "B=[]"]);
    }
}
