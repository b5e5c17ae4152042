use crate::config::EvalConfig;
use crate::error_handling::*;
use crate::matching::find_closing;
use crate::scanning::*;
use crate::symbols::*;

use log::{debug, trace};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
}

impl BinaryOperator {
    /// Division multiplies by the reciprocal and subtraction adds the negation,
    /// so results match the fold order bit for bit.
    pub fn call(&self, left: f32, right: f32) -> f32 {
        use BinaryOperator::*;

        match self {
            addition => right + left,
            subtraction => (0.0 - right) + left,
            multiplication => right * left,
            division => (1.0 / right) * left,
        }
    }

    fn is_eager(&self) -> bool {
        matches!(self, BinaryOperator::multiplication | BinaryOperator::division)
    }
}

impl FromStr for BinaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "*" => Ok(multiplication),
            "/" => Ok(division),
            _ => Err(CalcError::invalid_operator(s.into())),
        }
    }
}

/// A literal is all digits, or any word containing a decimal point.
pub fn is_number(token: &Token) -> bool {
    let content = token.content.as_str();
    token.kind == TokenKind::word
        && (content.contains('.') || (!content.is_empty() && content.chars().all(|c| c.is_ascii_digit())))
}

/// Operator and operand stacks for one (sub)expression.
pub struct Stacks {
    operators: Vec<BinaryOperator>,
    operands: Vec<f32>,
}

impl Stacks {
    pub fn new() -> Self {
        Self{operators: Vec::new(), operands: Vec::new()}
    }

    fn pop_operand(&mut self) -> Result<f32> {
        self.operands.pop().ok_or(CalcError::abrupt_end)
    }

    pub fn add_operand(&mut self, value: f32) {
        self.operands.push(value);
    }

    /// Replaces the top two operands with `left operator right`.
    fn fold(&mut self, operator: BinaryOperator) -> Result<()> {
        let right = self.pop_operand()?;
        let left = self.pop_operand()?;
        let value = operator.call(left, right);
        trace!("fold {} {:?} {} = {}", left, operator, right, value);
        self.operands.push(value);
        Ok(())
    }

    /// A pending `*` or `/` on top is folded at once and the incoming operator takes its place.
    /// Anything else is deferred to `finish`.
    pub fn add_operator(&mut self, operator: BinaryOperator) -> Result<()> {
        match self.operators.last().copied() {
            Some(pending) if pending.is_eager() => {
                self.fold(pending)?;
                self.operators.pop();
                self.operators.push(operator);
            },
            _ => self.operators.push(operator),
        }
        Ok(())
    }

    /// Folds `operator` over the two operands beneath the top one, leaving the top operand in place.
    fn fold_beneath(&mut self, operator: BinaryOperator) -> Result<()> {
        let held = self.pop_operand()?;
        self.fold(operator)?;
        self.operands.push(held);
        Ok(())
    }

    /// Drains the operator stack and returns the single remaining operand.
    pub fn finish(mut self) -> Result<f32> {
        use BinaryOperator::*;

        while let Some(top) = self.operators.pop() {
            match top {
                multiplication | division | addition => {
                    let partner = match top {
                        addition => subtraction,
                        _ => division,
                    };
                    if self.operators.last() == Some(&partner) {
                        self.fold_beneath(partner)?;
                        self.operators.pop();
                        self.operators.push(top);
                    } else {
                        self.fold(top)?;
                    }
                },
                subtraction => self.fold(subtraction)?,
            }
        }

        let result = self.pop_operand()?;
        match self.operands.pop() {
            Some(extra) => Err(CalcError::did_not_expect(extra.to_string())),
            None => Ok(result),
        }
    }
}

pub struct Evaluator<'a> {
    symbols: &'a SymbolTable,
    config: &'a EvalConfig,
}

impl<'a> Evaluator<'a> {
    pub fn new(symbols: &'a SymbolTable, config: &'a EvalConfig) -> Self {
        Self{symbols, config}
    }

    pub fn evaluate(&self, tokens: &[Token]) -> Result<f32> {
        self.evaluate_group(tokens, 0)
    }

    /// Finds the group opened at `open`, evaluates its interior with fresh stacks,
    /// and returns the value with the index of the closing token.
    fn evaluate_bracketed(&self, tokens: &[Token], open: usize, depth: usize) -> Result<(f32, usize)> {
        let close = find_closing(tokens, open)?;
        let value = self.evaluate_group(&tokens[open + 1..close], depth + 1)?;
        Ok((value, close))
    }

    fn evaluate_group(&self, tokens: &[Token], depth: usize) -> Result<f32> {
        if depth > self.config.max_depth {
            return Err(CalcError::too_deep(self.config.max_depth));
        }

        let mut stacks = Stacks::new();
        let mut is_edge = true;
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];
            if token.kind == TokenKind::whitespace {
                index += 1;
                continue;
            }
            if is_edge {
                let value: f32 = match token.kind {
                    TokenKind::word if is_number(token) => token.content
                        .parse()
                        .map_err(|_| CalcError::invalid_number(token.content.clone()))?,
                    TokenKind::word if is_array_reference(tokens, index) => {
                        let (subscript, close) = self.evaluate_bracketed(tokens, index + 1, depth)?;
                        index = close;
                        self.symbols.array_value(&token.content, subscript as i64, self.config.lookup)?
                    },
                    TokenKind::word if is_identifier(token) => {
                        self.symbols.scalar_value(&token.content, self.config.lookup)?
                    },
                    TokenKind::word => return Err(CalcError::invalid_token(token.content.clone())),
                    TokenKind::punctuation if token.is("(") => {
                        let (value, close) = self.evaluate_bracketed(tokens, index, depth)?;
                        index = close;
                        value
                    },
                    TokenKind::operator => return Err(CalcError::invalid_operator(token.content.clone())),
                    _ => return Err(CalcError::did_not_expect(token.content.clone())),
                };
                stacks.add_operand(value);
                is_edge = false;
            } else {
                match token.kind {
                    TokenKind::operator => stacks.add_operator(token.content.parse()?)?,
                    _ => return Err(CalcError::did_not_expect(token.content.clone())),
                }
                is_edge = true;
            }
            index += 1;
        }

        if is_edge {
            return Err(CalcError::abrupt_end);
        }
        let result = stacks.finish()?;
        debug!("depth {} evaluated to {}", depth, result);
        Ok(result)
    }
}

/// Tokenizes `expression` and evaluates it against `symbols`.
pub fn evaluate(expression: &str, symbols: &SymbolTable, config: &EvalConfig) -> Result<f32> {
    Evaluator::new(symbols, config).evaluate(&tokenize(expression))
}
