use crate::config::LookupPolicy;
use crate::error_handling::*;
use crate::scanning::{Token, TokenKind};

use indexmap::IndexMap;
use log::debug;
use std::fmt;

#[derive(Clone, Debug)]
pub struct ScalarSymbol {
    pub name: String,
    pub value: Option<i32>,
}

impl ScalarSymbol {
    pub fn new(name: &str) -> Self {
        Self{name: name.into(), value: None}
    }

    pub fn value(&self) -> i32 {
        self.value.unwrap_or(0)
    }
}

impl PartialEq for ScalarSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ScalarSymbol {}

impl fmt::Display for ScalarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value())
    }
}

#[derive(Clone, Debug)]
pub struct ArraySymbol {
    pub name: String,
    pub values: Option<Vec<i32>>,
}

impl ArraySymbol {
    pub fn new(name: &str) -> Self {
        Self{name: name.into(), values: None}
    }

    pub fn len(&self) -> usize {
        self.values.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: i64) -> Option<i32> {
        let index = usize::try_from(index).ok()?;
        self.values.as_ref()?.get(index).copied()
    }
}

impl PartialEq for ArraySymbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ArraySymbol {}

impl fmt::Display for ArraySymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}=[", self.name)?;
        for (i, value) in self.values.iter().flatten().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// An identifier is a run of ASCII letters only.
pub fn is_identifier(token: &Token) -> bool {
    token.kind == TokenKind::word && token.content.chars().all(|c| c.is_ascii_alphabetic())
}

/// True when the identifier at `index` is immediately followed by `[`.
pub fn is_array_reference(tokens: &[Token], index: usize) -> bool {
    is_identifier(&tokens[index]) && tokens.get(index + 1).is_some_and(|next| next.is("["))
}

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    scalars: IndexMap<String, ScalarSymbol>,
    arrays: IndexMap<String, ArraySymbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one symbol per distinct identifier in `tokens`, in order of first appearance.
    pub fn build(tokens: &[Token]) -> Self {
        let mut table = Self::new();
        for index in 0..tokens.len() {
            if !is_identifier(&tokens[index]) {
                continue;
            }
            let name = tokens[index].content.as_str();
            if is_array_reference(tokens, index) {
                if !table.arrays.contains_key(name) {
                    debug!("found array {}", name);
                    table.arrays.insert(name.into(), ArraySymbol::new(name));
                }
            } else if !table.scalars.contains_key(name) {
                debug!("found scalar {}", name);
                table.scalars.insert(name.into(), ScalarSymbol::new(name));
            }
        }
        table
    }

    pub fn scalars(&self) -> impl Iterator<Item = &ScalarSymbol> {
        self.scalars.values()
    }

    pub fn arrays(&self) -> impl Iterator<Item = &ArraySymbol> {
        self.arrays.values()
    }

    pub fn scalar(&self, name: &str) -> Option<&ScalarSymbol> {
        self.scalars.get(name)
    }

    pub fn array(&self, name: &str) -> Option<&ArraySymbol> {
        self.arrays.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scalars.contains_key(name) || self.arrays.contains_key(name)
    }

    /// Overwrites a scalar's value. Returns false when no such scalar was discovered.
    pub fn assign_scalar(&mut self, name: &str, value: i32) -> bool {
        match self.scalars.get_mut(name) {
            Some(symbol) => {
                symbol.value = Some(value);
                true
            },
            None => false,
        }
    }

    /// Gives an array a fresh zeroed backing of `size` slots, then sets each `(index, value)` entry.
    /// Returns false when no such array was discovered.
    pub fn assign_array(&mut self, name: &str, size: usize, entries: &[(usize, i32)]) -> Result<bool> {
        let Some(symbol) = self.arrays.get_mut(name) else {
            return Ok(false);
        };
        let mut values = Vec::new();
        values.try_reserve_exact(size).map_err(|_| CalcError::too_large(size))?;
        values.resize(size, 0);
        for &(index, value) in entries {
            let slot = values.get_mut(index).ok_or_else(|| CalcError::index_out_of_range {
                name: name.into(),
                index: index as i64,
                len: size,
            })?;
            *slot = value;
        }
        symbol.values = Some(values);
        Ok(true)
    }

    pub fn scalar_value(&self, name: &str, policy: LookupPolicy) -> Result<f32> {
        match (self.scalars.get(name).and_then(|symbol| symbol.value), policy) {
            (Some(value), _) => Ok(value as f32),
            (None, LookupPolicy::lenient) => Ok(0.0),
            (None, LookupPolicy::strict) => Err(CalcError::undefined(name.into())),
        }
    }

    pub fn array_value(&self, name: &str, index: i64, policy: LookupPolicy) -> Result<f32> {
        let symbol = self.arrays.get(name).filter(|symbol| symbol.values.is_some());
        match (symbol, policy) {
            (None, LookupPolicy::lenient) => Ok(0.0),
            (None, LookupPolicy::strict) => Err(CalcError::undefined(name.into())),
            (Some(symbol), policy) => match (symbol.get(index), policy) {
                (Some(value), _) => Ok(value as f32),
                (None, LookupPolicy::lenient) => Ok(0.0),
                (None, LookupPolicy::strict) => Err(CalcError::index_out_of_range {
                    name: name.into(),
                    index,
                    len: symbol.len(),
                }),
            },
        }
    }
}
