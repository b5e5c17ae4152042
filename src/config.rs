/// What a lookup does when a name was never bound or a subscript falls outside the array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Read zero.
    #[default]
    lenient,
    /// Fail with `undefined` or `index_out_of_range`.
    strict,
}

/// How opening brackets are paired with closing ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BracketRule {
    /// Each closer pairs with the nearest unclosed opener.
    #[default]
    nested,
    /// The i-th opener pairs with the i-th closer in scan order. Accepts `([)]` and
    /// rejects mixed nestings such as `(A[1])`.
    positional,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    pub lookup: LookupPolicy,
    pub brackets: BracketRule,
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self{lookup: LookupPolicy::default(), brackets: BracketRule::default(), max_depth: 256}
    }
}

impl EvalConfig {
    pub fn with_lookup(mut self, lookup: LookupPolicy) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn with_brackets(mut self, brackets: BracketRule) -> Self {
        self.brackets = brackets;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
