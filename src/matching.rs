use crate::config::BracketRule;
use crate::error_handling::*;
use crate::scanning::Token;

fn closer_for(opener: char) -> Option<char> {
    match opener {
        '(' => Some(')'),
        '[' => Some(']'),
        _ => None,
    }
}

fn is_closer(character: char) -> bool {
    matches!(character, ')' | ']')
}

/// Matched bracket positions: `closing[i]` closes the bracket opened at `opening[i]`.
/// Openers are listed in the order they appear in the text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BracketIndex {
    pub opening: Vec<usize>,
    pub closing: Vec<usize>,
}

impl BracketIndex {
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.opening.iter().copied().zip(self.closing.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.opening.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opening.is_empty()
    }
}

/// Scans `text` once and pairs its brackets, or returns `None` when they are not legally matched.
pub fn match_brackets(text: &str, rule: BracketRule) -> Option<BracketIndex> {
    match rule {
        BracketRule::nested => match_nested(text),
        BracketRule::positional => match_positional(text),
    }
}

fn match_nested(text: &str) -> Option<BracketIndex> {
    let mut opening = Vec::new();
    let mut closing = Vec::<Option<usize>>::new();
    let mut open = Vec::<(usize, char)>::new();

    for (position, character) in text.char_indices() {
        if closer_for(character).is_some() {
            open.push((opening.len(), character));
            opening.push(position);
            closing.push(None);
        } else if is_closer(character) {
            let (slot, opener) = open.pop()?;
            if closer_for(opener) != Some(character) {
                return None;
            }
            closing[slot] = Some(position);
        }
    }

    if !open.is_empty() {
        return None;
    }
    let closing = closing.into_iter().collect::<Option<Vec<usize>>>()?;
    Some(BracketIndex{opening, closing})
}

fn match_positional(text: &str) -> Option<BracketIndex> {
    let mut index = BracketIndex::default();
    let mut openers = Vec::new();
    let mut closers = Vec::new();

    for (position, character) in text.char_indices() {
        if closer_for(character).is_some() {
            index.opening.push(position);
            openers.push(character);
        } else if is_closer(character) {
            index.closing.push(position);
            closers.push(character);
        }
    }

    if openers.len() != closers.len() {
        return None;
    }
    let mut paired = openers.into_iter().zip(closers);
    if paired.all(|(opener, closer)| closer_for(opener) == Some(closer)) {
        Some(index)
    } else {
        None
    }
}

/// Finds the token that balances the opener at `open_at`, counting only brackets of the same family.
pub fn find_closing(tokens: &[Token], open_at: usize) -> Result<usize> {
    let opener = tokens[open_at].content.as_str();
    let closer = match opener {
        "(" => ")",
        "[" => "]",
        _ => return Err(CalcError::did_not_expect(opener.into())),
    };

    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open_at) {
        if token.is(opener) {
            depth += 1;
        } else if token.is(closer) {
            depth -= 1;
            if depth == 0 {
                return Ok(index);
            }
        }
    }
    Err(CalcError::could_not_find(closer.into()))
}
