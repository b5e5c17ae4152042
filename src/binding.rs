use crate::error_handling::*;
use crate::symbols::SymbolTable;

use log::{debug, trace};
use std::io::BufRead;

fn is_pair_separator(character: char) -> bool {
    matches!(character, ' ' | '\t' | '(' | ',' | ')')
}

fn parse_field<T: std::str::FromStr>(field: &str) -> Result<T> {
    field.parse().map_err(|_| CalcError::invalid_number(field.into()))
}

/// Reads `(index,value)` pairs out of the text after the declared size.
/// Parentheses, commas and whitespace only separate numbers.
fn parse_entries(rest: &str) -> Result<Vec<(usize, i32)>> {
    let mut numbers = rest.split(is_pair_separator).filter(|field| !field.is_empty());
    let mut entries = Vec::new();
    while let Some(index) = numbers.next() {
        let value = numbers.next().ok_or_else(|| CalcError::missing_field(index.into()))?;
        entries.push((parse_field(index)?, parse_field(value)?));
    }
    Ok(entries)
}

/// Applies one assignment line. Lines naming no discovered symbol are skipped.
pub fn bind_line(table: &mut SymbolTable, line: &str) -> Result<()> {
    let line = line.trim();
    let mut fields = line.split_whitespace();
    let Some(name) = fields.next() else {
        return Ok(());
    };
    if !table.contains(name) {
        debug!("skipping values for unknown symbol {}", name);
        return Ok(());
    }
    let Some(second) = fields.next() else {
        return Err(CalcError::abrupt_end);
    };
    let is_scalar_line = fields.next().is_none();

    if is_scalar_line && table.scalar(name).is_some() {
        let value = parse_field(second)?;
        trace!("{} = {}", name, value);
        table.assign_scalar(name, value);
        return Ok(());
    }
    if table.array(name).is_none() {
        return Err(CalcError::kind_mismatch(name.into()));
    }

    let size = parse_field(second)?;
    let rest = line[name.len()..].trim_start()[second.len()..].trim_start();
    let entries = parse_entries(rest)?;
    trace!("{}[{}] = {:?}", name, size, entries);
    table.assign_array(name, size, &entries)?;
    Ok(())
}

/// Binds every line of `reader`. The first bad line aborts the load with its line number.
pub fn load_symbol_values<R: BufRead>(table: &mut SymbolTable, reader: R) -> Result<()> {
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        bind_line(table, &line).map_err(|error| CalcError::assignment {
            line: number + 1,
            source: Box::new(error),
        })?;
    }
    Ok(())
}
