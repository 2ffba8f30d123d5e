// This file is part of zash, a POSIX-compatible shell.
// Copyright (C) 2026 The zash authors

//! AST parser

use super::*;

/// Converts the last three items into a range if applicable.
///
/// A `-` between two atoms forms a range. A `-` at the start or end of the
/// bracket expression stays a literal.
fn make_range(items: &mut Vec<BracketItem>) -> Result<(), Error> {
    use BracketAtom::*;
    use BracketItem::*;

    if items.len() < 3 {
        return Ok(());
    }
    let end = items.len();
    if let [Atom(_), Atom(Char('-')), Atom(_)] = &items[end - 3..] {
        let Some(Atom(last)) = items.pop() else {
            unreachable!("range end must be an atom")
        };
        items.pop();
        let Some(Atom(first)) = items.pop() else {
            unreachable!("range start must be an atom")
        };
        let (Char(start), Char(end)) = (&first, &last);
        if start > end {
            return Err(Error::ReversedRange);
        }
        items.push(Range(first..=last));
    }
    Ok(())
}

impl Bracket {
    /// Parses a bracket expression (except the initial `[`).
    ///
    /// If successful, returns the result as well as an iterator that yields
    /// characters following the bracket expression. Returns `Ok(None)` if a
    /// bracket expression is not found, in which case the initial `[` should
    /// be treated as a literal character.
    fn parse<I>(mut i: I) -> Result<Option<(Self, I)>, Error>
    where
        I: Iterator<Item = PatternChar> + Clone,
    {
        use BracketAtom::*;
        use BracketItem::*;

        let mut bracket = Bracket {
            complement: false,
            items: Vec::new(),
        };
        while let Some(pc) = i.next() {
            match pc {
                PatternChar::Normal(']') if !bracket.items.is_empty() => {
                    return Ok(Some((bracket, i)));
                }
                PatternChar::Normal('!' | '^')
                    if !bracket.complement && bracket.items.is_empty() =>
                {
                    bracket.complement = true;
                }
                pc => {
                    bracket.items.push(Atom(Char(pc.char_value())));
                    make_range(&mut bracket.items)?;
                }
            }
        }
        // The bracket expression is not closed. The `[` is literal.
        Ok(None)
    }
}

/// Parses a whole pattern.
pub(super) fn parse<I>(mut i: I) -> Result<Ast, Error>
where
    I: Iterator<Item = PatternChar> + Clone,
{
    let mut atoms = Vec::new();
    while let Some(pc) = i.next() {
        atoms.push(match pc {
            PatternChar::Normal('?') => Atom::AnyChar,
            PatternChar::Normal('*') => Atom::AnyString,
            PatternChar::Normal('[') => match Bracket::parse(i.clone())? {
                Some((bracket, rest)) => {
                    i = rest;
                    Atom::Bracket(bracket)
                }
                None => Atom::Char('['),
            },
            pc => Atom::Char(pc.char_value()),
        });
    }
    Ok(Ast { atoms })
}
