//! Line parsers for player input. Every parser takes one trimmed line and
//! produces either the typed value or a retryable [`ActionError`]; positions
//! are one-based on the wire and zero-based in the returned values.

use crate::action::CardLocation;
use crate::card::Tier;
use crate::error::ActionError;
use crate::token::TokenKind;

fn bad(message: impl Into<String>) -> ActionError {
    ActionError::InvalidInputFormat(message.into())
}

fn letters(line: &str) -> Vec<char> {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

fn gem_from(letter: char) -> Result<TokenKind, ActionError> {
    let kind = TokenKind::from_letter(letter)
        .ok_or_else(|| bad(format!("{letter:?} is not a token letter")))?;
    if !kind.is_gem() {
        return Err(bad("the wildcard cannot be picked from the bank"));
    }
    Ok(kind)
}

/// One gem letter: the kind to take two of.
pub fn parse_pick_same(line: &str) -> Result<TokenKind, ActionError> {
    match letters(line)[..] {
        [letter] => gem_from(letter),
        _ => Err(bad("expected one gem letter")),
    }
}

/// Three gem letters, with or without separating spaces.
pub fn parse_pick_different(line: &str) -> Result<[TokenKind; 3], ActionError> {
    match letters(line)[..] {
        [a, b, c] => Ok([gem_from(a)?, gem_from(b)?, gem_from(c)?]),
        _ => Err(bad("expected three gem letters")),
    }
}

fn positive_number(field: &str) -> Result<usize, ActionError> {
    match field.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(bad(format!("{field:?} is not a position number"))),
    }
}

fn tier_from(field: &str) -> Result<Tier, ActionError> {
    let number = positive_number(field)?;
    u8::try_from(number)
        .ok()
        .and_then(Tier::from_number)
        .ok_or(ActionError::InvalidTierOrColumn {
            tier: number,
            column: 0,
        })
}

/// `"<tier> <column>"` for a visible card, or `"R <slot>"` for a reserved one.
pub fn parse_buy(line: &str) -> Result<CardLocation, ActionError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields[..] {
        [slot] if slot.eq_ignore_ascii_case("r") => Err(bad("expected a reserved slot number")),
        [prefix, slot] if prefix.eq_ignore_ascii_case("r") => {
            Ok(CardLocation::Reserved(positive_number(slot)? - 1))
        }
        [tier, column] => Ok(CardLocation::Board {
            tier: tier_from(tier)?,
            column: positive_number(column)? - 1,
        }),
        _ => Err(bad("expected \"tier column\" or \"R slot\"")),
    }
}

/// `"<tier>"` to reserve blind off the stack, `"<tier> <column>"` for a
/// visible card.
pub fn parse_reserve(line: &str) -> Result<(Tier, Option<usize>), ActionError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields[..] {
        [tier] => Ok((tier_from(tier)?, None)),
        [tier, column] => Ok((tier_from(tier)?, Some(positive_number(column)? - 1))),
        _ => Err(bad("expected \"tier\" or \"tier column\"")),
    }
}

/// Exactly `expected` token letters; the wildcard letter is allowed here.
pub fn parse_discard(line: &str, expected: u8) -> Result<Vec<TokenKind>, ActionError> {
    let letters = letters(line);
    if letters.len() != expected as usize {
        return Err(bad(format!(
            "expected {expected} token letters, got {}",
            letters.len()
        )));
    }
    letters
        .into_iter()
        .map(|letter| {
            TokenKind::from_letter(letter)
                .ok_or_else(|| bad(format!("{letter:?} is not a token letter")))
        })
        .collect()
}

/// A single one-based position into a list of choices.
pub fn parse_choice(line: &str, available: usize) -> Result<usize, ActionError> {
    let number = positive_number(line.trim())?;
    if number > available {
        return Err(bad(format!("there are only {available} choices")));
    }
    Ok(number - 1)
}
