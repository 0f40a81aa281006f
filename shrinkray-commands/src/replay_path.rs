//! Compact text encoding of which commands ran.
//!
//! A replay path is a run-length encoded list of booleans written as
//! `"<counts>:<changes>"`. Both halves use the base64 alphabet
//! `A-Z a-z 0-9 + /`. Each count character holds `run_length - 1` for one run
//! (runs are capped at 64), and each change character packs the values of six
//! consecutive runs, first run in the lowest bit.

use crate::error::ReplayPathError;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const MAX_RUN: usize = 64;
const RUNS_PER_CHANGE: usize = 6;

fn encode(value: usize) -> char {
    char::from(ALPHABET[value])
}

fn decode(character: char, position: usize) -> Result<usize, ReplayPathError> {
    let value = match character {
        'A'..='Z' => character as usize - 'A' as usize,
        'a'..='z' => character as usize - 'a' as usize + 26,
        '0'..='9' => character as usize - '0' as usize + 52,
        '+' => 62,
        '/' => 63,
        _ => {
            return Err(ReplayPathError::InvalidCharacter {
                character,
                position,
            });
        }
    };
    Ok(value)
}

fn runs(path: &[bool]) -> Vec<(bool, usize)> {
    let mut runs: Vec<(bool, usize)> = Vec::new();
    for &value in path {
        match runs.last_mut() {
            Some((last, count)) if *last == value && *count < MAX_RUN => *count += 1,
            _ => runs.push((value, 1)),
        }
    }
    runs
}

/// Encode a replay path
pub fn stringify(path: &[bool]) -> String {
    let runs = runs(path);
    let counts: String = runs.iter().map(|&(_, count)| encode(count - 1)).collect();
    let changes: String = runs
        .chunks(RUNS_PER_CHANGE)
        .map(|group| {
            let bits = group
                .iter()
                .enumerate()
                .filter(|(_, (value, _))| *value)
                .fold(0, |acc, (bit, _)| acc | (1 << bit));
            encode(bits)
        })
        .collect();
    format!("{}:{}", counts, changes)
}

/// Decode a replay path produced by [`stringify`]
///
/// Change characters beyond the ones needed for the encoded runs are ignored.
pub fn parse(encoded: &str) -> Result<Vec<bool>, ReplayPathError> {
    let (counts, changes) = encoded
        .split_once(':')
        .ok_or(ReplayPathError::MissingSeparator)?;

    let counts = counts
        .chars()
        .enumerate()
        .map(|(position, c)| decode(c, position).map(|v| v + 1))
        .collect::<Result<Vec<_>, _>>()?;
    let offset = counts.len() + 1;
    let changes = changes
        .chars()
        .enumerate()
        .map(|(position, c)| decode(c, offset + position))
        .collect::<Result<Vec<_>, _>>()?;

    if changes.len() * RUNS_PER_CHANGE < counts.len() {
        return Err(ReplayPathError::TruncatedChanges {
            runs: counts.len(),
            characters: changes.len(),
        });
    }

    let mut path = Vec::with_capacity(counts.iter().sum());
    for (run, &count) in counts.iter().enumerate() {
        let bits = changes[run / RUNS_PER_CHANGE];
        let value = (bits >> (run % RUNS_PER_CHANGE)) & 1 == 1;
        path.extend(std::iter::repeat_n(value, count));
    }
    Ok(path)
}
