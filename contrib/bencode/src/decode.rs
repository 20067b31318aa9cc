use std::str;

use crate::error::{BencodeParseError, BencodeParseErrorKind, BencodeParseResult};
use crate::value::{Dictionary, Value};

/// Maximum nesting depth accepted for lists and dictionaries.
pub const MAX_RECURSION: usize = 50;

/// Decodes the first bencoded value found in `bytes`.
///
/// Bytes after the root value are ignored.
///
/// # Errors
///
/// Will return an error if the input ends where a token is expected, if an
/// unknown leading byte is found, if a string declares more bytes than are
/// left, or if an integer, list or dictionary is not terminated.
pub fn decode(bytes: &[u8]) -> BencodeParseResult<Value> {
    let (value, _) = decode_value(bytes, 0, 0)?;
    Ok(value)
}

fn decode_value(bytes: &[u8], pos: usize, depth: usize) -> BencodeParseResult<(Value, usize)> {
    if depth >= MAX_RECURSION {
        return Err(BencodeParseError::from_kind(
            BencodeParseErrorKind::InvalidRecursionExceeded { pos, max: MAX_RECURSION },
        ));
    }

    match peek_byte(bytes, pos)? {
        crate::INT_START => {
            let (n, next_pos) = decode_int(bytes, pos + 1, crate::BEN_END)?;
            Ok((Value::Int(n), next_pos))
        }
        crate::LIST_START => {
            let (list, next_pos) = decode_list(bytes, pos + 1, depth)?;
            Ok((Value::List(list), next_pos))
        }
        crate::DICT_START => {
            let (dict, next_pos) = decode_dict(bytes, pos + 1, depth)?;
            Ok((Value::Dict(dict), next_pos))
        }
        crate::BYTE_LEN_LOW..=crate::BYTE_LEN_HIGH => {
            let (string, next_pos) = decode_bytes(bytes, pos)?;
            Ok((Value::Bytes(string.to_vec()), next_pos))
        }
        _ => Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidByte { pos })),
    }
}

fn decode_int(bytes: &[u8], pos: usize, delim: u8) -> BencodeParseResult<(i64, usize)> {
    let begin_decode = bytes.get(pos..).unwrap_or_default();

    let Some(relative_end_pos) = begin_decode.iter().position(|n| *n == delim) else {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntNoDelimiter {
            pos,
        }));
    };

    let Ok(int_str) = str::from_utf8(&begin_decode[..relative_end_pos]) else {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntParseError {
            pos,
        }));
    };

    let next_pos = pos + relative_end_pos + 1;

    // Only a leading `-` is allowed, `str::parse` also takes a `+`.
    match int_str.parse::<i64>() {
        Ok(n) if !int_str.starts_with('+') => Ok((n, next_pos)),
        _ => Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidIntParseError {
            pos,
        })),
    }
}

fn decode_bytes(bytes: &[u8], pos: usize) -> BencodeParseResult<(&[u8], usize)> {
    let (num_bytes, start_pos) = decode_int(bytes, pos, crate::BYTE_LEN_END)?;

    let Ok(num_bytes) = usize::try_from(num_bytes) else {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidLengthNegative {
            pos,
        }));
    };

    if num_bytes > bytes.len().saturating_sub(start_pos) {
        return Err(BencodeParseError::from_kind(BencodeParseErrorKind::InvalidLengthOverflow {
            pos,
        }));
    }

    let next_pos = start_pos + num_bytes;
    Ok((&bytes[start_pos..next_pos], next_pos))
}

fn decode_list(bytes: &[u8], pos: usize, depth: usize) -> BencodeParseResult<(Vec<Value>, usize)> {
    let mut list = Vec::new();

    let mut curr_pos = pos;

    while peek_terminator(bytes, curr_pos, pos)? != crate::BEN_END {
        let (value, next_pos) = decode_value(bytes, curr_pos, depth + 1)?;

        list.push(value);

        curr_pos = next_pos;
    }

    Ok((list, curr_pos + 1))
}

fn decode_dict(bytes: &[u8], pos: usize, depth: usize) -> BencodeParseResult<(Dictionary, usize)> {
    let mut dict = Dictionary::new();

    let mut curr_pos = pos;

    while peek_terminator(bytes, curr_pos, pos)? != crate::BEN_END {
        let (key, next_pos) = decode_bytes(bytes, curr_pos)?;

        let (value, next_pos) = decode_value(bytes, next_pos, depth + 1)?;

        // Later duplicates win, the key keeps its first position.
        dict.insert(key, value);

        curr_pos = next_pos;
    }

    Ok((dict, curr_pos + 1))
}

fn peek_byte(bytes: &[u8], pos: usize) -> BencodeParseResult<u8> {
    bytes
        .get(pos)
        .copied()
        .ok_or_else(|| BencodeParseError::from_kind(BencodeParseErrorKind::BytesEmpty { pos }))
}

/// Like [`peek_byte`] but reports a missing `e` for the container starting at `start`.
fn peek_terminator(bytes: &[u8], pos: usize, start: usize) -> BencodeParseResult<u8> {
    bytes.get(pos).copied().ok_or_else(|| {
        BencodeParseError::from_kind(BencodeParseErrorKind::MissingTerminator {
            pos: start.saturating_sub(1),
        })
    })
}
