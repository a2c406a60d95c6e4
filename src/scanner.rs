//! Field extraction helpers for raw modem output.
//!
//! All functions work on byte slices and never read past the slice they are
//! given, whatever indices the caller computes.

/// Index of the first occurrence of `byte` in `text`.
pub fn index_of(text: &[u8], byte: u8) -> Option<usize> {
    text.iter().position(|&b| b == byte)
}

/// Index of the first byte of `text` contained in `set`.
pub fn index_of_any(text: &[u8], set: &[u8]) -> Option<usize> {
    text.iter().position(|b| set.contains(b))
}

/// Index of the first occurrence of `needle` in `text`.
pub fn find(text: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    text.windows(needle.len()).position(|w| w == needle)
}

/// Index of the last occurrence of `needle` in `text`.
pub fn rfind(text: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(text.len());
    }
    text.windows(needle.len()).rposition(|w| w == needle)
}

/// Inclusive sub-slice `text[start..=end]`.
///
/// `start` falls back to 0 when negative or beyond the end of `text`, and
/// `end` is clamped to the last index. A range that is still inverted after
/// clamping yields an empty slice.
pub fn slice(text: &[u8], start: isize, end: isize) -> &[u8] {
    let len = text.len() as isize;
    if len == 0 {
        return &[];
    }

    let start = if start < 0 || start > len { 0 } else { start };
    let end = if end >= len { len - 1 } else { end };

    if end < start {
        return &[];
    }

    &text[start as usize..=end as usize]
}

/// Everything after the first occurrence of `byte`.
pub fn after(text: &[u8], byte: u8) -> Option<&[u8]> {
    let idx = index_of(text, byte)?;
    Some(slice(text, idx as isize + 1, text.len() as isize))
}

/// Bytes strictly between the first `open` and the first `close` following
/// it.
pub fn between(text: &[u8], open: u8, close: u8) -> Option<&[u8]> {
    let rest = after(text, open)?;
    let end = index_of(rest, close)?;
    Some(slice(rest, 0, end as isize - 1))
}
