//! Character-level helpers shared by the tokenizer: whitespace skipping and
//! quoted-string extraction. Grounded on `skip_whitespace` /
//! `extract_quoted_string` in the original Python `utils.py`.

/// Advance `i` past any run of whitespace, returning the new byte offset.
pub fn skip_whitespace(input: &str, mut i: usize) -> usize {
    while let Some(c) = input[i..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        i += c.len_utf8();
    }
    i
}

/// Extract a quoted constant starting at `input[i]` (which must be a quote
/// character). A backslash is an escape that quotes the next character
/// literally, whatever it is — including the delimiter itself — and is
/// itself dropped from the output.
///
/// Returns the text with the surrounding quotes stripped and the index
/// just past the closing quote. If the input ends before a matching close
/// quote, returns whatever was accumulated with `next_index == input.len()`.
pub fn extract_quoted(input: &str, i: usize) -> (String, usize) {
    let quote = input[i..].chars().next().expect("caller guarantees a quote at i");
    let mut j = i + quote.len_utf8();
    let mut out = String::new();

    loop {
        let Some(c) = input[j..].chars().next() else { break };
        let advance = c.len_utf8();

        if c == quote {
            j += advance;
            return (out, j);
        }

        if c == '\\' {
            if let Some(next) = input[j + advance..].chars().next() {
                out.push(next);
                j += advance + next.len_utf8();
                continue;
            }
        }

        out.push(c);
        j += advance;
    }

    (out, j)
}
