//! Splits text into pieces small enough for the Google Translate endpoint.
//!
//! The web endpoint rejects requests longer than roughly 100 characters, so
//! [`GoogleTranslateTts`](super::GoogleTranslateTts) sends one request per
//! piece and concatenates the audio.  Pieces break after punctuation where
//! possible, then at the last space that fits, and only as a last resort in
//! the middle of a word.

/// Maximum characters per backend request.
pub const MAX_CHUNK_CHARS: usize = 100;

const BREAK_CHARS: &[char] = &[
    '.', '!', '?', ';', ':', ',', '\n', '\u{2026}', '\u{3002}', '\u{FF1F}', '\u{FF01}',
    '\u{3001}', '\u{FF0C}',
];

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Whitespace inside a piece is collapsed to single spaces.  Pieces without
/// any alphanumeric character (stray punctuation) are dropped, so text that
/// is only punctuation yields no pieces.  Adjacent short pieces are merged
/// while they still fit.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if BREAK_CHARS.contains(&c) {
            push_piece(&mut pieces, &current, max_chars);
            current.clear();
        }
    }
    push_piece(&mut pieces, &current, max_chars);

    merge_short(pieces, max_chars)
}

fn push_piece(out: &mut Vec<String>, raw: &str, max_chars: usize) {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !normalized.chars().any(char::is_alphanumeric) {
        return;
    }
    out.extend(minimize(&normalized, max_chars));
}

/// Cut an over-long piece at the last space that fits, or hard-cut at
/// `max_chars` when a single word is longer than that.
fn minimize(piece: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut rest = piece;

    while rest.chars().count() > max_chars {
        let Some((cut, _)) = rest.char_indices().nth(max_chars) else {
            break;
        };
        let head_end = cut + rest[cut..].chars().next().map_or(0, char::len_utf8);
        let split_at = rest[..head_end]
            .rfind(' ')
            .filter(|&i| i > 0)
            .unwrap_or(cut);

        out.push(rest[..split_at].trim_end().to_string());
        rest = rest[split_at..].trim_start();
    }

    if !rest.is_empty() {
        out.push(rest.to_string());
    }
    out
}

fn merge_short(pieces: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(pieces.len());

    for piece in pieces {
        if let Some(last) = out.last_mut() {
            if last.chars().count() + 1 + piece.chars().count() <= max_chars {
                last.push(' ');
                last.push_str(&piece);
                continue;
            }
        }
        out.push(piece);
    }

    out
}
