//! Word (OOXML) extraction strategy.
//!
//! A `.docx` file is a zip package.  Visible text lives in
//! `word/document.xml`, with page headers and footers in `word/headerN.xml`
//! and `word/footerN.xml`.  Parts are read in the order headers → body →
//! footers.  Images under `word/media/` are never opened.
//!
//! Inside a part only a handful of elements matter:
//!
//! | Element         | Emitted            |
//! |-----------------|--------------------|
//! | `<w:t>…</w:t>`  | the run text       |
//! | `<w:tab/>`      | `\t`               |
//! | `<w:br/>`, `<w:cr/>` | `\n`          |
//! | `</w:p>`        | `\n\n`             |

use std::io::{Read, Seek};
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use zip::ZipArchive;

use super::ExtractError;

const BODY_PART: &str = "word/document.xml";

/// Extract the visible text of the Word document at `path`.
pub fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = std::fs::File::open(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut archive = ZipArchive::new(file)
        .map_err(|e| ExtractError::Word(format!("not a Word (OOXML) package: {e}")))?;

    let parts = text_parts(archive.file_names())?;
    log::debug!("word: reading {} part(s) from {}", parts.len(), path.display());

    let mut text = String::new();
    for part in &parts {
        let xml = read_part(&mut archive, part)?;
        text.push_str(&xml_to_text(&xml));
    }

    Ok(text)
}

/// Pick the parts holding visible text, in reading order.
fn text_parts<'a>(names: impl Iterator<Item = &'a str>) -> Result<Vec<String>, ExtractError> {
    let mut headers = Vec::new();
    let mut footers = Vec::new();
    let mut has_body = false;

    for name in names {
        if name == BODY_PART {
            has_body = true;
        } else if is_numbered_part(name, "word/header") {
            headers.push(name.to_string());
        } else if is_numbered_part(name, "word/footer") {
            footers.push(name.to_string());
        }
    }

    if !has_body {
        return Err(ExtractError::Word(format!("missing {BODY_PART}")));
    }

    headers.sort();
    footers.sort();

    let mut parts = headers;
    parts.push(BODY_PART.to_string());
    parts.extend(footers);
    Ok(parts)
}

/// `word/header.xml`, `word/header1.xml`, … but not `word/headerFoo.xml`.
fn is_numbered_part(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(".xml"))
        .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_digit()))
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, ExtractError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ExtractError::Word(format!("{name}: {e}")))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::Word(format!("{name}: {e}")))?;
    Ok(xml)
}

fn token_regex() -> &'static Regex {
    static TOKENS: OnceLock<Regex> = OnceLock::new();
    TOKENS.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:t(?:\s[^>]*)?/>|<w:tab/>|<w:(?:br|cr)(?:\s[^>]*)?/>|</w:p>")
            .expect("static regex is valid")
    })
}

/// Flatten one WordprocessingML part to plain text.
pub(crate) fn xml_to_text(xml: &str) -> String {
    let mut out = String::new();

    for caps in token_regex().captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            out.push_str(&unescape_xml(run.as_str()));
            continue;
        }
        let token = caps.get(0).map_or("", |m| m.as_str());
        if token == "<w:tab/>" {
            out.push('\t');
        } else if token == "</w:p>" {
            out.push_str("\n\n");
        } else if token.starts_with("<w:br") || token.starts_with("<w:cr") {
            out.push('\n');
        }
        // `<w:t/>` is an empty run.
    }

    out
}

/// Decode the five predefined XML entities and numeric character references.
pub(crate) fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };

        let entity = &tail[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };

        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
