//! Hand-built document and audio fixtures shared by the unit tests.

use std::io::{Cursor, Write};

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

/// A minimal, valid PDF with one page per entry of `pages`.
///
/// Each page draws its string with the standard Helvetica font.  An empty
/// string produces a page with an empty content stream.
pub fn minimal_pdf(pages: &[&str]) -> Vec<u8> {
    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    for (i, text) in pages.iter().enumerate() {
        let content_id = 5 + 2 * i;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
        ));

        let stream = if text.is_empty() {
            String::new()
        } else {
            let escaped = text
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            format!("BT /F1 24 Tf 72 700 Td ({escaped}) Tj ET")
        };
        objects.push(format!(
            "<< /Length {} >>\nstream\n{stream}\nendstream",
            stream.len()
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", i + 1));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));

    out.into_bytes()
}

// ---------------------------------------------------------------------------
// DOCX
// ---------------------------------------------------------------------------

/// A WordprocessingML part containing one paragraph per entry.
pub fn paragraphs_xml(paragraphs: &[&str]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for p in paragraphs {
        let escaped = p
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        xml.push_str(&format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{escaped}</w:t></w:r></w:p>"#
        ));
    }
    xml.push_str("</w:body></w:document>");
    xml
}

/// A zip package holding exactly the given `(name, content)` entries.
pub fn docx_with_parts(parts: &[(&str, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in parts {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(content.as_bytes()).expect("write zip entry");
    }

    writer.finish().expect("finish zip").into_inner()
}

/// A minimal `.docx` whose body has one paragraph per entry.
pub fn minimal_docx(paragraphs: &[&str]) -> Vec<u8> {
    docx_with_parts(&[
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#
                .to_string(),
        ),
        ("word/document.xml", paragraphs_xml(paragraphs)),
    ])
}

// ---------------------------------------------------------------------------
// MP3
// ---------------------------------------------------------------------------

/// Samples per MPEG-1 Layer III frame.
const MP3_SAMPLES_PER_FRAME: f64 = 1152.0;
/// Sample rate encoded in [`MP3_HEADER`].
const MP3_SAMPLE_RATE: f64 = 44_100.0;
/// MPEG-1, Layer III, no CRC, 128 kbit/s, 44.1 kHz, no padding, mono.
const MP3_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0xC4];
/// `144 * 128_000 / 44_100`, rounded down.
const MP3_FRAME_LEN: usize = 417;

/// Playback length of one frame produced by [`mp3_frames`].
pub const MP3_FRAME_SECS: f64 = MP3_SAMPLES_PER_FRAME / MP3_SAMPLE_RATE;

/// `count` back-to-back silent MPEG audio frames.
pub fn mp3_frames(count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count * MP3_FRAME_LEN);
    for _ in 0..count {
        out.extend_from_slice(&MP3_HEADER);
        out.resize(out.len() + MP3_FRAME_LEN - MP3_HEADER.len(), 0);
    }
    out
}
