use std::fmt::Write as _;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rand::{RngCore, rngs::OsRng};

use super::render::RenderedAlert;

const BOUNDARY_BYTES: usize = 30;
const MAX_LINE_LEN: usize = 76;

/// 30 random bytes as 60 lowercase hex characters, fresh per call.
pub(crate) fn random_boundary() -> String {
    let mut buf = [0u8; BOUNDARY_BYTES];
    OsRng.fill_bytes(&mut buf);
    let mut out = String::with_capacity(BOUNDARY_BYTES * 2);
    for byte in buf {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// RFC 2045 hard wrap: full 76-character slices each followed by CRLF, then
/// the remainder with no trailing line terminator.
pub(crate) fn wrap_base64(raw: &[u8]) -> String {
    let encoded = STANDARD.encode(raw);
    let mut wrapped = String::with_capacity(encoded.len() + (encoded.len() / MAX_LINE_LEN + 1) * 2);
    let mut rest = encoded.as_str();
    while rest.len() > MAX_LINE_LEN {
        let (line, tail) = rest.split_at(MAX_LINE_LEN);
        wrapped.push_str(line);
        wrapped.push_str("\r\n");
        rest = tail;
    }
    wrapped.push_str(rest);
    wrapped
}

/// Assembles the full multipart/related message with fresh boundaries.
pub(crate) fn assemble(
    rendered: &RenderedAlert,
    from: &str,
    to: &str,
    close_related: bool,
) -> String {
    assemble_with(
        rendered,
        from,
        to,
        close_related,
        &random_boundary(),
        &random_boundary(),
    )
}

/// The outer boundary is closed only when the alert carries due items (the
/// slot reserved for embedded content); a web-changed alert leaves it open.
pub(crate) fn assemble_with(
    rendered: &RenderedAlert,
    from: &str,
    to: &str,
    close_related: bool,
    related_boundary: &str,
    alternative_boundary: &str,
) -> String {
    let mut msg = String::new();
    msg.push_str("MIME-version: 1.0;\r\n");
    let _ = write!(msg, "Subject: {}\r\n", rendered.subject);
    if !from.is_empty() {
        let _ = write!(msg, "From: {}\r\n", from);
    }
    let _ = write!(msg, "To: {}\r\n", to);
    let _ = write!(
        msg,
        "Content-Type: multipart/related; boundary=\"{}\"\r\n",
        related_boundary
    );
    msg.push_str("\r\n");

    let _ = write!(msg, "--{}\r\n", related_boundary);
    let _ = write!(
        msg,
        "Content-Type: multipart/alternative; boundary=\"{}\"\r\n",
        alternative_boundary
    );
    msg.push_str("\r\n");

    // plain section
    let _ = write!(msg, "--{}\r\n", alternative_boundary);
    msg.push_str("Content-Type: text/plain; charset=\"UTF-8\"\r\n");
    msg.push_str("\r\n");
    msg.push_str(&rendered.plain);
    msg.push_str("\r\n");

    // html section, base64 with RFC 2045 wrapping
    let _ = write!(msg, "--{}\r\n", alternative_boundary);
    msg.push_str("Content-Type: text/html; charset=\"UTF-8\"\r\n");
    msg.push_str("Content-Transfer-Encoding: base64\r\n");
    msg.push_str("\r\n");
    msg.push_str(&wrap_base64(rendered.html.as_bytes()));
    msg.push_str("\r\n");
    let _ = write!(msg, "--{}--\r\n", alternative_boundary);

    if close_related {
        let _ = write!(msg, "--{}--", related_boundary);
    }
    msg
}
