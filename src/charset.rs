//! Byte-to-text decoding for fetched pages.
//!
//! Korean publishers still serve EUC-KR pages that only declare their
//! encoding in a `<meta>` tag, so the response body is decoded here rather
//! than by the HTTP client. Precedence: byte-order mark, `Content-Type`
//! charset, `<meta>` declaration, UTF-8.

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// How far into the document a `<meta>` charset declaration is looked for.
const SNIFF_WINDOW: usize = 4096;

/// Matches both `<meta charset="...">` and the
/// `<meta http-equiv="Content-Type" content="text/html; charset=...">` form.
static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).unwrap()
});

/// Pull the `charset` parameter out of a `Content-Type` header value.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn sniff_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(SNIFF_WINDOW)];
    let head = String::from_utf8_lossy(head);
    let label = META_CHARSET.captures(&head)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Decode an HTML body to text.
///
/// Unknown labels are skipped rather than treated as errors, and malformed
/// sequences become U+FFFD.
pub fn decode_html(bytes: &[u8], header_charset: Option<&str>) -> String {
    let declared = header_charset.and_then(|label| Encoding::for_label(label.trim().as_bytes()));
    let encoding = declared.or_else(|| sniff_meta(bytes)).unwrap_or(UTF_8);

    // `decode` gives a BOM precedence over the chosen encoding.
    let (text, used, had_errors) = encoding.decode(bytes);
    debug!(encoding = used.name(), had_errors, "Decoded page body");
    text.into_owned()
}
