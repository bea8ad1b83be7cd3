//! Shared helpers: content-type inference and name normalization.

use std::ffi::OsStr;
use std::path::Path;

use mime::Mime;

/// Infer the MIME content type for an object key from its extension.
///
/// Unrecognized or missing extensions fall back to `text/plain`, matching
/// what S3 website hosting serves most usefully for stray files.
///
/// # Examples
///
/// ```
/// use sitestack_core::utils::content_type_for_key;
///
/// assert_eq!(content_type_for_key("index.html").to_string(), "text/html");
/// assert_eq!(content_type_for_key("data.bin").to_string(), "text/plain");
/// ```
#[must_use]
pub fn content_type_for_key(key: &str) -> Mime {
    let ext = Path::new(key)
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html" | "htm") => mime::TEXT_HTML,
        Some("css") => mime::TEXT_CSS,
        Some("js" | "mjs") => mime::APPLICATION_JAVASCRIPT,
        Some("json") => mime::APPLICATION_JSON,
        Some("xml") => mime::TEXT_XML,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("pdf") => mime::APPLICATION_PDF,
        _ => mime::TEXT_PLAIN,
    }
}

/// Strip the `/hostedzone/` prefix Route 53 prepends to zone ids in listings.
#[must_use]
pub fn normalize_zone_id(id: &str) -> &str {
    id.trim_start_matches("/hostedzone/")
}

#[cfg(test)]
mod tests {
    use super::{content_type_for_key, normalize_zone_id};

    #[test]
    fn html_maps_to_text_html() {
        assert_eq!(content_type_for_key("index.html").to_string(), "text/html");
        assert_eq!(content_type_for_key("sub/b.html").to_string(), "text/html");
        assert_eq!(content_type_for_key("legacy.htm").to_string(), "text/html");
    }

    #[test]
    fn common_web_assets_resolve() {
        assert_eq!(content_type_for_key("site.css").to_string(), "text/css");
        assert_eq!(
            content_type_for_key("app.js").to_string(),
            "application/javascript"
        );
        assert_eq!(
            content_type_for_key("manifest.json").to_string(),
            "application/json"
        );
        assert_eq!(content_type_for_key("logo.png").to_string(), "image/png");
        assert_eq!(content_type_for_key("photo.JPG").to_string(), "image/jpeg");
    }

    #[test]
    fn unknown_extension_falls_back_to_text_plain() {
        assert_eq!(content_type_for_key("archive.xyz").to_string(), "text/plain");
        assert_eq!(content_type_for_key("README").to_string(), "text/plain");
        assert_eq!(content_type_for_key("notes.txt").to_string(), "text/plain");
    }

    #[test]
    fn zone_id_prefix_is_stripped() {
        assert_eq!(normalize_zone_id("/hostedzone/Z123ABC"), "Z123ABC");
        assert_eq!(normalize_zone_id("Z123ABC"), "Z123ABC");
    }
}
