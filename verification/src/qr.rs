//! QR rendering of verification links.
//!
//! Codes use the highest error correction level so a printed certificate
//! still scans when partly damaged.

use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

use crate::error::QrError;

/// Default edge length of rendered SVGs, in pixels.
pub const DEFAULT_SVG_SIZE: u32 = 256;

fn code_for(data: &str) -> Result<QrCode, QrError> {
    QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
        .map_err(|e| QrError::Encode(e.to_string()))
}

/// Render `data` as a standalone SVG document at least `size` pixels wide.
pub fn render_svg(data: &str, size: u32) -> Result<String, QrError> {
    let code = code_for(data)?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(size, size)
        .quiet_zone(true)
        .build())
}

/// Render `data` with half-block characters for a dark terminal.
pub fn render_terminal(data: &str) -> Result<String, QrError> {
    let code = code_for(data)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "https://veridia.example/verify?data=eyJsYW5kSWQiOjQyfQ";

    #[test]
    fn svg_document() {
        let svg = render_svg(LINK, DEFAULT_SVG_SIZE).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn terminal_rendering_is_multiline() {
        let text = render_terminal(LINK).unwrap();
        assert!(text.lines().count() > 10);
    }

    #[test]
    fn rejects_oversized_payload() {
        let data = "x".repeat(4000);
        assert!(matches!(render_svg(&data, 128), Err(QrError::Encode(_))));
        assert!(matches!(render_terminal(&data), Err(QrError::Encode(_))));
    }
}
