//! Utility functions

use std::path::PathBuf;

use crate::constants::APP_NAME;

// Bus silhouette for the agency list header (white on dark)
pub const AGENCY_ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path fill="#fff" d="M6 2h12a3 3 0 0 1 3 3v11a2 2 0 0 1-1 1.73V20a1 1 0 0 1-1 1h-1a1 1 0 0 1-1-1v-1H7v1a1 1 0 0 1-1 1H5a1 1 0 0 1-1-1v-2.27A2 2 0 0 1 3 16V5a3 3 0 0 1 3-3Zm0 3v6h12V5H6Zm1.5 9a1.5 1.5 0 1 0 0 3 1.5 1.5 0 0 0 0-3Zm9 0a1.5 1.5 0 1 0 0 3 1.5 1.5 0 0 0 0-3Z"/></svg>"##;

// Square app icon for window/taskbar
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect width="64" height="64" rx="12" fill="#0086FF"/><path fill="#fff" d="M20 14h24a6 6 0 0 1 6 6v20a4 4 0 0 1-2 3.46V48a2 2 0 0 1-2 2h-2a2 2 0 0 1-2-2v-2H22v2a2 2 0 0 1-2 2h-2a2 2 0 0 1-2-2v-4.54A4 4 0 0 1 14 40V20a6 6 0 0 1 6-6Zm0 6v10h24V20H20Zm3 14a3 3 0 1 0 0 6 3 3 0 0 0 0-6Zm18 0a3 3 0 1 0 0 6 3 3 0 0 0 0-6Z"/></svg>"##;

/// Rasterize the agency header icon to a square image.
pub fn rasterize_agency_icon(size: u32) -> (Vec<u8>, u32, u32) {
    rasterize_square(AGENCY_ICON_SVG, size)
}

/// Rasterize the app icon to a square image (for window/taskbar icons).
pub fn rasterize_app_icon(size: u32) -> (Vec<u8>, u32, u32) {
    rasterize_square(ICON_SVG, size)
}

fn rasterize_square(svg: &str, size: u32) -> (Vec<u8>, u32, u32) {
    // Embedded SVGs are static, a parse failure is a build defect
    let tree = resvg::usvg::Tree::from_str(svg, &resvg::usvg::Options::default())
        .expect("embedded SVG must parse");
    let scale = size as f32 / tree.size().width();
    let mut pixmap =
        resvg::tiny_skia::Pixmap::new(size, size).expect("icon size must be non-zero");
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), size, size)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

// =============================================================================
// Units
// =============================================================================

pub fn mps_to_kph(mps: f64) -> f64 {
    mps * 3.6
}

pub fn kph_to_mps(kph: f64) -> f64 {
    kph / 3.6
}

pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Lenient float parse: leading whitespace is skipped and the longest numeric
/// prefix is used, so `"5.5 km/h"` reads as 5.5. Returns None when no digits lead.
pub fn parse_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Stored walking speed (m/s, any JSON shape) to the km/h text shown in the input
pub fn speed_to_display(stored: &serde_json::Value) -> String {
    let mps = match stored {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_float(s),
        _ => None,
    };
    match mps.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.1}", round_to_decimals(mps_to_kph(v), 1)),
        None => String::new(),
    }
}

/// Text typed in km/h to the m/s value to store; None stores `null`
pub fn speed_from_input(text: &str) -> Option<f64> {
    parse_float(text)
        .filter(|v| v.is_finite())
        .map(kph_to_mps)
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unit_conversion() {
        assert!((mps_to_kph(1.0) - 3.6).abs() < 1e-12);
        assert!((kph_to_mps(36.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to_decimals(5.04, 1), 5.0);
        assert_eq!(round_to_decimals(5.06, 1), 5.1);
        assert_eq!(round_to_decimals(12.345, 0), 12.0);
    }

    #[test]
    fn parse_float_accepts_numeric_prefix() {
        assert_eq!(parse_float("5.5"), Some(5.5));
        assert_eq!(parse_float("  4 km/h"), Some(4.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("-3."), Some(-3.0));
        assert_eq!(parse_float("1e2x"), Some(100.0));
        assert_eq!(parse_float("2e"), Some(2.0));
    }

    #[test]
    fn parse_float_rejects_non_numbers() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float("."), None);
        assert_eq!(parse_float("-"), None);
        assert_eq!(parse_float("NaN"), None);
    }

    #[test]
    fn display_rounds_to_one_decimal() {
        assert_eq!(speed_to_display(&json!(1.4)), "5.0");
        assert_eq!(speed_to_display(&json!(1.5)), "5.4");
        assert_eq!(speed_to_display(&json!("1.5")), "5.4");
    }

    #[test]
    fn display_of_missing_speed_is_empty() {
        assert_eq!(speed_to_display(&serde_json::Value::Null), "");
        assert_eq!(speed_to_display(&json!("fast")), "");
        assert_eq!(speed_to_display(&json!({ "v": 1 })), "");
        assert_ne!(speed_to_display(&json!("fast")), "NaN");
    }

    #[test]
    fn input_stores_unrounded_mps() {
        let mps = speed_from_input("5").unwrap();
        assert!((mps - 5.0 / 3.6).abs() < 1e-12);
        assert_eq!(speed_from_input("walk"), None);
        assert_eq!(speed_from_input(""), None);
    }

    #[test]
    fn speed_round_trip_stays_within_rounding() {
        for v in [0.5, 1.0, 1.3889, 1.4, 2.75, 10.0] {
            let back = speed_from_input(&speed_to_display(&json!(v))).unwrap();
            assert!((back - v).abs() <= 0.05 / 3.6 + 1e-9, "v = {v}, back = {back}");
        }
        let back = speed_from_input(&speed_to_display(&json!(1.4))).unwrap();
        assert!((back - 1.3889).abs() < 1e-3);
    }

    #[test]
    fn icons_rasterize_to_requested_size() {
        let (pixels, w, h) = rasterize_agency_icon(32);
        assert_eq!((w, h), (32, 32));
        assert_eq!(pixels.len(), 32 * 32 * 4);
        assert!(pixels.chunks(4).any(|p| p[3] > 0));

        let (pixels, w, h) = rasterize_app_icon(16);
        assert_eq!((w, h), (16, 16));
        assert_eq!(pixels.len(), 16 * 16 * 4);
    }
}
