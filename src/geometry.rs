use crate::units::{pixels_to_mm, points_to_mm, PhysicalSize, DEFAULT_DPI, MM_PER_INCH};
use lopdf::{Document, Object, ObjectId};
use std::io::Cursor;

// ── Geometry extraction ───────────────────────────────────────────────────────
//
// These are internal helpers. Callers use Preflight, which dispatches here
// based on the upload's extension.

/// Outcome of measuring a document against an expected physical size.
///
/// `Failure` means the document could not be measured at all (parse or
/// decode fault); `Comparison` always carries the measurement, even on a
/// mismatch, so the pipeline can emit resolution advisories independently
/// of the match outcome.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DimensionReport {
    /// The underlying library could not read the document.
    Failure(String),

    /// The document was measured and compared.
    Comparison {
        matches: bool,
        measured: PhysicalSize,
        expected: PhysicalSize,
        /// Horizontal resolution used for the pixel conversion. `None` for
        /// vector documents, where no resolution is involved.
        dpi: Option<f64>,
    },
}

// ── PDF variant ──────────────────────────────────────────────────────────────

/// Measure the first page of a PDF and compare it against `expected`.
///
/// The geometry box is read in points and converted to millimetres; both
/// sizes are portrait-normalised before the per-axis tolerance comparison.
/// Every lopdf fault is converted into a `Failure` here — nothing
/// propagates.
pub(crate) fn check_pdf_dimensions(bytes: &[u8], expected: PhysicalSize) -> DimensionReport {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => return DimensionReport::Failure(format!("cannot read PDF: {e}")),
    };

    let pages = doc.get_pages();
    let first_page = match pages.values().next() {
        Some(id) => *id,
        None => return DimensionReport::Failure("PDF has no pages".into()),
    };

    let (width_pt, height_pt) = match page_geometry_box(&doc, first_page) {
        Some(wh) => wh,
        None => return DimensionReport::Failure("first page has no usable /MediaBox".into()),
    };

    let measured = PhysicalSize::new(points_to_mm(width_pt), points_to_mm(height_pt)).portrait();
    let expected = expected.portrait();

    DimensionReport::Comparison {
        matches: measured.matches(expected),
        measured,
        expected,
        dpi: None,
    }
}

/// Count the pages of a PDF. Used by the book page-count check, where an
/// unreadable PDF is a hard error rather than a skipped check.
pub(crate) fn pdf_page_count(bytes: &[u8]) -> Result<usize, String> {
    let doc = Document::load_mem(bytes).map_err(|e| format!("cannot read PDF: {e}"))?;
    Ok(doc.get_pages().len())
}

/// Width and height in points of a page's `/MediaBox`, following `/Parent`
/// links for inherited boxes.
fn page_geometry_box(doc: &Document, page_id: ObjectId) -> Option<(f64, f64)> {
    let mut current = page_id;

    // Page trees are shallow; the bound only guards against reference cycles
    // in malformed files.
    for _ in 0..32 {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;

        if let Ok(value) = dict.get(b"MediaBox") {
            // /MediaBox may be an inline array or a reference to one.
            let rect = if let Ok(id) = value.as_reference() {
                doc.get_object(id).ok()?.as_array().ok()?.clone()
            } else {
                value.as_array().ok()?.clone()
            };

            if rect.len() < 4 {
                return None;
            }
            let x0 = number(&rect[0])?;
            let y0 = number(&rect[1])?;
            let x1 = number(&rect[2])?;
            let y1 = number(&rect[3])?;
            return Some(((x1 - x0).abs(), (y1 - y0).abs()));
        }

        current = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }

    None
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

// ── Image variant ────────────────────────────────────────────────────────────

/// Measure a raster image and compare it against `expected`.
///
/// Pixel dimensions come from the image header; the physical size is derived
/// from the embedded horizontal resolution (JFIF density or PNG `pHYs`),
/// defaulting to 72 DPI when none is declared. The horizontal value is used
/// for both axes — source material with non-square resolution is not
/// handled.
pub(crate) fn check_image_dimensions(bytes: &[u8], expected: PhysicalSize) -> DimensionReport {
    let reader = match image::io::Reader::new(Cursor::new(bytes)).with_guessed_format() {
        Ok(reader) => reader,
        Err(e) => return DimensionReport::Failure(format!("cannot read image: {e}")),
    };

    let (width_px, height_px) = match reader.into_dimensions() {
        Ok(dims) => dims,
        Err(e) => return DimensionReport::Failure(format!("cannot decode image: {e}")),
    };

    let dpi = sniff_dpi(bytes).unwrap_or(DEFAULT_DPI);

    let measured =
        PhysicalSize::new(pixels_to_mm(width_px, dpi), pixels_to_mm(height_px, dpi)).portrait();
    let expected = expected.portrait();

    DimensionReport::Comparison {
        matches: measured.matches(expected),
        measured,
        expected,
        dpi: Some(dpi),
    }
}

// ── Embedded resolution ──────────────────────────────────────────────────────
//
// Neither the image crate nor anything else in our stack surfaces the
// declared print resolution, so the relevant header fields are read directly:
// the JFIF APP0 density for JPEG, the pHYs chunk for PNG.

/// Horizontal DPI declared by the image, if any.
fn sniff_dpi(bytes: &[u8]) -> Option<f64> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        png_dpi(bytes)
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        jfif_dpi(bytes)
    } else {
        None
    }
}

/// Walk PNG chunks up to the image data looking for `pHYs`
/// (pixels-per-metre, unit byte 1 = metre).
fn png_dpi(bytes: &[u8]) -> Option<f64> {
    let mut pos = 8; // past the signature

    while pos + 8 <= bytes.len() {
        let length = u32::from_be_bytes(bytes[pos..pos + 4].try_into().ok()?) as usize;
        let chunk_type = &bytes[pos + 4..pos + 8];

        if chunk_type == b"pHYs" {
            if length != 9 || pos + 17 > bytes.len() {
                return None;
            }
            let data = &bytes[pos + 8..pos + 17];
            let x_per_unit = u32::from_be_bytes(data[0..4].try_into().ok()?);
            let unit = data[8];
            // unit 0 declares aspect ratio only, not an absolute resolution
            if unit == 1 && x_per_unit > 0 {
                return Some(f64::from(x_per_unit) * MM_PER_INCH / 1000.0);
            }
            return None;
        }

        if chunk_type == b"IDAT" || chunk_type == b"IEND" {
            return None;
        }

        // length + type + data + CRC
        pos += 12 + length;
    }

    None
}

/// Walk JPEG segments up to the scan data looking for the JFIF APP0 density.
fn jfif_dpi(bytes: &[u8]) -> Option<f64> {
    let mut pos = 2; // past SOI

    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];

        // Standalone markers carry no length field.
        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            pos += 2;
            continue;
        }
        // Start of scan: density would have appeared before this.
        if marker == 0xDA {
            return None;
        }

        let seg_len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        if seg_len < 2 || pos + 2 + seg_len > bytes.len() {
            return None;
        }

        if marker == 0xE0 && seg_len >= 14 {
            let payload = &bytes[pos + 4..pos + 2 + seg_len];
            if payload.starts_with(b"JFIF\0") {
                // identifier(5) version(2) units(1) x-density(2) y-density(2)
                let units = payload[7];
                let x_density = f64::from(u16::from_be_bytes([payload[8], payload[9]]));
                return match units {
                    1 if x_density > 0.0 => Some(x_density),
                    2 if x_density > 0.0 => Some(x_density * 2.54),
                    _ => None,
                };
            }
        }

        pos += 2 + seg_len;
    }

    None
}
