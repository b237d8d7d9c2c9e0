use std::fmt;

// ── Unit conversion ──────────────────────────────────────────────────────────
//
// PDF page geometry is expressed in points (1 pt = 1/72 inch), raster images
// in pixels at some resolution. Both are reconciled to millimetres before any
// comparison.

/// Millimetres per PDF point (25.4 / 72).
pub const MM_PER_POINT: f64 = 0.352778;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Resolution assumed when an image declares none, or a nonsensical one.
pub const DEFAULT_DPI: f64 = 72.0;

/// Acceptable deviation between measured and expected dimensions, per axis.
pub const TOLERANCE_MM: f64 = 2.0;

/// Convert PDF points to millimetres.
///
/// ```
/// use printpreflight::points_to_mm;
///
/// // An A4 page is 595 × 842 points.
/// assert!((points_to_mm(595.0) - 209.9).abs() < 0.1);
/// assert!((points_to_mm(842.0) - 297.0).abs() < 0.1);
/// ```
pub fn points_to_mm(points: f64) -> f64 {
    points * MM_PER_POINT
}

/// Convert a pixel count to millimetres at the given resolution.
///
/// A resolution of zero or less falls back to [`DEFAULT_DPI`].
///
/// ```
/// use printpreflight::pixels_to_mm;
///
/// // A 300 DPI A4 scan is 2480 pixels wide.
/// assert!((pixels_to_mm(2480, 300.0) - 210.0).abs() < 0.1);
/// ```
pub fn pixels_to_mm(pixels: u32, dpi: f64) -> f64 {
    let dpi = if dpi > 0.0 { dpi } else { DEFAULT_DPI };
    f64::from(pixels) * MM_PER_INCH / dpi
}

/// Reorder a `(width, height)` pair so that width ≤ height.
///
/// Applied to both measured and expected sizes before comparison, so a
/// landscape-scanned file can still match a portrait-specified target and
/// vice versa.
pub fn normalize_portrait(width: f64, height: f64) -> (f64, f64) {
    if width > height {
        (height, width)
    } else {
        (width, height)
    }
}

/// Returns `true` when `a` and `b` differ by at most [`TOLERANCE_MM`].
pub fn within_tolerance(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE_MM
}

// ── PhysicalSize ─────────────────────────────────────────────────────────────

/// A physical document size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PhysicalSize {
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Portrait-normalised copy of this size (width ≤ height).
    ///
    /// ```
    /// use printpreflight::PhysicalSize;
    ///
    /// let landscape = PhysicalSize::new(297.0, 210.0);
    /// assert_eq!(landscape.portrait(), PhysicalSize::new(210.0, 297.0));
    /// ```
    pub fn portrait(self) -> Self {
        let (width_mm, height_mm) = normalize_portrait(self.width_mm, self.height_mm);
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Returns `true` when both axes of this size match `expected` within
    /// [`TOLERANCE_MM`]. Both sizes are portrait-normalised first.
    pub fn matches(self, expected: PhysicalSize) -> bool {
        let found = self.portrait();
        let expected = expected.portrait();
        within_tolerance(found.width_mm, expected.width_mm)
            && within_tolerance(found.height_mm, expected.height_mm)
    }
}

impl fmt::Display for PhysicalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x{:.1}mm", self.width_mm, self.height_mm)
    }
}
