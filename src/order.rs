use crate::units::PhysicalSize;

// ── Standard paper formats ───────────────────────────────────────────────────

/// A standard paper format from the order configuration's size table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperFormat {
    A3,
    A4,
    A5,
}

impl PaperFormat {
    /// The portrait dimensions of this format in millimetres.
    ///
    /// ```
    /// use printpreflight::{PaperFormat, PhysicalSize};
    ///
    /// assert_eq!(PaperFormat::A4.size_mm(), PhysicalSize::new(210.0, 297.0));
    /// ```
    pub fn size_mm(self) -> PhysicalSize {
        match self {
            PaperFormat::A3 => PhysicalSize::new(297.0, 420.0),
            PaperFormat::A4 => PhysicalSize::new(210.0, 297.0),
            PaperFormat::A5 => PhysicalSize::new(148.0, 210.0),
        }
    }

    /// Look up a format by its configuration key (`"A3"`, `"A4"`, `"A5"`).
    ///
    /// Returns `None` for unknown keys — the order store is string-typed, so
    /// an unrecognised key simply means no size expectation.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "A3" => Some(PaperFormat::A3),
            "A4" => Some(PaperFormat::A4),
            "A5" => Some(PaperFormat::A5),
            _ => None,
        }
    }
}

// ── Order configuration ──────────────────────────────────────────────────────

/// Whether the order uses a standard small format or a custom large one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatType {
    /// Standard format, sized by [`OrderConfig::small_format`].
    #[default]
    Small,
    /// Custom format, sized by the `custom_*_cm` fields.
    Large,
}

/// Simplex/duplex printing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Duplex {
    #[default]
    SingleSided,
    DoubleSided,
}

/// The slice of a print-order configuration that preflight validation
/// consumes. Read-only; the order store owns the full record.
#[derive(Debug, Clone, Default)]
pub struct OrderConfig {
    pub format_type: FormatType,

    /// Standard format key, meaningful when `format_type` is `Small`.
    pub small_format: Option<PaperFormat>,

    /// Custom width in centimetres, meaningful when `format_type` is `Large`.
    pub custom_width_cm: Option<f64>,

    /// Custom height in centimetres, meaningful when `format_type` is `Large`.
    pub custom_height_cm: Option<f64>,

    /// Book orders are restricted to PDF uploads.
    pub is_book: bool,

    /// Configured page count for book orders.
    pub book_pages: Option<u32>,

    pub duplex: Duplex,
}

impl OrderConfig {
    /// The physical size this order expects the upload to have, or `None`
    /// when the configuration carries no size expectation (in which case the
    /// dimension check is skipped).
    ///
    /// Custom sizes are stored in centimetres by the order model and
    /// converted to millimetres here. The result is portrait-normalised.
    pub fn expected_dimensions(&self) -> Option<PhysicalSize> {
        match self.format_type {
            FormatType::Small => self.small_format.map(|f| f.size_mm()),
            FormatType::Large => match (self.custom_width_cm, self.custom_height_cm) {
                (Some(w), Some(h)) => Some(PhysicalSize::new(w * 10.0, h * 10.0).portrait()),
                _ => None,
            },
        }
    }
}
