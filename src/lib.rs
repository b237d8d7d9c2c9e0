//! # printpreflight
//!
//! A Rust library for preflight validation of print-order uploads.
//!
//! ## What this crate does
//!
//! Before a print order is accepted, the uploaded document (PDF, JPEG, or
//! PNG) is checked against the order configuration:
//!
//! 1. **File format** — the extension must be one of `.pdf`, `.jpg`,
//!    `.jpeg`, `.png`.
//! 2. **Book policy** — book orders accept PDF only, and the PDF's page
//!    count must match the configured one exactly.
//! 3. **File size** — uploads above the configured limit (10 MiB by
//!    default) are rejected.
//! 4. **Physical dimensions** — the page geometry of a PDF (points) or the
//!    pixel dimensions and embedded resolution of an image (DPI) are
//!    converted to millimetres and compared against the expected paper
//!    size within a ±2 mm tolerance, regardless of orientation.
//! 5. **Duplex parity** — double-sided book orders with an odd page count
//!    get an advisory warning.
//!
//! All outcomes are collected into a [`Verdict`]: an ordered list of
//! human-readable errors and warnings plus the file metadata. Expected
//! validation failures never surface as `Err` — a parse fault in the
//! underlying PDF or image library becomes an entry in
//! [`Verdict::errors`].
//!
//! ## Quick example
//!
//! ```no_run
//! use printpreflight::{OrderConfig, PaperFormat, Preflight, Upload};
//!
//! # fn main() -> std::io::Result<()> {
//! let mut upload = Upload::from_path("flyer.pdf")?;
//! let order = OrderConfig {
//!     small_format: Some(PaperFormat::A4),
//!     ..Default::default()
//! };
//!
//! let verdict = Preflight::new().validate(&mut upload, &order);
//! if verdict.is_valid {
//!     println!("accepted");
//! } else {
//!     for error in &verdict.errors {
//!         println!("rejected: {error}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod geometry;
mod order;
mod pipeline;
mod units;
mod upload;

pub use order::{Duplex, FormatType, OrderConfig, PaperFormat};
pub use pipeline::{Preflight, Rejection, Verdict, Warning};
pub use units::{
    normalize_portrait, pixels_to_mm, points_to_mm, within_tolerance, PhysicalSize, TOLERANCE_MM,
};
pub use upload::{FileInfo, Upload};
// The geometry extractors are intentionally *not* re-exported; they are an
// internal detail. Callers use Preflight for all checks.

// ── Configuration ────────────────────────────────────────────────────────────

/// Default upload size limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Runtime configuration for [`Preflight`].
#[derive(Debug, Clone)]
pub struct PreflightConfig {
    /// Whether the PDF-parsing capability is available.
    ///
    /// Deployments where the PDF backend can fail to initialise record
    /// that outcome once at startup and inject it here. When `false`, the
    /// dimension check is skipped for every file type, and the book
    /// page-count check fails hard — that check cannot be waived.
    pub pdf_support: bool,

    /// Maximum accepted upload size in bytes.
    pub max_file_size: u64,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            pdf_support: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}
