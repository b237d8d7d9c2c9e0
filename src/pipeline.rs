use crate::geometry::{self, DimensionReport};
use crate::order::{Duplex, OrderConfig};
use crate::units::PhysicalSize;
use crate::upload::{FileInfo, Upload};
use crate::PreflightConfig;
use log::{debug, warn};
use std::io::{Read, Seek};
use thiserror::Error;

/// Extensions accepted for any order.
const ACCEPTED_EXTENSIONS: [&str; 4] = [".pdf", ".jpg", ".jpeg", ".png"];

/// Image resolution below which a quality warning is attached.
const MIN_RECOMMENDED_DPI: f64 = 150.0;

// ── Error and warning taxonomy ───────────────────────────────────────────────

/// A reason for rejecting an upload. Rendered into [`Verdict::errors`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("Unsupported format: {0}. Accepted formats: .pdf, .jpg, .jpeg, .png")]
    UnsupportedFormat(String),

    #[error("Book orders accept PDF files only")]
    BookRequiresPdf,

    #[error("PDF validation system unavailable. Contact the administrator.")]
    ValidationUnavailable,

    #[error("Incorrect page count. File: {actual} pages, configuration: {expected} pages")]
    PageCountMismatch { actual: usize, expected: u32 },

    #[error("Cannot read PDF: {0}")]
    UnreadablePdf(String),

    #[error("File too large ({size_mb:.2}MB). Maximum: {limit_mb}MB")]
    FileTooLarge { size_mb: f64, limit_mb: u64 },

    #[error("Incorrect PDF dimensions. Expected: {expected}")]
    PdfDimensionMismatch { expected: PhysicalSize },

    #[error("Incorrect image dimensions. Expected: {expected}")]
    ImageDimensionMismatch { expected: PhysicalSize },
}

/// An advisory attached to an otherwise acceptable upload. Rendered into
/// [`Verdict::warnings`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    #[error("Low resolution ({dpi:.0} DPI). Recommended: 300 DPI for print quality")]
    LowResolution { dpi: f64 },

    #[error("An even page count is recommended for double-sided book printing")]
    OddPageCountForDuplex,
}

// ── Verdict ──────────────────────────────────────────────────────────────────

/// The outcome of one validation run.
///
/// Errors and warnings preserve the order in which the pipeline raised them.
/// A verdict is valid exactly when `errors` is empty; warnings never block
/// acceptance.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub file_info: FileInfo,
}

// Accumulates findings during a run; sealed into a Verdict at the end.
struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn reject(&mut self, rejection: Rejection) {
        self.errors.push(rejection.to_string());
    }

    fn advise(&mut self, warning: Warning) {
        self.warnings.push(warning.to_string());
    }

    fn clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn seal(self, file_info: FileInfo) -> Verdict {
        Verdict {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            file_info,
        }
    }
}

// ── Preflight ────────────────────────────────────────────────────────────────

/// Entry point for validating uploads against order configurations.
///
/// Stateless apart from its configuration; one instance can validate any
/// number of independent uploads.
///
/// ```no_run
/// use printpreflight::{OrderConfig, Preflight, PreflightConfig, Upload};
///
/// # fn main() -> std::io::Result<()> {
/// let preflight = Preflight::with_config(PreflightConfig {
///     max_file_size: 25 * 1024 * 1024,
///     ..Default::default()
/// });
///
/// let mut upload = Upload::from_path("book.pdf")?;
/// let verdict = preflight.validate(&mut upload, &OrderConfig::default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Preflight {
    config: PreflightConfig,
}

impl Preflight {
    /// A preflight with the default configuration (PDF support on, 10 MiB
    /// size limit).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PreflightConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreflightConfig {
        &self.config
    }

    /// Validate one upload against one order configuration.
    ///
    /// Stages run in a fixed order: format check, book policy, size limit,
    /// dimension check, duplex parity. A book order with a non-PDF upload
    /// short-circuits the run; every other finding accumulates. The size and
    /// dimension stages only run while no error has been raised yet, so an
    /// already-rejected upload is not probed further.
    ///
    /// The upload's stream is rewound before each content-reading pass;
    /// validating the same upload twice yields the same verdict.
    pub fn validate<R: Read + Seek>(&self, upload: &mut Upload<R>, order: &OrderConfig) -> Verdict {
        let file_info = upload.file_info();
        let mut findings = Findings::new();

        debug!(
            "preflight start: file={} ext={} size={} is_book={} book_pages={:?}",
            file_info.name, file_info.extension, file_info.size, order.is_book, order.book_pages
        );

        // 1. Format check — always runs.
        if !ACCEPTED_EXTENSIONS.contains(&file_info.extension.as_str()) {
            findings.reject(Rejection::UnsupportedFormat(file_info.extension.clone()));
        }

        // 2. Book policy. A non-PDF upload for a book is the one fatal,
        // short-circuiting violation: nothing after it runs.
        if order.is_book {
            if file_info.extension != ".pdf" {
                findings.reject(Rejection::BookRequiresPdf);
                warn!(
                    "rejected book order: {} is {}, not .pdf",
                    file_info.name, file_info.extension
                );
                return findings.seal(file_info);
            }

            if let Some(expected_pages) = order.book_pages {
                self.check_page_count(upload, expected_pages, &mut findings);
            }
        }

        // 3. Size limit — only while nothing has been rejected yet.
        if findings.clean() && file_info.size > self.config.max_file_size {
            findings.reject(Rejection::FileTooLarge {
                size_mb: file_info.size as f64 / 1024.0 / 1024.0,
                limit_mb: self.config.max_file_size / 1024 / 1024,
            });
        }

        // 4. Dimension check — needs a size expectation, the PDF capability,
        // and a still-clean run.
        if let Some(expected) = order.expected_dimensions() {
            if self.config.pdf_support && findings.clean() {
                self.check_dimensions(upload, &file_info, expected, &mut findings);
            }
        }

        // 5. Duplex parity advisory.
        if order.duplex == Duplex::DoubleSided && order.is_book {
            if let Some(pages) = order.book_pages {
                if pages % 2 != 0 {
                    findings.advise(Warning::OddPageCountForDuplex);
                }
            }
        }

        if findings.clean() {
            debug!(
                "preflight accepted: file={} warnings={:?}",
                file_info.name, findings.warnings
            );
        } else {
            warn!(
                "preflight rejected: file={} errors={:?}",
                file_info.name, findings.errors
            );
        }

        findings.seal(file_info)
    }

    // ── Stage helpers ─────────────────────────────────────────────────────────

    /// Book page-count check. Unlike the dimension check, a missing PDF
    /// capability here is a hard error: the count cannot be verified, so the
    /// order cannot be accepted.
    fn check_page_count<R: Read + Seek>(
        &self,
        upload: &mut Upload<R>,
        expected: u32,
        findings: &mut Findings,
    ) {
        if !self.config.pdf_support {
            findings.reject(Rejection::ValidationUnavailable);
            return;
        }

        let bytes = match upload.read_all() {
            Ok(bytes) => bytes,
            Err(e) => {
                findings.reject(Rejection::UnreadablePdf(e.to_string()));
                return;
            }
        };

        match geometry::pdf_page_count(&bytes) {
            Err(reason) => findings.reject(Rejection::UnreadablePdf(reason)),
            Ok(actual) => {
                debug!("page count: file={actual} configured={expected}");
                // Exact comparison — no tolerance for page counts.
                if actual as u64 != u64::from(expected) {
                    findings.reject(Rejection::PageCountMismatch { actual, expected });
                }
            }
        }
    }

    /// Dimension check, dispatching to the PDF or image extractor on the
    /// extension. Extraction faults surface as the same user-facing error as
    /// a mismatch; the measurement detail goes to the log.
    fn check_dimensions<R: Read + Seek>(
        &self,
        upload: &mut Upload<R>,
        file_info: &FileInfo,
        expected: PhysicalSize,
        findings: &mut Findings,
    ) {
        let bytes = match upload.read_all() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("dimension check: cannot read upload stream: {e}");
                findings.reject(self.dimension_mismatch(file_info, expected));
                return;
            }
        };

        match file_info.extension.as_str() {
            ".pdf" => match geometry::check_pdf_dimensions(&bytes, expected) {
                DimensionReport::Failure(reason) => {
                    warn!("dimension check: {reason}");
                    findings.reject(Rejection::PdfDimensionMismatch { expected });
                }
                DimensionReport::Comparison {
                    matches, measured, ..
                } => {
                    debug!("PDF dimensions: found={measured} expected={expected}");
                    if !matches {
                        findings.reject(Rejection::PdfDimensionMismatch { expected });
                    }
                }
            },
            ".jpg" | ".jpeg" | ".png" => match geometry::check_image_dimensions(&bytes, expected) {
                DimensionReport::Failure(reason) => {
                    warn!("dimension check: {reason}");
                    findings.reject(Rejection::ImageDimensionMismatch { expected });
                }
                DimensionReport::Comparison {
                    matches,
                    measured,
                    dpi,
                    ..
                } => {
                    debug!("image dimensions: found={measured} expected={expected} dpi={dpi:?}");
                    if !matches {
                        findings.reject(Rejection::ImageDimensionMismatch { expected });
                    }
                    // The resolution advisory is independent of the match
                    // outcome.
                    if let Some(dpi) = dpi {
                        if dpi < MIN_RECOMMENDED_DPI {
                            findings.advise(Warning::LowResolution { dpi });
                        }
                    }
                }
            },
            // Unreachable in practice: an unsupported extension was rejected
            // in stage 1, which keeps this stage from running.
            _ => {}
        }
    }

    fn dimension_mismatch(&self, file_info: &FileInfo, expected: PhysicalSize) -> Rejection {
        if file_info.extension == ".pdf" {
            Rejection::PdfDimensionMismatch { expected }
        } else {
            Rejection::ImageDimensionMismatch { expected }
        }
    }
}
