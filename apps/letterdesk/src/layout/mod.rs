// Page layout and PDF output.
// Implements: Helvetica text measurement, block-level pagination, PDF serialization via lopdf.
// Rendering is CPU-bound and runs inside tokio::task::spawn_blocking from the handlers.

pub mod font_metrics;
pub mod paginator;
pub mod pdf_writer;

pub use font_metrics::{a4_page, HelveticaLayout, PageGeometry, TextLayout};
pub use paginator::{paginate, pdf_filename};
pub use pdf_writer::{write_pdf, PdfError, PdfInfo};

/// Footer line printed on every PDF page and under the HTML preview.
pub const DISCLAIMER: &str =
    "This is a computer-generated document and does not require a physical signature.";
