//! Shared helpers for integration tests

use qpdf::QPdf;

/// Build a minimal n-page PDF entirely in memory.
///
/// Pages are US Letter sized and contentless; `parse_object` cannot resolve
/// indirect references in object text, so no content stream is attached.
pub fn sample_pdf(pages: u32) -> Vec<u8> {
    let qpdf = QPdf::empty();

    for _ in 0..pages {
        let page = qpdf
            .parse_object("<< /Type /Page /MediaBox [0 0 612 792] >>")
            .expect("page object");
        qpdf.add_page(&page, false).expect("add page");
    }

    let mut writer = qpdf.writer();
    writer.preserve_encryption(false);
    writer.write_to_memory().expect("serialize sample PDF")
}

/// Page count of a serialized PDF.
pub fn page_count(pdf_bytes: &[u8]) -> u32 {
    QPdf::read_from_memory(pdf_bytes)
        .expect("reopen PDF")
        .get_num_pages()
        .expect("page count")
}
