use lopdf::Document;

use workroom_edge::application::ports::{PdfSplitter, SplitError};
use workroom_edge::application::services::PageSource;
use workroom_edge::domain::ChunkLimits;
use workroom_edge::infrastructure::text_processing::{LopdfPageSource, LopdfSplitter};

use crate::helpers::fixtures::pdf_fixture;

fn page_count(payload: &[u8]) -> usize {
    Document::load_mem(payload).unwrap().get_pages().len()
}

#[test]
fn given_pdf_when_loading_page_source_then_counts_pages() {
    let source = LopdfPageSource::load(&pdf_fixture(4)).unwrap();

    assert_eq!(source.page_count(), 4);
}

#[test]
fn given_page_range_when_serializing_then_payload_holds_only_those_pages() {
    let source = LopdfPageSource::load(&pdf_fixture(5)).unwrap();

    let payload = source.serialize_range(1, 3).unwrap();

    assert_eq!(page_count(&payload), 3);
}

#[test]
fn given_page_ceiling_when_splitting_then_each_chunk_is_a_standalone_pdf() {
    let chunks = LopdfSplitter
        .split(&pdf_fixture(5), ChunkLimits::new(1024 * 1024, 2))
        .unwrap();

    let ranges: Vec<(usize, usize)> = chunks.iter().map(|c| (c.start_page, c.page_count)).collect();
    assert_eq!(ranges, vec![(0, 2), (2, 2), (4, 1)]);
    for chunk in &chunks {
        assert_eq!(page_count(&chunk.payload), chunk.page_count);
    }
}

#[test]
fn given_byte_ceiling_below_single_page_when_splitting_then_fails() {
    let result = LopdfSplitter.split(&pdf_fixture(2), ChunkLimits::new(64, 10));

    assert!(matches!(
        result,
        Err(SplitError::ChunkTooLarge { page: 1, limit: 64, .. })
    ));
}

#[test]
fn given_bytes_that_are_not_a_pdf_when_splitting_then_reports_invalid_pdf() {
    let result = LopdfSplitter.split(b"not a pdf", ChunkLimits::default());

    assert!(matches!(result, Err(SplitError::InvalidPdf(_))));
}
