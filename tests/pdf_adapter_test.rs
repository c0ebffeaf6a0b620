use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};

use pdf_summarizer::application::ports::{FileLoader, FileLoaderError, LoadedDocument};
use pdf_summarizer::domain::Document;
use pdf_summarizer::infrastructure::text_processing::PdfAdapter;

/// Builds an in-memory PDF with one line of text per page.
fn build_pdf(page_texts: &[String]) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_texts.len());
    for text in page_texts {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text.as_str())]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_texts.len() as i64),
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn page_texts(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Hello from page {i}")).collect()
}

const MAX_PAGES: usize = 15;

fn document(data: &[u8]) -> Document {
    Document::new("sample.pdf".to_string(), data.len() as u64)
}

#[tokio::test]
async fn given_two_page_pdf_when_loading_then_returns_page_count_and_text() {
    let adapter = PdfAdapter::new();
    let pdf = build_pdf(&page_texts(2));

    let loaded = adapter.load(&pdf, &document(&pdf), MAX_PAGES).await.unwrap();

    let LoadedDocument::Extracted { page_count, text } = loaded else {
        panic!("expected extracted text for a two page document");
    };
    assert_eq!(page_count, 2);
    assert!(text.contains("Hello"));
}

#[tokio::test]
async fn given_sixteen_page_pdf_when_loading_then_reports_over_page_limit() {
    let adapter = PdfAdapter::new();
    let pdf = build_pdf(&page_texts(16));

    let loaded = adapter.load(&pdf, &document(&pdf), MAX_PAGES).await.unwrap();

    assert_eq!(loaded, LoadedDocument::OverPageLimit { page_count: 16 });
}

#[tokio::test]
async fn given_pdf_at_page_limit_when_loading_then_extracts_text() {
    let adapter = PdfAdapter::new();
    let pdf = build_pdf(&page_texts(15));

    let loaded = adapter.load(&pdf, &document(&pdf), MAX_PAGES).await.unwrap();

    assert!(matches!(
        loaded,
        LoadedDocument::Extracted { page_count: 15, .. }
    ));
}

#[tokio::test]
async fn given_corrupt_bytes_when_loading_then_returns_extraction_failed() {
    let adapter = PdfAdapter::new();
    let garbage = b"not a pdf at all";

    let result = adapter.load(garbage, &document(garbage), MAX_PAGES).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}
