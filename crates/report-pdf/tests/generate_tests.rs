//! End-to-end generation: document bytes, page counts, progress contract,
//! file output.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, Rgb};
use report_pdf::{
    GenerationOptions, HeaderMetadata, ImageRef, ProgressReporter, ProgressStage, ProgressUpdate,
    ReportEntry, ReportError, TemplateId, generate, generate_to_file,
};
use tokio::sync::mpsc::UnboundedReceiver;

fn photo_uri(width: u32, height: u32) -> ImageRef {
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 251) as u8, (y % 251) as u8, 64u8])
    });
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 90)
        .encode_image(&buffer)
        .unwrap();
    ImageRef::DataUri(format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg)))
}

fn text_entries(count: usize) -> Vec<ReportEntry> {
    (0..count)
        .map(|i| ReportEntry::new(format!("Location {i}"), format!("Observation {i}")))
        .collect()
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
}

fn drain(receiver: &mut UnboundedReceiver<ProgressUpdate>) -> Vec<ProgressUpdate> {
    let mut updates = Vec::new();
    while let Ok(update) = receiver.try_recv() {
        updates.push(update);
    }
    updates
}

#[tokio::test]
async fn test_four_entries_make_one_page() {
    let options = GenerationOptions::default();
    let bytes = generate(&text_entries(4), &options, &ProgressReporter::disabled())
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(page_count(&bytes), 1);
}

#[tokio::test]
async fn test_fifth_entry_makes_two_pages() {
    let options = GenerationOptions::default();
    let bytes = generate(&text_entries(5), &options, &ProgressReporter::disabled())
        .await
        .unwrap();
    assert_eq!(page_count(&bytes), 2);
}

#[tokio::test]
async fn test_exact_capacity_has_no_trailing_page() {
    let options = GenerationOptions::default();
    let bytes = generate(&text_entries(8), &options, &ProgressReporter::disabled())
        .await
        .unwrap();
    assert_eq!(page_count(&bytes), 2);
}

#[tokio::test]
async fn test_page_math_across_all_templates() {
    for id in TemplateId::ALL {
        let options = GenerationOptions {
            template: id.as_str().to_string(),
            ..Default::default()
        };
        let entries = text_entries(id.spec().entries_per_page() + 1);
        let bytes = generate(&entries, &options, &ProgressReporter::disabled())
            .await
            .unwrap();
        assert_eq!(page_count(&bytes), 2, "{id:?}");
    }
}

#[tokio::test]
async fn test_no_entries_is_an_error() {
    let options = GenerationOptions::default();
    let (reporter, mut receiver) = ProgressReporter::channel();
    let result = generate(&[], &options, &reporter).await;
    drop(reporter);

    assert!(matches!(result, Err(ReportError::NoEntries)));
    // Failing before the pipeline starts means no progress events either
    assert!(drain(&mut receiver).is_empty());
}

#[tokio::test]
async fn test_unknown_template_degrades_to_default() {
    let options = GenerationOptions {
        template: "Letter9x9".to_string(),
        ..Default::default()
    };
    let bytes = generate(&text_entries(5), &options, &ProgressReporter::disabled())
        .await
        .unwrap();
    // Default 2x2 grid: 5 entries on 2 pages
    assert_eq!(page_count(&bytes), 2);
}

#[tokio::test]
async fn test_photos_and_placeholders_mix() {
    let entries = vec![
        ReportEntry::new("Kitchen", "Leak under sink")
            .with_photo(photo_uri(320, 240))
            .with_timestamp("3/7/2025, 14:05"),
        ReportEntry::new("Roof", "Missing tiles").with_photo(photo_uri(120, 400)),
        ReportEntry::new("Garage", "Photo lost").with_photo(ImageRef::Path("/no/such.jpg".into())),
        ReportEntry::new("Attic", "No photo taken"),
    ];
    let options = GenerationOptions {
        header: HeaderMetadata {
            company: Some("Acme Inspections".to_string()),
            type_of_report: Some("Annual Survey".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let bytes = generate(&entries, &options, &ProgressReporter::disabled())
        .await
        .unwrap();
    assert_eq!(page_count(&bytes), 1);
}

#[tokio::test]
async fn test_minimal_header_document() {
    let options = GenerationOptions {
        include_header: false,
        ..Default::default()
    };
    let bytes = generate(&text_entries(3), &options, &ProgressReporter::disabled())
        .await
        .unwrap();
    assert_eq!(page_count(&bytes), 1);
}

#[tokio::test]
async fn test_progress_contract_with_photos() {
    let entries = vec![
        ReportEntry::new("Kitchen", "").with_photo(photo_uri(100, 80)),
        ReportEntry::new("Roof", ""),
        ReportEntry::new("Deck", "").with_photo(photo_uri(80, 100)),
    ];
    let (reporter, mut receiver) = ProgressReporter::channel();
    generate(&entries, &GenerationOptions::default(), &reporter)
        .await
        .unwrap();
    drop(reporter);

    let updates = drain(&mut receiver);
    for pair in updates.windows(2) {
        assert!(pair[0].stage <= pair[1].stage, "stages went backward");
    }

    let messages: Vec<&str> = updates.iter().map(|u| u.message.as_str()).collect();
    assert_eq!(messages.first(), Some(&"Starting PDF generation..."));
    assert!(messages.contains(&"Processing images..."));
    assert!(messages.contains(&"Processing image 1 of 2"));
    assert!(messages.contains(&"Processing image 2 of 2"));
    assert!(messages.contains(&"Image processing complete."));
    assert!(messages.contains(&"Generating PDF content..."));
    assert_eq!(messages.last(), Some(&"PDF generated successfully!"));

    // Byte-only generation never reports the file-handling stages
    assert!(updates.iter().all(|u| u.stage != ProgressStage::Creating));
    assert!(updates.iter().all(|u| u.stage != ProgressStage::Sharing));
    assert_eq!(updates.last().unwrap().stage, ProgressStage::Complete);
}

#[tokio::test]
async fn test_progress_without_photos() {
    let (reporter, mut receiver) = ProgressReporter::channel();
    generate(&text_entries(2), &GenerationOptions::default(), &reporter)
        .await
        .unwrap();
    drop(reporter);

    let updates = drain(&mut receiver);
    let compressing: Vec<&ProgressUpdate> = updates
        .iter()
        .filter(|u| u.stage == ProgressStage::Compressing)
        .collect();
    assert_eq!(compressing.len(), 1);
    assert_eq!(compressing[0].message, "No images to process.");
    assert_eq!(compressing[0].percent, Some(100));
    assert_eq!(compressing[0].total, Some(0));
}

#[tokio::test]
async fn test_generate_to_file_writes_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");

    let (reporter, mut receiver) = ProgressReporter::channel();
    generate_to_file(&text_entries(4), &GenerationOptions::default(), &path, &reporter)
        .await
        .unwrap();
    drop(reporter);

    let bytes = tokio::fs::read(&path).await.unwrap();
    assert_eq!(page_count(&bytes), 1);

    let updates = drain(&mut receiver);
    let messages: Vec<&str> = updates.iter().map(|u| u.message.as_str()).collect();
    assert!(messages.contains(&"Creating PDF file..."));
    assert!(messages.contains(&"Preparing to share PDF..."));
    assert_eq!(messages.last(), Some(&"PDF generated successfully!"));
    assert_eq!(updates.last().unwrap().stage, ProgressStage::Complete);
}

#[tokio::test]
async fn test_empty_template_string_fails_validation() {
    let options = GenerationOptions {
        template: String::new(),
        ..Default::default()
    };
    let result = generate(&text_entries(1), &options, &ProgressReporter::disabled()).await;
    assert!(matches!(result, Err(ReportError::Config(_))));
}
