use deckgen::{CliConfig, LocalStorage, ReportEngine, ReportError, ReportPipeline};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn config_for(input: &Path) -> CliConfig {
    CliConfig {
        config_file: input.to_string_lossy().into_owned(),
        output: None,
        verbose: false,
    }
}

async fn generate(dir: &TempDir, deck: &serde_json::Value) -> deckgen::Result<String> {
    let input = dir.path().join("deck.json");
    std::fs::write(&input, serde_json::to_vec_pretty(deck).unwrap()).unwrap();

    let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());
    let pipeline = ReportPipeline::new(storage, config_for(&input));
    ReportEngine::new(pipeline).run().await
}

fn read_part(archive: &mut zip::ZipArchive<std::fs::File>, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {}", name))
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[tokio::test]
async fn test_end_to_end_all_slide_types() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    write_png(&temp_dir.path().join("logo.png"), 80, 20);
    std::fs::write(temp_dir.path().join("data.txt"), "0;0\n1;1\n\n2;4\n3;9\n")?;

    let deck = serde_json::json!({
        "presentation": [
            {"type": "title", "title": "Quarterly Report", "content": "Q3 2024"},
            {"type": "text", "title": "Summary", "content": "Revenue up\nCosts down"},
            {"type": "list", "title": "Agenda", "content": [
                {"text": "Intro", "level": 1},
                {"text": "Details", "level": 2}
            ]},
            {"type": "picture", "title": "Logo", "content": "logo.png"},
            {"type": "plot", "title": "Growth", "content": "data.txt",
             "configuration": {"x-label": "Week", "y-label": "Users"}}
        ]
    });

    let output_path = generate(&temp_dir, &deck).await?;
    assert_eq!(output_path, temp_dir.path().join("deck.pptx").to_string_lossy());
    assert!(Path::new(&output_path).exists());

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&output_path)?)?;
    assert_eq!(archive.by_index(0)?.name(), "[Content_Types].xml");

    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert_eq!(presentation.matches("<p:sldId ").count(), 5);

    let title = read_part(&mut archive, "ppt/slides/slide1.xml");
    assert!(title.contains("<a:t>Quarterly Report</a:t>"));
    assert!(title.contains("<a:t>Q3 2024</a:t>"));

    let text = read_part(&mut archive, "ppt/slides/slide2.xml");
    assert!(text.contains("<a:t>Revenue up</a:t>"));
    assert!(text.contains("<a:t>Costs down</a:t>"));
    assert!(text.contains("<a:t>Revenue up</a:t></a:r><a:br>"));

    let list = read_part(&mut archive, "ppt/slides/slide3.xml");
    assert!(list.contains(r#"<a:pPr lvl="1"/>"#));
    assert!(list.contains(r#"<a:pPr lvl="2"/>"#));
    let list_rels = read_part(&mut archive, "ppt/slides/_rels/slide3.xml.rels");
    assert!(list_rels.contains("slideLayout2.xml"));

    let picture_rels = read_part(&mut archive, "ppt/slides/_rels/slide4.xml.rels");
    assert!(picture_rels.contains("../media/image1.png"));
    assert!(picture_rels.contains("slideLayout3.xml"));
    // 80x20 fills the 8in target width; two thirds of the spare height sit above it.
    let picture = read_part(&mut archive, "ppt/slides/slide4.xml");
    assert!(picture.contains(r#"<a:off x="914400" y="3352800"/><a:ext cx="7315200" cy="1828800"/>"#));

    let chart = read_part(&mut archive, "ppt/charts/chart1.xml");
    assert!(chart.contains("<c:scatterChart>"));
    assert!(chart.contains(r#"<c:ptCount val="4"/>"#));
    assert!(chart.contains("<a:t>Week</a:t>"));
    assert!(chart.contains("<a:t>Users</a:t>"));

    let content_types = read_part(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    assert!(content_types.contains("/ppt/charts/chart1.xml"));

    Ok(())
}

#[tokio::test]
async fn test_malformed_json_produces_no_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("deck.json");
    std::fs::write(&input, "{\"presentation\": [ {\"type\": ").unwrap();

    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let pipeline = ReportPipeline::new(storage, config_for(&input));
    let result = ReportEngine::new(pipeline).run().await;

    let err = result.unwrap_err();
    assert!(matches!(err, ReportError::ConfigFormatError { .. }));
    assert!(err
        .user_friendly_message()
        .starts_with("Invalid configuration file format"));
    assert!(!temp_dir.path().join("deck.pptx").exists());
}

#[tokio::test]
async fn test_unknown_slide_type_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let deck = serde_json::json!({
        "presentation": [
            {"type": "video", "src": "clip.mp4"},
            {"type": "text", "title": "Only", "content": "one slide"}
        ]
    });

    let output_path = generate(&temp_dir, &deck).await.unwrap();

    let mut archive = zip::ZipArchive::new(std::fs::File::open(output_path).unwrap()).unwrap();
    assert!(archive.by_name("ppt/slides/slide2.xml").is_err());
    let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
    assert!(slide.contains("<a:t>Only</a:t>"));
}

#[tokio::test]
async fn test_empty_presentation_is_valid_package() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = generate(&temp_dir, &serde_json::json!({"presentation": []}))
        .await
        .unwrap();

    let mut archive = zip::ZipArchive::new(std::fs::File::open(output_path).unwrap()).unwrap();
    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(!presentation.contains("<p:sldId "));
    assert!(archive.by_name("ppt/slideMasters/slideMaster1.xml").is_ok());
}

#[tokio::test]
async fn test_missing_picture_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let deck = serde_json::json!({
        "presentation": [{"type": "picture", "title": "Gone", "content": "missing.png"}]
    });

    let err = generate(&temp_dir, &deck).await.unwrap_err();
    assert!(matches!(err, ReportError::IoError(_)));
    assert!(!temp_dir.path().join("deck.pptx").exists());
}

#[tokio::test]
async fn test_bad_plot_line_reports_line_number() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("data.txt"), "1;2\n3,4\n").unwrap();
    let deck = serde_json::json!({
        "presentation": [{"type": "plot", "title": "P", "content": "data.txt",
                          "configuration": {"x-label": "x", "y-label": "y"}}]
    });

    match generate(&temp_dir, &deck).await {
        Err(ReportError::PlotDataError { line, .. }) => assert_eq!(line, 2),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_explicit_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("deck.json");
    std::fs::write(
        &input,
        r#"{"presentation": [{"type": "title", "title": "T", "content": "S"}]}"#,
    )
    .unwrap();

    let target = temp_dir.path().join("out/final.pptx");
    let config = CliConfig {
        output: Some(target.to_string_lossy().into_owned()),
        ..config_for(&input)
    };
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    let output_path = ReportEngine::new(ReportPipeline::new(storage, config))
        .run()
        .await
        .unwrap();

    assert_eq!(output_path, target.to_string_lossy());
    assert!(target.exists());
    assert!(!temp_dir.path().join("deck.pptx").exists());
}
