//! Integration tests for the command implementations.

use std::fs;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use toolbox_cli::commands::{
    PanelInput, list_table, mime_for_path, panel_table, panel_view, qr_decode, qr_encode,
    read_input, run_tool,
};
use toolbox_core::{BufferRenderer, ToolRegistry};
use toolbox_model::{ErrorKind, Mode, QrOptions};

fn registry() -> Arc<ToolRegistry> {
    Arc::new(ToolRegistry::builtin().unwrap())
}

// ============================================================================
// list / run
// ============================================================================

#[test]
fn test_list_table_covers_catalog() {
    let rendered = list_table(&registry()).to_string();
    assert!(rendered.contains("json"));
    assert!(rendered.contains("qrcode"));
    assert!(rendered.contains("Color Converter"));
    assert!(rendered.contains("panel"));
}

#[tokio::test]
async fn test_run_tool_reads_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.json");
    fs::write(&path, r#"{"a":1}"#).unwrap();

    let input = read_input(Some(&path)).unwrap();
    let mut renderer = BufferRenderer::new();
    run_tool(registry(), "json", input, Mode::Encode, &mut renderer)
        .await
        .unwrap();

    assert_eq!(renderer.last_content(), Some("{\n  \"a\": 1\n}"));
    assert!(renderer.errors.is_empty());
    assert_eq!(renderer.metadata.last().unwrap().tool_id, "json");
}

#[tokio::test]
async fn test_run_tool_failure_is_rendered_not_returned() {
    let mut renderer = BufferRenderer::new();
    run_tool(registry(), "json", "{".to_string(), Mode::Encode, &mut renderer)
        .await
        .unwrap();

    assert!(renderer.outputs.is_empty());
    let error = &renderer.errors[0];
    assert_eq!(error.kind, ErrorKind::Validation);
    assert!(error.message.starts_with("Invalid JSON: "));
}

#[tokio::test]
async fn test_run_tool_decode_mode() {
    let mut renderer = BufferRenderer::new();
    run_tool(registry(), "base64", "aGVsbG8=".to_string(), Mode::Decode, &mut renderer)
        .await
        .unwrap();
    assert_eq!(renderer.last_content(), Some("hello"));
}

#[tokio::test]
async fn test_run_tool_rejects_host_errors() {
    let mut renderer = BufferRenderer::new();
    let unknown = run_tool(registry(), "nope", String::new(), Mode::Encode, &mut renderer).await;
    assert!(unknown.unwrap_err().to_string().contains("unknown tool 'nope'"));

    let panel = run_tool(registry(), "color", "#fff".to_string(), Mode::Encode, &mut renderer).await;
    assert!(panel.unwrap_err().to_string().contains("live panel"));

    let single = run_tool(registry(), "hash", "x".to_string(), Mode::Decode, &mut renderer).await;
    assert!(single.is_err());
    assert!(renderer.outputs.is_empty() && renderer.errors.is_empty());
}

// ============================================================================
// panel
// ============================================================================

#[test]
fn test_panel_view_color() {
    let view = panel_view(&registry(), "color", &PanelInput::Value("#1E90FF".into())).unwrap();
    let formats = view.section("Formats").unwrap();
    assert_eq!(formats.get("HSL"), Some("hsl(210, 100%, 56%)"));

    let rendered = panel_table(&view).to_string();
    assert!(rendered.contains("Variations"));
    assert!(rendered.contains("ANSI256"));
}

#[test]
fn test_panel_view_reports_bad_input() {
    let error = panel_view(&registry(), "color", &PanelInput::Value("nope".into())).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Unsupported color format. Use HEX, RGB, or HSL"
    );
    assert!(panel_view(&registry(), "json", &PanelInput::Value("{}".into())).is_err());
}

#[tokio::test]
async fn test_panel_view_loads_image_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("code.png");
    qr_encode("panel".to_string(), QrOptions::default(), Some(&path))
        .await
        .unwrap();

    let view = panel_view(&registry(), "base64-image", &PanelInput::File(path.clone())).unwrap();
    let image = view.section("Image").unwrap();
    assert_eq!(image.get("Type"), Some("image/png"));
    assert!(image.get("Dimensions").is_some());
    assert!(view.preview.unwrap().starts_with("data:image/png;base64,"));

    let error = panel_view(&registry(), "number-base", &PanelInput::File(path)).unwrap_err();
    assert_eq!(error.to_string(), "The number-base panel does not accept files");
}

#[test]
fn test_mime_for_path() {
    assert_eq!(mime_for_path("a/B.JPG".as_ref()), "image/jpeg");
    assert_eq!(mime_for_path("plain".as_ref()), "application/octet-stream");
}

// ============================================================================
// qr
// ============================================================================

#[tokio::test]
async fn test_qr_encode_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("qr.png");

    let printed = qr_encode("https://example.com".to_string(), QrOptions::default(), Some(&path))
        .await
        .unwrap();
    assert!(printed.is_none());
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn test_qr_encode_prints_data_url() {
    let data_url = qr_encode("hello".to_string(), QrOptions::default(), None)
        .await
        .unwrap()
        .unwrap();
    assert!(data_url.starts_with("data:image/png;base64,"));

    assert!(qr_encode("  ".to_string(), QrOptions::default(), None).await.is_err());
}

#[tokio::test]
async fn test_qr_decode_raw_pixels_from_file() {
    let options = QrOptions::new().with_size(None, None).with_scale(4);
    let image = toolbox_qr::encode("toolbox", &options).unwrap();
    let data_url = format!(
        "data:image/raw;base64,{}",
        STANDARD.encode(image.pixels().as_bytes())
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("code.txt");
    fs::write(&path, format!("{data_url}\n")).unwrap();

    let decoded = qr_decode(&path).await.unwrap();
    assert_eq!(decoded.text, "toolbox");
}

#[tokio::test]
async fn test_qr_decode_rejects_non_images() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes.bin");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    assert!(qr_decode(&path).await.is_err());

    let missing = dir.path().join("missing.txt");
    assert!(qr_decode(&missing).await.is_err());
}
