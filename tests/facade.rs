//! Fail-fast behavior of the facade: configuration errors surface at
//! construction with descriptive messages, never as silent no-ops.

use mushaf::{ComposeError, FontFace, MushafConfig, PageComposer};

#[test]
fn composer_without_a_font_fails_fast() {
    let config = MushafConfig::default();
    let result = PageComposer::from_config(&config);
    assert!(matches!(result, Err(ComposeError::MissingFont)));
}

#[test]
fn composer_with_a_missing_font_file_fails_fast() {
    let mut config = MushafConfig::default();
    config.layout.font = Some("/nonexistent/mushaf-madinah.ttf".into());
    let result = PageComposer::from_config(&config);
    assert!(matches!(result, Err(ComposeError::Font(_))));
}

#[test]
fn invalid_font_bytes_are_rejected() {
    let result = FontFace::from_vec(vec![0u8; 64], 0);
    assert!(result.is_err());
}

#[test]
fn error_messages_name_the_remedy() {
    let config = MushafConfig::default();
    let message = PageComposer::from_config(&config).unwrap_err().to_string();
    assert!(message.contains("MUSHAF_FONT"));
}
