pub mod error;
pub mod mode;
pub mod options;
pub mod result;

pub use error::{ErrorKind, Result, ToolError};
pub use mode::{Category, Labels, Mode, OutputKind, PerMode};
pub use options::{EcLevel, LoremOptions, QrOptions, RandomStringOptions, UuidOptions};
pub use result::{TransformError, TransformOutput, TransformResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_keeps_context_prefix() {
        let error = ToolError::validation("Invalid JSON", "expected value at line 1");
        assert_eq!(error.to_string(), "Invalid JSON: expected value at line 1");
        assert_eq!(error.kind(), ErrorKind::Validation);

        let failure = TransformError::from(error);
        assert_eq!(failure.message, "Invalid JSON: expected value at line 1");
        assert_eq!(failure.kind, ErrorKind::Validation);
    }

    #[test]
    fn per_mode_selects_by_mode() {
        let languages = PerMode::new("yaml", "json");
        assert_eq!(languages.get(Mode::Encode), "yaml");
        assert_eq!(languages.get(Mode::Decode), "json");
        assert_eq!(Mode::Encode.flipped(), Mode::Decode);
    }

    #[test]
    fn random_string_options_default_missing_fields() {
        let options: RandomStringOptions =
            serde_json::from_str(r#"{"length": 8, "numbers": true}"#).expect("parse options");
        assert_eq!(options.length, 8);
        assert!(options.lowercase);
        assert!(options.numbers);
        assert!(!options.uppercase);
        assert!(!options.special);
    }

    #[test]
    fn qr_options_use_camel_case_keys() {
        let options: QrOptions =
            serde_json::from_str(r#"{"errorCorrectionLevel": "H", "margin": 2}"#)
                .expect("parse options");
        assert_eq!(options.error_correction_level, EcLevel::H);
        assert_eq!(options.margin, 2);
        assert_eq!(options.scale, 8);
        assert_eq!(options.target_size(), Some(300));
        assert_eq!("q".parse::<EcLevel>(), Ok(EcLevel::Q));
    }
}
