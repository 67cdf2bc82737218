// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use procommit::config::{ApproveMethod, Config, Generator};
use procommit::domain::Language;
use procommit::error::Error;

// ─── Default values ──────────────────────────────────────────────────────────

#[test]
fn default_config_values() {
    let config = Config::default();
    assert_eq!(config.generator, Generator::ChatGpt);
    assert_eq!(config.language, Language::English);
    assert!(config.include_file_extension);
    assert!(!config.use_multiple_results);
    assert_eq!(config.message_approve_method, ApproveMethod::QuickPick);
    assert!(config.api_key.is_none());
    assert!(config.endpoint.is_none());
    assert_eq!(config.model(), "gpt-4o-mini");
    assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.max_tokens, 196);
    assert_eq!(config.timeout_secs, 300);
}

#[test]
fn model_defaults_follow_generator() {
    let model_for = |generator| {
        Config {
            generator,
            ..Config::default()
        }
        .model()
        .to_string()
    };
    assert_eq!(model_for(Generator::Gemini), "gemini-2.5-flash");
    assert_eq!(model_for(Generator::Ollama), "llama3.2");
    assert_eq!(model_for(Generator::LmStudio), "local-model");
}

#[test]
fn blank_model_uses_default() {
    let config = Config {
        generator: Generator::Ollama,
        model: Some("  ".into()),
        ..Config::default()
    };
    assert_eq!(config.model(), "llama3.2");
}

// ─── TOML deserialization ────────────────────────────────────────────────────

#[test]
fn load_from_valid_toml() {
    let toml_str = r#"
generator = "ollama"
language = "japanese"
include_file_extension = false
use_multiple_results = true
message_approve_method = "message-file"
endpoint = "http://gpu-box:11434"
model = "qwen3:4b"
temperature = 0.7
max_tokens = 512
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.generator, Generator::Ollama);
    assert_eq!(config.language, Language::Japanese);
    assert!(!config.include_file_extension);
    assert!(config.use_multiple_results);
    assert_eq!(config.message_approve_method, ApproveMethod::MessageFile);
    assert_eq!(config.endpoint(), Some("http://gpu-box:11434"));
    assert_eq!(config.model(), "qwen3:4b");
    assert_eq!(config.max_tokens, 512);
    assert_eq!(config.timeout_secs, 300);
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    let default = Config::default();
    assert_eq!(config.generator, default.generator);
    assert_eq!(config.model(), default.model());
    assert_eq!(config.max_tokens, default.max_tokens);
}

#[test]
fn unknown_and_legacy_generators_fall_back_to_chatgpt() {
    for name in ["smithery", "autocommit", "something-else", ""] {
        let config: Config = toml::from_str(&format!("generator = {name:?}")).unwrap();
        assert_eq!(config.generator, Generator::ChatGpt, "generator {name:?}");
    }
}

#[test]
fn generator_names_are_case_insensitive() {
    assert_eq!(Generator::from_name("Gemini"), Generator::Gemini);
    assert_eq!(Generator::from_name(" OLLAMA "), Generator::Ollama);
    assert_eq!(Generator::from_name("LM Studio"), Generator::LmStudio);
    assert_eq!(Generator::from_name("custom"), Generator::Custom);
}

#[test]
fn generator_display_round_trips_through_from_name() {
    for name in Generator::NAMES {
        assert_eq!(Generator::from_name(name).to_string(), *name);
    }
}

#[test]
fn language_parsing() {
    assert_eq!("German".parse::<Language>(), Ok(Language::German));
    assert_eq!("ko".parse::<Language>(), Ok(Language::Korean));
    assert!("klingon".parse::<Language>().is_err());
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let cases = [
        Config {
            temperature: 2.5,
            ..Config::default()
        },
        Config {
            max_tokens: 0,
            ..Config::default()
        },
        Config {
            max_tokens: 40_000,
            ..Config::default()
        },
        Config {
            timeout_secs: 0,
            ..Config::default()
        },
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(Error::Config(_))),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn validate_endpoint_scheme() {
    let bad = Config {
        endpoint: Some("ftp://example.com".into()),
        ..Config::default()
    };
    let err = bad.validate().unwrap_err();
    assert!(err.to_string().contains("http:// or https://"), "{err}");

    let not_a_url = Config {
        endpoint: Some("localhost:11434 /api".into()),
        ..Config::default()
    };
    assert!(not_a_url.validate().is_err());

    let good = Config {
        endpoint: Some("https://llm.internal/v1".into()),
        ..Config::default()
    };
    assert!(good.validate().is_ok());
}

#[test]
fn blank_endpoint_is_ignored() {
    let config = Config {
        endpoint: Some("   ".into()),
        ..Config::default()
    };
    assert_eq!(config.endpoint(), None);
    assert!(config.validate().is_ok());
}

#[test]
fn api_key_is_masked() {
    let mut config = Config::default();
    assert_eq!(config.masked_api_key(), "(not set)");
    config.api_key = Some("short".into());
    assert_eq!(config.masked_api_key(), "****");
    config.api_key = Some("sk-test-1234567890abcd".into());
    assert_eq!(config.masked_api_key(), "****abcd");
}

// ─── `procommit set` ─────────────────────────────────────────────────────────

#[test]
fn set_value_creates_and_updates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    Config::set_value(&path, "generator", "Gemini").unwrap();
    Config::set_value(&path, "temperature", "0.5").unwrap();
    Config::set_value(&path, "include_file_extension", "false").unwrap();
    Config::set_value(&path, "language", "russian").unwrap();

    let config: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config.generator, Generator::Gemini);
    assert!((config.temperature - 0.5).abs() < f32::EPSILON);
    assert!(!config.include_file_extension);
    assert_eq!(config.language, Language::Russian);
}

#[test]
fn set_value_blank_clears_optional_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    Config::set_value(&path, "model", "llama3.1:8b").unwrap();
    Config::set_value(&path, "model", "").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("model"), "{content}");
}

#[test]
fn set_value_rejects_invalid_input_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    Config::set_value(&path, "max_tokens", "256").unwrap();

    let cases = [
        ("temperature", "9.0"),
        ("temperature", "warm"),
        ("generator", "smithery"),
        ("message_approve_method", "telepathy"),
        ("endpoint", "not a url"),
        ("colour", "blue"),
    ];
    for (key, value) in cases {
        assert!(
            matches!(Config::set_value(&path, key, value), Err(Error::Config(_))),
            "{key} = {value} should be rejected"
        );
    }

    let config: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config.max_tokens, 256);
    assert!((config.temperature - 0.2).abs() < f32::EPSILON);
}

#[cfg(unix)]
#[test]
fn set_value_restricts_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    Config::set_value(&path, "api_key", "sk-secret").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
