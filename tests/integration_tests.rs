//! Integration tests for the airaware CLI

use std::process::Command;

fn airaware() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_airaware"));
    cmd.env("OPENWEATHER_API_KEY", "test_openweather_key")
        .env("GROQ_API_KEY", "test_groq_key")
        .env("RUST_LOG", "off");
    cmd
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = airaware()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("airaware"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("report"));
}

#[test]
fn test_report_help_lists_inputs() {
    let output = airaware()
        .args(["report", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--city", "--area", "--disease", "--out-dir", "--seed"] {
        assert!(stdout.contains(flag), "missing {flag}");
    }
}

#[test]
fn test_report_requires_all_inputs() {
    let output = airaware()
        .args(["report", "--city", "London", "--area", "Soho"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--disease"));
}

#[test]
fn test_report_rejects_blank_inputs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = airaware()
        .args(["report", "--city", "London", "--area", "   ", "--disease", "asthma"])
        .arg("--out-dir")
        .arg(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("must not be blank"));
}

#[test]
fn test_missing_api_keys_fail_at_startup() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "[server]\nport = 9000\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_airaware"))
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("GROQ_API_KEY")
        .env_remove("AIRAWARE_OPENWEATHER__API_KEY")
        .env_remove("AIRAWARE_ADVISORY__API_KEY")
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["report", "--city", "London", "--area", "Soho", "--disease", "asthma"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load configuration"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_writes_charts_and_echoes_submission() {
    use serde_json::json;
    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(path("/geo/1.0/direct"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"lat": 51.51, "lon": -0.13}])),
        )
        .mount(&server)
        .await;
    Mock::given(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"weather": [{"description": "clear sky"}]})),
        )
        .mount(&server)
        .await;
    Mock::given(path("/data/2.5/air_pollution"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"list": [{"components": {"pm2_5": 42.0}}]})),
        )
        .mount(&server)
        .await;
    Mock::given(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Stay indoors."}}]
        })))
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().unwrap();
    let out_dir = temp_dir.path().join("charts");
    let mut cmd = airaware();
    cmd.env("AIRAWARE_OPENWEATHER__BASE_URL", server.uri())
        .env("AIRAWARE_ADVISORY__BASE_URL", server.uri())
        .args(["report", "--city", "London", "--area", "Soho", "--disease", "asthma"])
        .args(["--seed", "42", "--out-dir"])
        .arg(&out_dir);

    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Air Aware report for Soho, London (asthma)"));
    assert!(stdout.contains("Weather: clear sky"));
    assert!(stdout.contains("AQI: 42.0"));
    assert!(stdout.contains("Stay indoors."));
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 5);
}
