//! CLI command and configuration tests against fixture files.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use pawfect::cli::{
    check_fixture, cmd_check, cmd_format_phone, cmd_sample, inspect_fixture, load_fixture,
    search_fixture, submit_fixture,
};
use pawfect::config::RuntimeConfig;
use pawfect::runtime::SimulatedTransport;
use pawfect_core::primitives::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
use pawfect_core::{
    InvalidReason, NodeFixture, PageFixture, PageKind, PawfectError, SubmissionOutcome,
    SubmitPhase, Validity, sample_contact_page,
};
use std::time::Duration;
use tempfile::TempDir;

/// Set the value of the node with DOM id `id`, wherever it is.
fn set_value(nodes: &mut [NodeFixture], id: &str, value: &str) -> bool {
    for node in nodes {
        if node.id.as_deref() == Some(id) {
            node.value = value.to_string();
            return true;
        }
        if set_value(&mut node.children, id, value) {
            return true;
        }
    }
    false
}

fn filled_fixture(email: &str) -> PageFixture {
    let mut fixture = sample_contact_page();
    for (id, value) in [
        ("name", "Sipho"),
        ("email", email),
        ("phone", "+27 11 123 4567"),
        ("pet", "dog"),
    ] {
        assert!(set_value(&mut fixture.body, id, value));
    }
    fixture
}

fn write_fixture(dir: &TempDir, name: &str, fixture: &PageFixture) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, fixture.to_json().unwrap()).unwrap();
    path
}

// =============================================================================
// SAMPLE / LOAD
// =============================================================================

#[test]
fn test_sample_written_and_reloaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");

    cmd_sample(&path, false).unwrap();
    let fixture = load_fixture(&path).unwrap();

    assert_eq!(fixture, sample_contact_page());
}

#[test]
fn test_sample_refuses_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contact.json");
    std::fs::write(&path, "{}").unwrap();

    let result = cmd_sample(&path, false);
    assert!(matches!(result, Err(PawfectError::InvalidArgument(_))));

    cmd_sample(&path, true).unwrap();
    assert_eq!(load_fixture(&path).unwrap(), sample_contact_page());
}

#[test]
fn test_load_missing_and_malformed_fixture() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        load_fixture(&dir.path().join("absent.json")),
        Err(PawfectError::IoError(_))
    ));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{\"body\": [{\"tag\": 3}]}").unwrap();
    assert!(matches!(load_fixture(&bad), Err(PawfectError::InvalidFixture(_))));

    assert!(matches!(load_fixture(dir.path()), Err(PawfectError::IoError(_))));
}

// =============================================================================
// CHECK
// =============================================================================

#[test]
fn test_check_blank_sample_reports_required_fields() {
    let report = check_fixture(&sample_contact_page()).unwrap();
    let verdict = |id: &str| report.iter().find(|f| f.id.as_str() == id).unwrap().validity;

    assert_eq!(verdict("name"), Validity::Invalid(InvalidReason::Required));
    assert_eq!(verdict("email"), Validity::Invalid(InvalidReason::BadEmailFormat));
    assert_eq!(verdict("pet"), Validity::Invalid(InvalidReason::MissingSelection));
    assert_eq!(verdict("phone"), Validity::Valid);
    assert_eq!(verdict("message"), Validity::Valid);
}

#[test]
fn test_check_filled_fixture_is_valid() {
    let report = check_fixture(&filled_fixture("sipho@example.com")).unwrap();
    assert!(report.iter().all(|f| f.validity.is_valid()));
}

#[test]
fn test_check_without_form() {
    let fixture = PageFixture::from_json(br#"{"body":[{"tag":"p","text":"hello"}]}"#).unwrap();
    assert!(matches!(check_fixture(&fixture), Err(PawfectError::FormNotFound(_))));
}

#[test]
fn test_cmd_check_and_format_phone_succeed() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "filled.json", &filled_fixture("sipho@example.com"));

    cmd_check(&path, true).unwrap();
    cmd_check(&path, false).unwrap();
    cmd_format_phone("0111234567", false).unwrap();
    cmd_format_phone("0111234567", true).unwrap();
}

// =============================================================================
// SUBMIT
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_submit_success_resets_form() {
    let config = RuntimeConfig::default();
    let summary = submit_fixture(
        &filled_fixture("sipho@example.com"),
        SimulatedTransport::from_config(&config),
        &config,
    )
    .await
    .unwrap();

    assert_eq!(
        summary.outcome,
        Some(SubmissionOutcome::Success(SUCCESS_MESSAGE.to_string()))
    );
    assert_eq!(summary.banner.as_deref(), Some(SUCCESS_MESSAGE));
    assert_eq!(summary.phase, SubmitPhase::Idle);
    assert_eq!(summary.trigger_label.as_deref(), Some("Send Message"));
    assert!(!summary.trigger_disabled);
    assert!(summary.values.iter().all(|(_, v)| v.is_empty()));
    assert_eq!(summary.form_error, None);
}

#[tokio::test(start_paused = true)]
async fn test_submit_failure_keeps_values() {
    let config = RuntimeConfig::default();
    let summary = submit_fixture(
        &filled_fixture("sipho@example.com"),
        SimulatedTransport::failing(Duration::from_millis(2000)),
        &config,
    )
    .await
    .unwrap();

    assert_eq!(
        summary.outcome,
        Some(SubmissionOutcome::Failure(FAILURE_MESSAGE.to_string()))
    );
    assert_eq!(summary.form_error.as_deref(), Some(FAILURE_MESSAGE));
    assert_eq!(summary.banner, None);
    assert!(
        summary
            .values
            .iter()
            .any(|(id, v)| id.as_str() == "email" && v == "sipho@example.com")
    );
}

#[tokio::test(start_paused = true)]
async fn test_submit_invalid_is_rejected() {
    let config = RuntimeConfig::default();
    let summary = submit_fixture(
        &filled_fixture("sipho@"),
        SimulatedTransport::from_config(&config),
        &config,
    )
    .await
    .unwrap();

    assert_eq!(summary.outcome, None);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].1, InvalidReason::BadEmailFormat);
    assert_eq!(summary.trigger_label.as_deref(), Some("Send Message"));
}

// =============================================================================
// SEARCH / INSPECT
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_search_fixture() {
    let fixture = PageFixture::from_json(
        br#"{
            "path": "/SERVICES.html",
            "body": [
                {"tag": "input", "id": "search"},
                {"tag": "div", "id": "results"},
                {"tag": "h2", "text": "Grooming"},
                {"tag": "ul", "children": [
                    {"tag": "li", "text": "Grooming for dogs"},
                    {"tag": "li", "text": "Nail clipping"}
                ]}
            ]
        }"#,
    )
    .unwrap();

    let hits = search_fixture(&fixture, "GROOM").await.unwrap();
    let titles: Vec<_> = hits.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["H2", "LI"]);

    assert!(search_fixture(&fixture, "g").await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_search_requires_search_box() {
    let result = search_fixture(&sample_contact_page(), "vet").await;
    assert!(matches!(result, Err(PawfectError::InvalidArgument(_))));
}

#[tokio::test(start_paused = true)]
async fn test_inspect_contact_and_override_path() {
    let config = RuntimeConfig::default();
    let fixture = sample_contact_page();

    let report = inspect_fixture(&fixture, None, true, &config).await.unwrap();
    assert_eq!(report.kind, PageKind::Contact);
    assert!(report.widgets.contains(&"contact-form"));
    assert!(report.map.is_some());

    let report = inspect_fixture(&fixture, Some("/ABOUT_US.html"), true, &config)
        .await
        .unwrap();
    assert_eq!(report.kind, PageKind::About);
    assert!(!report.widgets.contains(&"contact-form"));
    assert_eq!(report.map, None);
}

// =============================================================================
// CONFIG FILES
// =============================================================================

#[test]
fn test_config_file_loading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pawfect.toml");
    std::fs::write(&path, "submit_latency_ms = 250\nsimulate_failure = true\n").unwrap();

    let config = RuntimeConfig::resolve(Some(&path)).unwrap();
    assert_eq!(config.submit_latency(), Duration::from_millis(250));
    assert!(config.simulate_failure);
    assert_eq!(config.banner_display_ms, 5000);
}

#[test]
fn test_config_file_with_unknown_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pawfect.toml");
    std::fs::write(&path, "latency = 1\n").unwrap();

    assert!(matches!(
        RuntimeConfig::resolve(Some(&path)),
        Err(PawfectError::ConfigError(_))
    ));
}
