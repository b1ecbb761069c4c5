//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Each command has a pure-ish worker (`check_fixture`, `submit_fixture`,
//! ...) returning a serializable report, and a `cmd_*` wrapper that loads
//! the fixture and prints the report.

use crate::config::RuntimeConfig;
use crate::runtime::{FormController, SimulatedTransport, SiteRuntime, SubmitReport};
use pawfect_core::primitives::CONTACT_FORM_ID;
use pawfect_core::utils::format_phone;
use pawfect_core::widgets::{MapView, SearchHit};
use pawfect_core::{
    Event, EventKind, FieldId, FieldKind, FormSession, InvalidReason, PageFixture, PageKind,
    PawfectError, Site, SubmissionOutcome, SubmitPhase, Validity, sample_contact_page,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum fixture file size (10 MB).
const MAX_FIXTURE_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), PawfectError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| PawfectError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(PawfectError::InvalidFixture(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, PawfectError> {
    let canonical = path.canonicalize().map_err(|e| {
        PawfectError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(PawfectError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path against its (existing) parent directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, PawfectError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        PawfectError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(PawfectError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| PawfectError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read and parse a page fixture.
pub fn load_fixture(path: &Path) -> Result<PageFixture, PawfectError> {
    let path = validate_file_path(path)?;
    validate_file_size(&path, MAX_FIXTURE_FILE_SIZE)?;
    let bytes = std::fs::read(&path)
        .map_err(|e| PawfectError::IoError(format!("Cannot read fixture: {}", e)))?;
    PageFixture::from_json(&bytes)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PawfectError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| PawfectError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validation result of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub id: FieldId,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub validity: Validity,
}

/// Attach to the contact form of a fixture and validate every field.
pub fn check_fixture(fixture: &PageFixture) -> Result<Vec<FieldReport>, PawfectError> {
    let mut page = fixture.build()?;
    let form = Site::name_contact_form(&mut page)?
        .ok_or_else(|| PawfectError::FormNotFound(CONTACT_FORM_ID.to_string()))?;
    let mut session = FormSession::attach_element(&page, form);

    let elements: Vec<_> = session.fields().iter().map(|f| f.element()).collect();
    for element in elements {
        session.validate_field(&mut page, element)?;
    }

    Ok(session
        .fields()
        .iter()
        .map(|f| FieldReport {
            id: f.id.clone(),
            kind: f.kind,
            required: f.required,
            value: f.value.clone(),
            validity: f.validity,
        })
        .collect())
}

/// Validate the contact form of a fixture file.
pub fn cmd_check(file: &Path, json_mode: bool) -> Result<(), PawfectError> {
    let fixture = load_fixture(file)?;
    let report = check_fixture(&fixture)?;
    let invalid = report.iter().filter(|f| !f.validity.is_valid()).count();
    tracing::info!(fields = report.len(), invalid, "form checked");

    if json_mode {
        return print_json(&serde_json::json!({
            "fields": report,
            "valid": invalid == 0,
        }));
    }

    println!("Contact Form Check");
    println!("==================");
    for field in &report {
        let verdict = match field.validity {
            Validity::Valid => "ok".to_string(),
            Validity::Pending => "pending".to_string(),
            Validity::Invalid(reason) => format!("{} ({})", reason.message(), reason.code()),
        };
        println!(
            "  {:<10} {:<13} {}{}",
            field.id.as_str(),
            format!("{:?}", field.kind),
            verdict,
            if field.required { "" } else { " [optional]" }
        );
    }
    println!();
    if invalid == 0 {
        println!("All {} fields valid.", report.len());
    } else {
        println!("{} of {} fields invalid.", invalid, report.len());
    }
    Ok(())
}

// =============================================================================
// SUBMIT COMMAND
// =============================================================================

/// State of the form after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitSummary {
    /// Present when the message was sent.
    pub outcome: Option<SubmissionOutcome>,
    /// Fields that blocked the submission.
    pub failures: Vec<(FieldId, InvalidReason)>,
    pub phase: SubmitPhase,
    pub trigger_label: Option<String>,
    pub trigger_disabled: bool,
    /// Text of the success banner, while shown.
    pub banner: Option<String>,
    /// Text of the form-level failure message, while shown.
    pub form_error: Option<String>,
    /// Field values after the attempt.
    pub values: Vec<(FieldId, String)>,
}

/// Run one submission of the fixture's contact form through `transport`.
pub async fn submit_fixture(
    fixture: &PageFixture,
    transport: SimulatedTransport,
    config: &RuntimeConfig,
) -> Result<SubmitSummary, PawfectError> {
    let mut page = fixture.build()?;
    let form = Site::name_contact_form(&mut page)?
        .ok_or_else(|| PawfectError::FormNotFound(CONTACT_FORM_ID.to_string()))?;
    let session = FormSession::attach_element(&page, form);
    let shared = std::sync::Arc::new(tokio::sync::Mutex::new(page));
    let controller = FormController::new(shared.clone(), session, transport)
        .with_banner_display(config.banner_display());

    let mut event = Event::new(EventKind::Submit, form);
    let report = controller.handle_submit(&mut event).await?;

    let page = shared.lock().await;
    let session = controller.session().lock().await;
    let trigger = session.trigger().and_then(|t| page.get(t));

    let (outcome, failures, banner) = match &report {
        SubmitReport::Rejected { failures } => (None, failures.clone(), None),
        SubmitReport::Completed {
            outcome, banner, ..
        } => (
            Some(outcome.clone()),
            Vec::new(),
            banner.map(|b| page.text_content(b)),
        ),
    };

    Ok(SubmitSummary {
        outcome,
        failures,
        phase: session.phase(),
        trigger_label: session.trigger().map(|t| page.text_content(t)),
        trigger_disabled: trigger.is_some_and(|t| t.disabled),
        banner,
        form_error: session.form_annotation().map(|n| page.text_content(n)),
        values: session
            .fields()
            .iter()
            .map(|f| (f.id.clone(), page.value(f.element()).unwrap_or_default().to_string()))
            .collect(),
    })
}

/// Submit the contact form of a fixture file.
pub async fn cmd_submit(
    file: &Path,
    config: &RuntimeConfig,
    fail: bool,
    latency_ms: Option<u64>,
    json_mode: bool,
) -> Result<(), PawfectError> {
    let fixture = load_fixture(file)?;
    let latency = latency_ms.map_or_else(|| config.submit_latency(), Duration::from_millis);
    let transport = if fail || config.simulate_failure {
        SimulatedTransport::failing(latency)
    } else {
        SimulatedTransport::new(latency)
    };

    let summary = submit_fixture(&fixture, transport, config).await?;

    if json_mode {
        return print_json(&summary);
    }

    println!("Contact Form Submission");
    println!("=======================");
    match &summary.outcome {
        Some(outcome) if outcome.is_success() => println!("Sent: {}", outcome.message()),
        Some(outcome) => println!("Failed: {}", outcome.message()),
        None => {
            println!("Not sent, fix these fields:");
            for (id, reason) in &summary.failures {
                println!("  {:<10} {}", id.as_str(), reason.message());
            }
        }
    }
    println!();
    println!("Phase:   {:?}", summary.phase);
    if let Some(label) = &summary.trigger_label {
        println!(
            "Button:  {}{}",
            label,
            if summary.trigger_disabled { " (disabled)" } else { "" }
        );
    }
    Ok(())
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Run the site search over a fixture.
pub async fn search_fixture(fixture: &PageFixture, query: &str) -> Result<Vec<SearchHit>, PawfectError> {
    let page = fixture.build()?;
    let mut runtime = SiteRuntime::start(
        page,
        &fixture.path,
        false,
        SimulatedTransport::default(),
        &RuntimeConfig::default(),
    )?;
    if !runtime.widgets().contains(&"search") {
        return Err(PawfectError::InvalidArgument(
            "page has no #search box with a #results list".to_string(),
        ));
    }
    runtime.search_input(query).await?;
    runtime.flush_search().await?;
    Ok(runtime.search_hits().await)
}

/// Search the text of a fixture file.
pub async fn cmd_search(file: &Path, query: &str, json_mode: bool) -> Result<(), PawfectError> {
    let fixture = load_fixture(file)?;
    let hits = search_fixture(&fixture, query).await?;
    tracing::info!(query, hits = hits.len(), "search finished");

    if json_mode {
        let rows: Vec<_> = hits
            .iter()
            .map(|h| {
                serde_json::json!({
                    "title": h.title,
                    "snippet": h.snippet(),
                    "element": h.element,
                })
            })
            .collect();
        return print_json(&rows);
    }

    if hits.is_empty() {
        println!("No results for '{}'", query);
        return Ok(());
    }
    for hit in &hits {
        println!("{:<4} {}", hit.title, hit.snippet());
    }
    Ok(())
}

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Widgets attached to a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub path: String,
    pub kind: PageKind,
    pub widgets: Vec<&'static str>,
    pub map: Option<MapView>,
}

/// Initialise the site for a fixture and wait for its start-up timers.
pub async fn inspect_fixture(
    fixture: &PageFixture,
    path: Option<&str>,
    map_library: bool,
    config: &RuntimeConfig,
) -> Result<InspectReport, PawfectError> {
    let path = path.unwrap_or(fixture.path.as_str()).to_string();
    let page = fixture.build()?;
    let mut runtime =
        SiteRuntime::start(page, &path, map_library, SimulatedTransport::from_config(config), config)?;
    let map = runtime.ready().await?;

    Ok(InspectReport {
        kind: runtime.kind(),
        widgets: runtime.widgets().to_vec(),
        path,
        map,
    })
}

/// Show the page kind and widgets of a fixture file.
pub async fn cmd_inspect(
    file: &Path,
    path: Option<&str>,
    map_library: bool,
    config: &RuntimeConfig,
    json_mode: bool,
) -> Result<(), PawfectError> {
    let fixture = load_fixture(file)?;
    let report = inspect_fixture(&fixture, path, map_library, config).await?;

    if json_mode {
        return print_json(&report);
    }

    println!("Page:     {} ({})", report.kind, report.path);
    println!("Widgets:  {}", report.widgets.join(", "));
    if let Some(map) = &report.map {
        println!("Map:      zoom {} at {:?}", map.zoom, map.center);
    }
    Ok(())
}

// =============================================================================
// UTILITY COMMANDS
// =============================================================================

/// Print a phone number as `(ddd) ddd-dddd`.
pub fn cmd_format_phone(number: &str, json_mode: bool) -> Result<(), PawfectError> {
    let formatted = format_phone(number);
    if json_mode {
        return print_json(&serde_json::json!({
            "input": number,
            "formatted": formatted,
            "changed": formatted != number,
        }));
    }
    println!("{}", formatted);
    Ok(())
}

/// Write the sample contact page fixture.
pub fn cmd_sample(output: &Path, force: bool) -> Result<(), PawfectError> {
    let output = validate_output_path(output)?;
    if output.exists() && !force {
        return Err(PawfectError::InvalidArgument(format!(
            "'{}' already exists (use --force to overwrite)",
            output.display()
        )));
    }

    let json = sample_contact_page().to_json()?;
    std::fs::write(&output, json)
        .map_err(|e| PawfectError::IoError(format!("Cannot write fixture: {}", e)))?;
    tracing::info!(path = %output.display(), "sample fixture written");
    println!("Sample contact page written to {}", output.display());
    Ok(())
}
