//! Submission lifecycle and page timer tests on a paused tokio clock.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use pawfect::config::RuntimeConfig;
use pawfect::runtime::{ClickEffect, SimulatedTransport, SiteRuntime, SubmitReport};
use pawfect_core::primitives::{
    ERROR_MESSAGE_CLASS, FAILURE_MESSAGE, LOADING_CLASS, SENDING_LABEL, SUCCESS_MESSAGE,
    SUCCESS_MESSAGE_CLASS,
};
use pawfect_core::widgets::PageLoader;
use pawfect_core::{
    Element, ElementId, Event, EventKind, InvalidReason, Page, PageFixture, PawfectError,
    SubmissionOutcome, SubmitPhase, Validity, sample_contact_page,
};
use std::time::Duration;

const CONTACT_PATH: &str = "/CONTACT_US.html";

fn contact_page(email: &str) -> Page {
    let mut page = sample_contact_page().build().unwrap();
    for (id, value) in [
        ("name", "Thandi"),
        ("email", email),
        ("phone", "011 123 4567"),
        ("pet", "cat"),
        ("message", "Vaccination booking"),
    ] {
        let el = page.by_dom_id(id).unwrap();
        page.set_value(el, value).unwrap();
    }
    page
}

fn start(page: Page, transport: SimulatedTransport, config: &RuntimeConfig) -> SiteRuntime<SimulatedTransport> {
    SiteRuntime::start(page, CONTACT_PATH, false, transport, config).unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Ids of the form element and its submit button.
async fn form_and_trigger(runtime: &SiteRuntime<SimulatedTransport>) -> (ElementId, ElementId) {
    let session = runtime.form().unwrap().session().lock().await;
    (session.form(), session.trigger().unwrap())
}

fn spawn_submit(
    runtime: &SiteRuntime<SimulatedTransport>,
    form: ElementId,
) -> tokio::task::JoinHandle<Result<SubmitReport, PawfectError>> {
    let controller = runtime.form().unwrap().clone();
    tokio::spawn(async move {
        let mut event = Event::new(EventKind::Submit, form);
        let report = controller.handle_submit(&mut event).await;
        assert!(event.is_default_prevented());
        report
    })
}

// =============================================================================
// SUBMISSION LIFECYCLE
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_success_within_window_and_banner_removal() {
    let config = RuntimeConfig::default();
    let runtime = start(contact_page("a@b.com"), SimulatedTransport::from_config(&config), &config);
    let (form, trigger) = form_and_trigger(&runtime).await;

    let task = spawn_submit(&runtime, form);

    // Inside the delivery window.
    tokio::time::sleep(ms(1999)).await;
    {
        let page = runtime.page().lock().await;
        assert_eq!(page.text_content(trigger), SENDING_LABEL);
        assert!(page.get(trigger).unwrap().disabled);
        assert!(page.has_class(form, LOADING_CLASS));
    }
    assert!(runtime.form().unwrap().session().lock().await.is_submitting());

    let report = task.await.unwrap().unwrap();
    assert_eq!(
        report.outcome(),
        Some(&SubmissionOutcome::Success(SUCCESS_MESSAGE.to_string()))
    );
    let SubmitReport::Completed { banner, .. } = &report else {
        panic!("expected a completed submission");
    };
    let banner = banner.unwrap();

    {
        let page = runtime.page().lock().await;
        assert!(page.has_class(banner, SUCCESS_MESSAGE_CLASS));
        assert_eq!(page.text_content(banner), SUCCESS_MESSAGE);
        assert_eq!(page.text_content(trigger), "Send Message");
        assert!(!page.get(trigger).unwrap().disabled);
        assert!(!page.has_class(form, LOADING_CLASS));
        let email = page.by_dom_id("email").unwrap();
        assert_eq!(page.value(email), Some(""));
    }

    tokio::time::sleep(ms(4999)).await;
    assert!(runtime.page().lock().await.contains(banner));

    report.settle().await.unwrap();
    assert!(!runtime.page().lock().await.contains(banner));
    assert_eq!(
        runtime.form().unwrap().session().lock().await.phase(),
        SubmitPhase::Idle
    );
}

#[tokio::test(start_paused = true)]
async fn test_second_submit_while_sending_is_rejected() {
    let config = RuntimeConfig::default();
    let runtime = start(contact_page("a@b.com"), SimulatedTransport::new(ms(2000)), &config);
    let (form, _) = form_and_trigger(&runtime).await;

    let first = spawn_submit(&runtime, form);
    tokio::time::sleep(ms(1000)).await;

    let before = PageFixture::capture(&*runtime.page().lock().await, CONTACT_PATH);
    let mut event = Event::new(EventKind::Submit, form);
    let second = runtime.form().unwrap().handle_submit(&mut event).await;
    assert!(matches!(second, Err(PawfectError::SubmissionInProgress)));
    assert!(event.is_default_prevented());
    assert_eq!(
        PageFixture::capture(&*runtime.page().lock().await, CONTACT_PATH),
        before
    );

    let report = first.await.unwrap().unwrap();
    assert!(report.outcome().unwrap().is_success());
}

#[tokio::test(start_paused = true)]
async fn test_dropped_submit_still_finalizes() {
    let config = RuntimeConfig::default();
    let runtime = start(contact_page("a@b.com"), SimulatedTransport::new(ms(2000)), &config);
    let (form, trigger) = form_and_trigger(&runtime).await;

    let mut event = Event::new(EventKind::Submit, form);
    let controller = runtime.form().unwrap();
    let first = tokio::time::timeout(ms(1000), controller.handle_submit(&mut event)).await;
    assert!(first.is_err());

    tokio::time::sleep(Duration::from_secs(60)).await;
    {
        let page = runtime.page().lock().await;
        assert_eq!(page.text_content(trigger), "Send Message");
        assert!(!page.get(trigger).unwrap().disabled);
        assert!(!page.has_class(form, LOADING_CLASS));
        let banners = page.find_all(page.root(), |e| e.has_class(SUCCESS_MESSAGE_CLASS));
        assert!(banners.is_empty());
        let email = page.by_dom_id("email").unwrap();
        assert_eq!(page.value(email), Some(""));
    }
    assert_eq!(
        runtime.form().unwrap().session().lock().await.phase(),
        SubmitPhase::Idle
    );

    // The form was reset by the delivered submission, so a new one is
    // validated rather than refused as busy.
    let mut event = Event::new(EventKind::Submit, form);
    let again = controller.handle_submit(&mut event).await.unwrap();
    assert!(matches!(again, SubmitReport::Rejected { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_email_never_sends() {
    let config = RuntimeConfig::default();
    let runtime = start(contact_page("a@b"), SimulatedTransport::new(ms(2000)), &config);
    let (form, trigger) = form_and_trigger(&runtime).await;

    let start = tokio::time::Instant::now();
    let mut event = Event::new(EventKind::Submit, form);
    let report = runtime.form().unwrap().handle_submit(&mut event).await.unwrap();

    assert!(start.elapsed() < ms(2000));
    match report {
        SubmitReport::Rejected { failures } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].0.as_str(), "email");
            assert_eq!(failures[0].1, InvalidReason::BadEmailFormat);
        }
        other => panic!("expected rejection, got {:?}", other),
    }

    let page = runtime.page().lock().await;
    assert_eq!(page.text_content(trigger), "Send Message");
    assert!(!page.get(trigger).unwrap().disabled);
    let notes = page.find_all(page.root(), |e| e.has_class(ERROR_MESSAGE_CLASS));
    assert_eq!(notes.len(), 1);
    assert_eq!(
        page.text_content(notes[0]),
        InvalidReason::BadEmailFormat.message()
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_delivery_restores_button() {
    let config = RuntimeConfig {
        simulate_failure: true,
        ..RuntimeConfig::default()
    };
    let runtime = start(contact_page("a@b.com"), SimulatedTransport::from_config(&config), &config);
    let (form, trigger) = form_and_trigger(&runtime).await;

    let report = spawn_submit(&runtime, form).await.unwrap().unwrap();
    assert_eq!(
        report.outcome(),
        Some(&SubmissionOutcome::Failure(FAILURE_MESSAGE.to_string()))
    );

    let session = runtime.form().unwrap().session().lock().await;
    assert!(!session.is_submitting());
    let note = session.form_annotation().unwrap();
    drop(session);

    let page = runtime.page().lock().await;
    assert_eq!(page.text_content(note), FAILURE_MESSAGE);
    assert_eq!(page.text_content(trigger), "Send Message");
    assert!(!page.get(trigger).unwrap().disabled);
    assert!(!page.has_class(form, LOADING_CLASS));
    let email = page.by_dom_id("email").unwrap();
    assert_eq!(page.value(email), Some("a@b.com"));
}

#[tokio::test(start_paused = true)]
async fn test_notice_on_submit_is_dismissed() {
    let config = RuntimeConfig {
        notify_on_submit: true,
        submit_latency_ms: 10,
        ..RuntimeConfig::default()
    };
    let runtime = start(contact_page("a@b.com"), SimulatedTransport::from_config(&config), &config);
    let (form, _) = form_and_trigger(&runtime).await;

    let report = spawn_submit(&runtime, form).await.unwrap().unwrap();
    let notice = {
        let page = runtime.page().lock().await;
        page.find_first(page.body(), |e| e.has_class("notification"))
            .unwrap()
    };
    assert!(runtime.page().lock().await.has_class(notice, "success"));

    report.settle().await.unwrap();
    assert!(!runtime.page().lock().await.contains(notice));
}

#[tokio::test(start_paused = true)]
async fn test_submit_handler_rejects_other_events() {
    let config = RuntimeConfig::default();
    let runtime = start(contact_page("a@b.com"), SimulatedTransport::new(ms(1)), &config);
    let (form, _) = form_and_trigger(&runtime).await;

    let mut event = Event::new(EventKind::Click, form);
    let result = runtime.form().unwrap().handle_submit(&mut event).await;
    assert!(matches!(result, Err(PawfectError::InvalidArgument(_))));
}

// =============================================================================
// FIELD HANDLERS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_blur_then_input_clears_annotation() {
    let config = RuntimeConfig::default();
    let runtime = start(contact_page("not-an-email"), SimulatedTransport::new(ms(1)), &config);
    let controller = runtime.form().unwrap();
    let email = runtime.page().lock().await.by_dom_id("email").unwrap();

    let validity = controller.handle_blur(email).await.unwrap();
    assert_eq!(validity, Some(Validity::Invalid(InvalidReason::BadEmailFormat)));
    assert!(runtime.page().lock().await.has_class(email, "error"));

    runtime.page().lock().await.set_value(email, "vet@pawfect.co.za").unwrap();
    controller.handle_input(email).await.unwrap();
    assert!(!runtime.page().lock().await.has_class(email, "error"));

    let validity = controller.handle_blur(email).await.unwrap();
    assert_eq!(validity, Some(Validity::Valid));
}

// =============================================================================
// PAGE TIMERS AND WIDGETS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_page_fades_in_and_map_initializes() {
    let config = RuntimeConfig::default();
    let mut runtime = SiteRuntime::start(
        contact_page("a@b.com"),
        CONTACT_PATH,
        true,
        SimulatedTransport::default(),
        &config,
    )
    .unwrap();
    assert!(runtime.widgets().contains(&"interactive-map"));
    assert!(!PageLoader.is_revealed(&*runtime.page().lock().await));

    let view = runtime.ready().await.unwrap().unwrap();

    let page = runtime.page().lock().await;
    assert!(PageLoader.is_revealed(&page));
    assert_eq!(page.by_dom_id("map"), Some(view.container));
    assert_eq!(view.zoom, 15);
}

#[tokio::test(start_paused = true)]
async fn test_menu_and_anchor_clicks() {
    let mut page = contact_page("a@b.com");
    let body = page.body();
    let link = page
        .append(body, Element::new("a").with_attr("href", "#contact-section"))
        .unwrap();
    let section = page
        .append(body, Element::new("section").with_id("contact-section"))
        .unwrap();
    let config = RuntimeConfig::default();
    let runtime = start(page, SimulatedTransport::default(), &config);
    let button = runtime.page().lock().await.first_by_class(body, "VET").unwrap();

    let mut click = Event::new(EventKind::Click, button);
    assert_eq!(runtime.click(&mut click).await.unwrap(), ClickEffect::MenuToggled(true));
    let mut click = Event::new(EventKind::Click, button);
    assert_eq!(runtime.click(&mut click).await.unwrap(), ClickEffect::MenuToggled(false));

    let mut click = Event::new(EventKind::Click, link);
    let effect = runtime.click(&mut click).await.unwrap();
    assert!(click.is_default_prevented());
    match effect {
        ClickEffect::Scrolled(request) => {
            assert_eq!(request.target, section);
            assert!(request.smooth);
        }
        other => panic!("expected a scroll, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_team_page_bio_and_gallery() {
    let mut page = Page::new();
    let body = page.body();
    let main = page.append(body, Element::new("main")).unwrap();
    let photo = page
        .append(main, Element::new("img").with_attr("src", "team/naledi.jpg"))
        .unwrap();
    let name = page.append(main, Element::new("h3").with_text("Dr Naledi")).unwrap();
    let bio = page.append(main, Element::new("p").with_text("Small animals")).unwrap();

    let config = RuntimeConfig::default();
    let runtime =
        SiteRuntime::start(page, "/OUR_TEAM.html", false, SimulatedTransport::default(), &config)
            .unwrap();

    let mut click = Event::new(EventKind::Click, name);
    assert_eq!(runtime.click(&mut click).await.unwrap(), ClickEffect::BioToggled(false));
    assert_eq!(runtime.page().lock().await.style(bio, "display"), Some("none"));

    let mut click = Event::new(EventKind::Click, photo);
    assert_eq!(runtime.click(&mut click).await.unwrap(), ClickEffect::GalleryOpened);
    let overlay = {
        let page = runtime.page().lock().await;
        page.first_by_class(page.root(), "lightbox").unwrap()
    };
    let mut click = Event::new(EventKind::Click, overlay);
    assert_eq!(runtime.click(&mut click).await.unwrap(), ClickEffect::GalleryClosed);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_runs_last_query() {
    let mut page = Page::new();
    let body = page.body();
    page.append(body, Element::new("input").with_id("search")).unwrap();
    page.append(body, Element::new("div").with_id("results")).unwrap();
    page.append(body, Element::new("h2").with_text("Vaccinations")).unwrap();
    page.append(body, Element::new("p").with_text("Dental care for cats"))
        .unwrap();

    let config = RuntimeConfig {
        search_debounce_ms: 300,
        ..RuntimeConfig::default()
    };
    let mut runtime =
        SiteRuntime::start(page, "/SERVICES.html", false, SimulatedTransport::default(), &config)
            .unwrap();

    runtime.search_input("vacc").await.unwrap();
    tokio::time::sleep(ms(100)).await;
    runtime.search_input("dental").await.unwrap();
    assert!(runtime.search_hits().await.is_empty());

    runtime.flush_search().await.unwrap();
    let hits = runtime.search_hits().await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "P");

    let row = {
        let page = runtime.page().lock().await;
        page.first_by_class(page.root(), "search-result").unwrap()
    };
    let mut click = Event::new(EventKind::Click, row);
    assert_eq!(
        runtime.click(&mut click).await.unwrap(),
        ClickEffect::SearchSelected(hits[0].element)
    );
    assert!(runtime.search_hits().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_runtime_notice() {
    let config = RuntimeConfig::default();
    let runtime = start(contact_page("a@b.com"), SimulatedTransport::default(), &config);

    let (notice, dismissal) = runtime
        .notify("Clinic closed on Sunday", pawfect_core::Severity::Info)
        .await
        .unwrap();
    tokio::time::sleep(ms(4999)).await;
    assert!(runtime.page().lock().await.contains(notice));
    assert!(dismissal.await.unwrap());
    assert!(!runtime.page().lock().await.contains(notice));
}
