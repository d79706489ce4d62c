use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use mockall::mock;

use site_interactions::models::BannerKind;
use site_interactions::nav::AnchorClick;
use site_interactions::page::BODY_SELECTOR;
use site_interactions::surface::{
    ClassList, FieldAccess, RelayTransport, SubmitControl, NO_SCROLL_CLASS, REVEALED_CLASS,
};
use site_interactions::{
    DispatchError, EventResult, MemoryPage, PageEvent, Site, SiteConfig, SubmitOutcome,
};

mock! {
    Relay {}

    impl RelayTransport for Relay {
        fn post_json(&self, url: &str, body: String) -> BoxFuture<'static, Result<u16, DispatchError>>;
    }
}

fn respond(status: u16) -> BoxFuture<'static, Result<u16, DispatchError>> {
    Box::pin(async move {
        tokio::task::yield_now().await;
        Ok(status)
    })
}

fn unreachable_relay() -> BoxFuture<'static, Result<u16, DispatchError>> {
    Box::pin(async { Err(DispatchError::Transport("dns error".to_string())) })
}

fn site_with(relay: MockRelay) -> (Arc<MemoryPage>, Site<MemoryPage>) {
    let page = Arc::new(MemoryPage::contact_page());
    let site = Site::wire(page.clone(), SiteConfig::default(), Arc::new(relay));
    (page, site)
}

fn fill_form(page: &MemoryPage) {
    page.fill("name", "Achieng");
    page.fill("email", "achieng@example.org");
    page.fill("phone", "0712 345 678");
    page.fill("subject", "Farm visit");
    page.fill("contact-method", "email");
    page.fill("message", "Can a school group tour the farm?");
}

#[tokio::test]
async fn each_empty_required_field_blocks_submission() {
    for required in ["name", "email", "subject", "message"] {
        let mut relay = MockRelay::new();
        relay.expect_post_json().times(0);
        let (page, site) = site_with(relay);
        fill_form(&page);
        page.fill(required, "");

        let result = site.handle(PageEvent::Submit).await;

        assert_eq!(
            result,
            EventResult::Submit(SubmitOutcome::Invalid(vec![required.to_string()]))
        );
        let annotations = page.annotations();
        assert_eq!(annotations.len(), 1, "field {}", required);
        assert_eq!(annotations[0].field, required);
        assert!(page.is_errored(required));
        assert!(page.opened_links().is_empty());
        assert!(!page.submit_disabled());
    }
}

#[tokio::test]
async fn typing_fixes_field_error() {
    let (page, site) = site_with(MockRelay::new());
    page.fill("email", "achieng@");
    let result = site
        .handle(PageEvent::FieldBlur { name: "email".to_string() })
        .await;
    assert_eq!(result, EventResult::Field { valid: false });
    assert!(page.is_errored("email"));

    page.fill("email", "achieng@example.org");
    site.handle(PageEvent::FieldInput { name: "email".to_string() })
        .await;
    assert!(!page.is_errored("email"));
    assert!(page.annotations().is_empty());
}

#[tokio::test(start_paused = true)]
async fn successful_submission_resets_and_banner_expires() {
    let mut relay = MockRelay::new();
    relay
        .expect_post_json()
        .withf(|url, body| {
            url == "https://formspree.io/f/your-form-id" && body.contains("\"_subject\":\"New Contact from Kertai Milk Website: Farm visit\"")
        })
        .times(1)
        .returning(|_, _| respond(200));
    let (page, site) = site_with(relay);
    fill_form(&page);

    let result = site.handle(PageEvent::Submit).await;

    assert_eq!(result, EventResult::Submit(SubmitOutcome::Sent));
    assert!(page.fields().iter().all(|f| f.value.is_empty()));
    assert!(!page.submit_disabled());
    assert_eq!(page.label(), "Send Message");
    assert_eq!(page.current_banner().unwrap().banner.kind, BannerKind::Success);

    let links = page.opened_links();
    assert_eq!(links.len(), 1);
    assert!(links[0].url.starts_with("https://wa.me/254112676725?text="));
    assert!(links[0].url.contains("Name%3A%20Achieng"));

    tokio::time::sleep(Duration::from_millis(5_600)).await;
    assert!(page.banners().is_empty());
}

#[tokio::test]
async fn rejected_submission_keeps_values() {
    let mut relay = MockRelay::new();
    relay.expect_post_json().times(1).returning(|_, _| respond(500));
    let (page, site) = site_with(relay);
    fill_form(&page);

    let result = site.handle(PageEvent::Submit).await;

    assert_eq!(result, EventResult::Submit(SubmitOutcome::Failed));
    assert_eq!(page.current_banner().unwrap().banner.kind, BannerKind::Error);
    assert_eq!(page.value("subject").as_deref(), Some("Farm visit"));
    assert!(!page.submit_disabled());
}

#[tokio::test]
async fn network_failure_is_reported_like_rejection() {
    let mut relay = MockRelay::new();
    relay.expect_post_json().times(1).returning(|_, _| unreachable_relay());
    let (page, site) = site_with(relay);
    fill_form(&page);

    let result = site.handle(PageEvent::Submit).await;

    assert_eq!(result, EventResult::Submit(SubmitOutcome::Failed));
    assert_eq!(page.current_banner().unwrap().banner.kind, BannerKind::Error);
    assert_eq!(page.value("name").as_deref(), Some("Achieng"));
}

#[tokio::test]
async fn rapid_double_submit_sends_once() {
    let mut relay = MockRelay::new();
    relay.expect_post_json().times(1).returning(|_, _| respond(200));
    let (page, site) = site_with(relay);
    fill_form(&page);

    let (first, second) = tokio::join!(site.handle(PageEvent::Submit), site.handle(PageEvent::Submit));

    assert_eq!(first, EventResult::Submit(SubmitOutcome::Sent));
    assert_eq!(second, EventResult::Submit(SubmitOutcome::Ignored));
    assert_eq!(page.banners().len(), 1);

    // Gate is open again for the next message.
    fill_form(&page);
    page.fill("email", "not-an-email");
    let third = site.handle(PageEvent::Submit).await;
    assert_eq!(third, EventResult::Submit(SubmitOutcome::Invalid(vec!["email".to_string()])));
}

#[tokio::test]
async fn menu_and_anchor_navigation() {
    let (page, site) = site_with(MockRelay::new());

    site.handle(PageEvent::HamburgerClick).await;
    assert!(site.menu().unwrap().is_open());
    assert!(page.has_class(BODY_SELECTOR, NO_SCROLL_CLASS));

    let result = site
        .handle(PageEvent::AnchorClick { href: "#about".to_string() })
        .await;
    assert_eq!(result, EventResult::Anchor(AnchorClick::Scrolled { top: 620.0 }));
    assert!(!site.menu().unwrap().is_open());

    site.handle(PageEvent::HamburgerClick).await;
    site.handle(PageEvent::NavLinkClick).await;
    assert!(!page.has_class(BODY_SELECTOR, NO_SCROLL_CLASS));
}

#[tokio::test(start_paused = true)]
async fn scrolling_reveals_sections() {
    let (page, site) = site_with(MockRelay::new());
    assert!(!page.has_class("about-content", REVEALED_CLASS));

    page.set_scroll_y(200.0);
    site.handle(PageEvent::Scroll).await;
    site.handle(PageEvent::Scroll).await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(page.has_class("about-content", REVEALED_CLASS));
}

#[test]
fn scroll_outside_runtime_reveals_immediately() {
    let (page, site) = site_with(MockRelay::new());
    page.set_scroll_y(200.0);

    let result = futures::executor::block_on(site.handle(PageEvent::Scroll));

    assert_eq!(result, EventResult::Handled);
    assert!(page.has_class("about-content", REVEALED_CLASS));
}

#[tokio::test(start_paused = true)]
async fn product_enquiry_prefills_message() {
    let (page, site) = site_with(MockRelay::new());
    let result = site
        .handle(PageEvent::EnquireAboutProduct { product: "Fresh Milk 1L".to_string() })
        .await;
    assert_eq!(result, EventResult::Handled);
    assert_eq!(
        page.value("message").as_deref(),
        Some("I'm interested in Fresh Milk 1L. Please provide more details.")
    );
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(page.scrolled_into_view(), vec![".contact".to_string()]);
}

#[tokio::test]
async fn page_without_form_or_menu_skips_wiring() {
    let page = Arc::new(MemoryPage::blank());
    let site = Site::wire(page.clone(), SiteConfig::default(), Arc::new(MockRelay::new()));

    assert!(site.form().is_none());
    assert!(site.menu().is_none());
    assert_eq!(site.handle(PageEvent::Submit).await, EventResult::Unhandled);
    assert_eq!(site.handle(PageEvent::HamburgerClick).await, EventResult::Unhandled);
    assert_eq!(
        site.handle(PageEvent::FieldInput { name: "email".to_string() }).await,
        EventResult::Unhandled
    );
    assert_eq!(
        site.handle(PageEvent::EnquireAboutProduct { product: "Ghee".to_string() }).await,
        EventResult::Unhandled
    );
}
