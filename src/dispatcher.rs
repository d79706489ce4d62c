use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::SiteConfig;
use crate::error::DispatchError;
use crate::models::{Outcome, RelayPayload, SubmissionRequest};
use crate::surface::{LinkOpener, RelayTransport};

/// Posts JSON to the form relay with reqwest.
#[derive(Clone, Default)]
pub struct HttpRelayTransport {
    client: Client,
}

impl HttpRelayTransport {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl RelayTransport for HttpRelayTransport {
    fn post_json(&self, url: &str, body: String) -> BoxFuture<'static, Result<u16, DispatchError>> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        Box::pin(async move {
            let response = request.send().await?;
            Ok(response.status().as_u16())
        })
    }
}

/// Sends a contact message over WhatsApp and the form relay.
///
/// The WhatsApp link is opened and forgotten; only the relay response
/// decides the outcome.
pub struct DualChannelDispatcher {
    config: Arc<SiteConfig>,
    opener: Arc<dyn LinkOpener>,
    transport: Arc<dyn RelayTransport>,
}

impl DualChannelDispatcher {
    pub fn new(
        config: Arc<SiteConfig>,
        opener: Arc<dyn LinkOpener>,
        transport: Arc<dyn RelayTransport>,
    ) -> Self {
        Self {
            config,
            opener,
            transport,
        }
    }

    pub async fn dispatch(&self, request: &SubmissionRequest) -> Outcome {
        let link = deep_link(&self.config, request);
        self.opener.open(&link, "_blank");
        tracing::debug!("Opened WhatsApp link for \"{}\"", request.subject);

        match self.send_relay(request).await {
            Ok(()) => {
                tracing::info!("Contact message \"{}\" relayed", request.subject);
                Outcome { success: true }
            }
            Err(e) => {
                tracing::error!("Form submission error: {}", e);
                Outcome { success: false }
            }
        }
    }

    async fn send_relay(&self, request: &SubmissionRequest) -> Result<(), DispatchError> {
        let body = serde_json::to_string(&relay_payload(&self.config, request))?;
        let status = self
            .transport
            .post_json(&self.config.relay_endpoint, body)
            .await?;

        if !(200..300).contains(&status) {
            return Err(DispatchError::Rejected { status });
        }
        Ok(())
    }
}

pub fn message_text(config: &SiteConfig, request: &SubmissionRequest) -> String {
    format!(
        "New message from {} Website:\n\nName: {}\nEmail: {}\nPhone: {}\nSubject: {}\nPreferred Contact Method: {}\n\nMessage:\n{}",
        config.site_name,
        request.name,
        request.email,
        request.phone,
        request.subject,
        request.contact_method,
        request.message
    )
}

pub fn deep_link(config: &SiteConfig, request: &SubmissionRequest) -> String {
    format!(
        "https://wa.me/{}?text={}",
        config.business_number,
        urlencoding::encode(&message_text(config, request))
    )
}

pub fn relay_payload<'a>(config: &SiteConfig, request: &'a SubmissionRequest) -> RelayPayload<'a> {
    RelayPayload {
        name: &request.name,
        email: &request.email,
        phone: &request.phone,
        subject: &request.subject,
        message: &request.message,
        contact_method: &request.contact_method,
        relay_subject: format!("New Contact from {} Website: {}", config.site_name, request.subject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::surface::MockRelayTransport;

    fn respond(status: u16) -> BoxFuture<'static, Result<u16, DispatchError>> {
        Box::pin(async move { Ok(status) })
    }

    fn fail(reason: &'static str) -> BoxFuture<'static, Result<u16, DispatchError>> {
        Box::pin(async move { Err(DispatchError::Transport(reason.to_string())) })
    }

    fn request() -> SubmissionRequest {
        SubmissionRequest {
            name: "Amina Otieno".to_string(),
            email: "amina@example.com".to_string(),
            phone: "+254 700 000 000".to_string(),
            subject: "Delivery & pricing".to_string(),
            contact_method: "whatsapp".to_string(),
            message: "Do you deliver to Eldoret?".to_string(),
        }
    }

    fn dispatcher(page: Arc<MemoryPage>, transport: MockRelayTransport) -> DualChannelDispatcher {
        DualChannelDispatcher::new(Arc::new(SiteConfig::default()), page, Arc::new(transport))
    }

    #[test]
    fn deep_link_is_percent_encoded() {
        let link = deep_link(&SiteConfig::default(), &request());
        assert!(link.starts_with("https://wa.me/254112676725?text=New%20message%20from%20Kertai%20Milk%20Website%3A%0A%0AName%3A%20Amina%20Otieno%0A"));
        assert!(link.contains("Subject%3A%20Delivery%20%26%20pricing%0A"));
        assert!(link.ends_with("Message%3A%0ADo%20you%20deliver%20to%20Eldoret%3F"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn payload_carries_derived_subject() {
        let request = request();
        let json = serde_json::to_value(relay_payload(&SiteConfig::default(), &request)).unwrap();
        assert_eq!(json["_subject"], "New Contact from Kertai Milk Website: Delivery & pricing");
        assert_eq!(json["contactMethod"], "whatsapp");
        assert_eq!(json["phone"], "+254 700 000 000");
    }

    #[tokio::test]
    async fn success_status_reports_success() {
        let page = Arc::new(MemoryPage::contact_page());
        let mut transport = MockRelayTransport::new();
        transport
            .expect_post_json()
            .withf(|url, _| url == "https://formspree.io/f/your-form-id")
            .times(1)
            .returning(|_, _| respond(200));

        let outcome = dispatcher(page.clone(), transport).dispatch(&request()).await;
        assert!(outcome.success);
        let links = page.opened_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "_blank");
    }

    #[tokio::test]
    async fn relay_body_is_json() {
        let page = Arc::new(MemoryPage::contact_page());
        let mut transport = MockRelayTransport::new();
        transport
            .expect_post_json()
            .withf(|_, body: &String| {
                serde_json::from_str::<serde_json::Value>(body)
                    .map(|v| v["name"] == "Amina Otieno" && v["email"] == "amina@example.com")
                    .unwrap_or(false)
            })
            .times(1)
            .returning(|_, _| respond(201));

        assert!(dispatcher(page, transport).dispatch(&request()).await.success);
    }

    #[tokio::test]
    async fn error_status_reports_failure() {
        let page = Arc::new(MemoryPage::contact_page());
        let mut transport = MockRelayTransport::new();
        transport
            .expect_post_json()
            .returning(|_, _| respond(500));

        assert!(!dispatcher(page, transport).dispatch(&request()).await.success);
    }

    #[tokio::test]
    async fn network_failure_reports_failure() {
        let page = Arc::new(MemoryPage::contact_page());
        let mut transport = MockRelayTransport::new();
        transport
            .expect_post_json()
            .returning(|_, _| fail("connection reset"));

        let outcome = dispatcher(page.clone(), transport).dispatch(&request()).await;
        assert!(!outcome.success);
        // The WhatsApp leg already went out and is not rolled back.
        assert_eq!(page.opened_links().len(), 1);
    }

    struct BlockedPopups;

    impl LinkOpener for BlockedPopups {
        fn open(&self, _url: &str, _target: &str) {}
    }

    #[tokio::test]
    async fn deep_link_outcome_is_not_observed() {
        let mut transport = MockRelayTransport::new();
        transport
            .expect_post_json()
            .returning(|_, _| respond(200));
        let dispatcher = DualChannelDispatcher::new(
            Arc::new(SiteConfig::default()),
            Arc::new(BlockedPopups),
            Arc::new(transport),
        );
        // A swallowed popup still counts as sent when the relay accepts.
        assert!(dispatcher.dispatch(&request()).await.success);
    }
}
