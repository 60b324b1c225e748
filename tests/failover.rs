//! End-to-end failover over real HTTP against mock vendors.

use std::sync::Arc;

use mail_failover::config::{parse_config, TransportConfig};
use mail_failover::providers::{BrevoAdapter, MailgunAdapter, PostmarkAdapter, SendPulseAdapter};
use mail_failover::transport::{ReqwestTransport, Transport};
use mail_failover::{DeliveryError, FailoverEngine, Message, ProviderRegistry};

mod common;

use common::MockVendor;

const CHAIN: &str = r#"
providers = [
  { brevo = { api_key = "BREVO-KEY" } },
  { postmark = { api_key = "PM-TOKEN" } },
  { mailgun = { domain = "mg.example.com", api_key = "MG-KEY" } },
]

[transport]
request_timeout_secs = 5
"#;

fn message() -> Message {
    Message::new(
        "sender@example.com",
        ["a@example.com", "b@example.com"],
        "Quarterly report",
        "<h1>Report</h1>",
    )
}

fn registry_for(vendor: &MockVendor) -> ProviderRegistry {
    let transport: Arc<dyn Transport> =
        Arc::new(ReqwestTransport::new(&TransportConfig::default()).unwrap());
    let registry = ProviderRegistry::with_builtin(transport.clone());

    registry.register(
        "brevo",
        Arc::new(BrevoAdapter::new(transport.clone()).with_endpoint(vendor.url("/brevo"))),
    );
    registry.register(
        "postmark",
        Arc::new(PostmarkAdapter::new(transport.clone()).with_endpoint(vendor.url("/postmark"))),
    );
    registry.register(
        "mailgun",
        Arc::new(MailgunAdapter::new(transport.clone()).with_base_url(vendor.url(""))),
    );
    registry.register(
        "send_pulse",
        Arc::new(
            SendPulseAdapter::new(transport)
                .with_endpoints(vendor.url("/oauth/access_token"), vendor.url("/smtp/emails")),
        ),
    );
    registry
}

#[tokio::test]
async fn test_falls_through_to_first_healthy_vendor() {
    let vendor = common::start_mock_vendor(|req| match req.path.as_str() {
        "/brevo" => (503, "maintenance".to_string()),
        "/postmark" => (200, r#"{"ErrorCode":0,"Message":"OK"}"#.to_string()),
        _ => (200, "{}".to_string()),
    })
    .await;

    let config = parse_config(CHAIN).unwrap();
    let engine = FailoverEngine::new(registry_for(&vendor), config.providers);

    let outcome = engine.deliver(&message()).await.unwrap();

    assert_eq!(outcome.provider.as_str(), "postmark");
    assert_eq!(outcome.response.unwrap().status, 200);

    let paths: Vec<_> = vendor.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, ["/brevo", "/postmark"]);

    let postmark = &vendor.requests_to("/postmark")[0];
    assert_eq!(postmark.header("x-postmark-server-token"), Some("PM-TOKEN"));
    assert_eq!(postmark.json()["To"], "a@example.com,b@example.com");
}

#[tokio::test]
async fn test_all_vendors_failing_yields_aggregate() {
    let vendor = common::start_mock_vendor(|req| match req.path.as_str() {
        "/brevo" => (500, "brevo down".to_string()),
        "/postmark" => (422, "inactive recipient".to_string()),
        _ => (401, "Forbidden".to_string()),
    })
    .await;

    let config = parse_config(CHAIN).unwrap();
    let engine = FailoverEngine::new(registry_for(&vendor), config.providers);

    let err = engine.deliver(&message()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Failed(_)));
    assert_eq!(
        err.to_string(),
        "All email providers failed for a@example.com, b@example.com. Errors: \
         brevo: API error: 500 brevo down; \
         postmark: API error: 422 inactive recipient; \
         mailgun: API error: 401 Forbidden"
    );

    let mailgun = &vendor.requests_to("/v3/mg.example.com/messages")[0];
    assert_eq!(mailgun.header("authorization"), Some("Basic YXBpOk1HLUtFWQ=="));
    assert!(mailgun.body_text().contains("subject=Quarterly+report"));
}

#[tokio::test]
async fn test_send_pulse_token_reused_across_deliveries() {
    let vendor = common::start_mock_vendor(|req| match req.path.as_str() {
        "/oauth/access_token" => (
            200,
            r#"{"access_token":"SP-TOKEN","token_type":"Bearer","expires_in":3600}"#.to_string(),
        ),
        _ => (200, r#"{"result":true}"#.to_string()),
    })
    .await;

    let config = parse_config(
        r#"providers = [{ send_pulse = { client_id = "cid", client_secret = "secret" } }]"#,
    )
    .unwrap();
    let engine = FailoverEngine::new(registry_for(&vendor), config.providers);

    engine.deliver(&message()).await.unwrap();
    engine.deliver(&message()).await.unwrap();

    let token_requests = vendor.requests_to("/oauth/access_token");
    assert_eq!(token_requests.len(), 1);
    assert_eq!(
        token_requests[0].body_text(),
        "grant_type=client_credentials&client_id=cid&client_secret=secret"
    );

    let sends = vendor.requests_to("/smtp/emails");
    assert_eq!(sends.len(), 2);
    assert_eq!(sends[1].header("authorization"), Some("Bearer SP-TOKEN"));
    assert_eq!(sends[1].json()["email"]["textbody"], "Report");
}

#[tokio::test]
async fn test_chain_replacement_between_deliveries() {
    let vendor = common::start_mock_vendor(|_| (200, "{}".to_string())).await;

    let config = parse_config(CHAIN).unwrap();
    let engine = FailoverEngine::new(registry_for(&vendor), config.providers);
    assert_eq!(engine.deliver(&message()).await.unwrap().provider.as_str(), "brevo");

    let reordered = parse_config(
        r#"providers = [{ mailgun = { domain = "mg.example.com", api_key = "MG-KEY" } }]"#,
    )
    .unwrap();
    engine.config().replace(reordered.providers);

    assert_eq!(engine.deliver(&message()).await.unwrap().provider.as_str(), "mailgun");
}
