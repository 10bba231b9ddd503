use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::OVERVIEW_PATH;

/// `Authorization` header value for `guest:guest`
pub(crate) const GUEST_AUTHORIZATION: &str = "Basic Z3Vlc3Q6Z3Vlc3Q=";

/// Minimal overview document carrying the two queue counters
pub(crate) fn overview_body(ready: i64, unacknowledged: i64) -> String {
    format!(
        r#"{{"queue_totals":{{"messages_ready":{},"messages_unacknowledged":{}}}}}"#,
        ready, unacknowledged
    )
}

/// Mock server answering every overview request with the given status and body
pub(crate) async fn mock_overview(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    let template = ResponseTemplate::new(status).set_body_string(body);

    Mock::given(path(OVERVIEW_PATH))
        .respond_with(template)
        .mount(&mock_server)
        .await;

    mock_server
}
