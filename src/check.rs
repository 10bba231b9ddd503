use std::io::Write;

use crate::{
    client::Client,
    error::Result,
    evaluator::Thresholds,
    limits::Limits,
};

/// Separator between hosts of a cluster
const HOST_SEPARATOR: char = ',';

/// Split a comma-separated host list, preserving order.
///
/// Pieces are taken as they are: no trimming, empty entries are kept.
pub fn split_hosts(hosts: &str) -> Vec<String> {
    hosts.split(HOST_SEPARATOR).map(str::to_string).collect()
}

/// A complete check run: one set of thresholds, applied to every host in turn.
#[derive(Debug, Clone)]
pub struct Check {
    client: Client,
    hosts: Vec<String>,
    thresholds: Thresholds,
}

impl Check {
    /// Parse the warning and the critical limits (in that order) and the host
    /// list. Fails on the first malformed limit string.
    pub fn new(client: Client, hosts: &str, warning: &str, critical: &str) -> Result<Self> {
        let warning: Limits = warning.parse()?;
        let critical: Limits = critical.parse()?;
        Ok(Check {
            client,
            hosts: split_hosts(hosts),
            thresholds: Thresholds::new(warning, critical),
        })
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Fetch and report every host, one after the other.
    ///
    /// The first failing host aborts the run: hosts after it are never
    /// requested and nothing further is written to `out`. `out` is flushed
    /// after every host, a failing flush aborts the run as well.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        for host in &self.hosts {
            info!("Checking {}", host);
            let snapshot = self.client.fetch(host).await?;
            self.thresholds.report(&snapshot, out)?;
            out.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        client::{ClientBuilder, OVERVIEW_PATH},
        error::ErrorKind,
        test_utils::overview_body,
    };
    use pretty_assertions::assert_eq;
    use std::io;
    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> Client {
        ClientBuilder::default()
            .port(server.address().port())
            .build()
            .unwrap()
    }

    /// Accepts writes, but every flush fails like a closed pipe
    struct BrokenPipe(Vec<u8>);

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }
    }

    async fn mount_overview(server: &MockServer, body: String, calls: u64) {
        Mock::given(path(OVERVIEW_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(calls)
            .mount(server)
            .await;
    }

    #[test]
    fn test_split_hosts() {
        assert_eq!(split_hosts("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_hosts("a"), vec!["a"]);
        assert_eq!(split_hosts("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_new_parses_limits() {
        let client = ClientBuilder::default().build().unwrap();
        let check = Check::new(client, "a,b", "1,2", "3,4").unwrap();
        assert_eq!(check.hosts().to_vec(), vec!["a", "b"]);
        assert_eq!(
            check.thresholds(),
            &Thresholds::new(Limits::new(1, 2), Limits::new(3, 4))
        );
    }

    #[test]
    fn test_new_rejects_malformed_warning() {
        let client = ClientBuilder::default().build().unwrap();
        assert!(matches!(
            Check::new(client, "localhost", "10000", "50000,50000"),
            Err(ErrorKind::MalformedLimits(ref s, 1)) if s == "10000"
        ));
    }

    #[test]
    fn test_new_rejects_non_numeric_critical() {
        let client = ClientBuilder::default().build().unwrap();
        assert!(matches!(
            Check::new(client, "localhost", "10000,10000", "50000,x"),
            Err(ErrorKind::NonNumericLimit(_, _))
        ));
    }

    #[tokio::test]
    async fn test_run_single_host() {
        let mock_server = MockServer::start().await;
        mount_overview(&mock_server, overview_body(12000, 3000), 1).await;

        let check = Check::new(
            client_for(&mock_server),
            "127.0.0.1",
            "10000,10000",
            "50000,50000",
        )
        .unwrap();
        let mut out = Vec::new();
        check.run(&mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "WARNING 12000 messages ready\nOK 3000 messages unacknowledged\n"
        );
    }

    #[tokio::test]
    async fn test_run_reports_every_host() {
        let mock_server = MockServer::start().await;
        mount_overview(&mock_server, overview_body(60000, 3000), 2).await;

        let check = Check::new(
            client_for(&mock_server),
            "127.0.0.1,127.0.0.1",
            "10000,10000",
            "50000,50000",
        )
        .unwrap();
        let mut out = Vec::new();
        check.run(&mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "CRITICAL 60000 messages ready\nOK 3000 messages unacknowledged\n\
             CRITICAL 60000 messages ready\nOK 3000 messages unacknowledged\n"
        );
    }

    #[tokio::test]
    async fn test_run_stops_at_unreachable_host() {
        let mock_server = MockServer::start().await;
        // The reachable host comes second and must never be asked
        mount_overview(&mock_server, overview_body(5000, 3000), 0).await;

        let check = Check::new(
            client_for(&mock_server),
            "rabbit.invalid,127.0.0.1",
            "10000,10000",
            "50000,50000",
        )
        .unwrap();
        let mut out = Vec::new();
        let err = check.run(&mut out).await.unwrap_err();
        assert!(matches!(err, ErrorKind::TransportError(_, _)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_at_undecodable_host() {
        let mock_server = MockServer::start().await;
        mount_overview(&mock_server, "<html></html>".to_string(), 1).await;

        let check = Check::new(
            client_for(&mock_server),
            "127.0.0.1,127.0.0.1,127.0.0.1",
            "10000,10000",
            "50000,50000",
        )
        .unwrap();
        let mut out = Vec::new();
        let err = check.run(&mut out).await.unwrap_err();
        assert!(matches!(err, ErrorKind::DecodeError(_, _)));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_run_stops_when_output_cannot_be_flushed() {
        let mock_server = MockServer::start().await;
        // The second host must not be asked once output is lost
        mount_overview(&mock_server, overview_body(5000, 3000), 1).await;

        let check = Check::new(
            client_for(&mock_server),
            "127.0.0.1,127.0.0.1",
            "10000,10000",
            "50000,50000",
        )
        .unwrap();
        let mut out = BrokenPipe(Vec::new());
        let err = check.run(&mut out).await.unwrap_err();
        assert!(matches!(err, ErrorKind::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
