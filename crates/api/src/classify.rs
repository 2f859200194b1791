//! Mapping of reqwest errors and responses onto [`HttpFailure`]

use std::error::Error as StdError;
use std::io;

use ac_core::{HttpFailure, StatusFailure};

/// Classify a transport-level reqwest error
///
/// A refused connection is recognised anywhere in the error's source chain
/// and reported with the underlying OS message. Other connect failures,
/// timeouts and send errors mean no response arrived.
pub fn classify(err: &reqwest::Error) -> HttpFailure {
    if let Some(refused) = find_connection_refused(err) {
        return HttpFailure::ConnectionRefused {
            message: refused.to_string(),
        };
    }

    let message = err.to_string();
    if err.is_connect() || err.is_timeout() || err.is_request() {
        HttpFailure::NoResponse { message }
    } else {
        HttpFailure::Other { message }
    }
}

fn find_connection_refused<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a io::Error> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>()
            && io_err.kind() == io::ErrorKind::ConnectionRefused
        {
            return Some(io_err);
        }
        current = e.source();
    }
    None
}

/// Build a status failure from a non-success response, consuming its body
pub async fn status_failure(response: reqwest::Response) -> HttpFailure {
    let status = response.status();

    let mut failure = StatusFailure::new(
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
    );
    for (name, value) in response.headers() {
        failure = failure.with_header(
            name.as_str(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }

    match response.text().await {
        Ok(body) => failure = failure.with_body(body),
        Err(e) => tracing::debug!("Failed to read error response body: {e}"),
    }

    HttpFailure::Status(failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Wrapper(io::Error);

    impl std::fmt::Display for Wrapper {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "client error (Connect)")
        }
    }

    impl StdError for Wrapper {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_find_connection_refused_in_chain() {
        let err = Wrapper(io::Error::from(io::ErrorKind::ConnectionRefused));
        let found = find_connection_refused(&err);
        assert!(found.is_some());
        assert_eq!(found.unwrap().kind(), io::ErrorKind::ConnectionRefused);
    }

    #[test]
    fn test_find_connection_refused_other_kind() {
        let err = Wrapper(io::Error::from(io::ErrorKind::TimedOut));
        assert!(find_connection_refused(&err).is_none());
    }

    #[tokio::test]
    async fn test_classify_refused_port() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = reqwest::get(format!("http://{addr}/")).await.unwrap_err();
        assert!(matches!(
            classify(&err),
            HttpFailure::ConnectionRefused { .. }
        ));
    }
}
