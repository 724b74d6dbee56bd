//! HTTP purchase classifier for the remote SmartSpend endpoint.

use std::time::Duration;

use smartspend_core::{CoreError, PurchaseClassifier};
use smartspend_domain::{ClassifierAdvice, PurchaseRequest};
use tracing::debug;

/// Posts `{amount, category}` to the endpoint and reads back `{allowed, alert, suggestion}`.
pub struct HttpClassifier {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpClassifier {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CoreError::Classifier(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PurchaseClassifier for HttpClassifier {
    fn classify(&self, request: &PurchaseRequest) -> Result<ClassifierAdvice, CoreError> {
        debug!(endpoint = %self.endpoint, amount = request.amount, "classifying purchase");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|err| CoreError::Classifier(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Classifier(format!(
                "endpoint answered {status}"
            )));
        }

        response
            .json::<ClassifierAdvice>()
            .map_err(|err| CoreError::Classifier(format!("unreadable verdict: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartspend_domain::SpendCategory;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves one canned HTTP response on a local port and returns its endpoint.
    fn serve_once(response: String) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/api/smartspend", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap_or(0);
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                if request_complete(&received) {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&received).into_owned()
        });
        (endpoint, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..split]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= split + 4 + length
    }

    fn headphones() -> PurchaseRequest {
        PurchaseRequest {
            amount: 650.0,
            category: SpendCategory::Shopping,
        }
    }

    #[test]
    fn server_error_status_is_a_classifier_error() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string(),
        );
        let classifier = HttpClassifier::new(&endpoint, Duration::from_secs(2)).unwrap();
        let err = classifier.classify(&headphones()).unwrap_err();
        match err {
            CoreError::Classifier(message) => assert!(message.contains("500"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
        server.join().unwrap();
    }

    #[test]
    fn verdict_body_is_parsed_into_advice() {
        let body = r#"{"allowed":false,"alert":"Alert: $650.00 is over your Shopping limit.","suggestion":"Try a cheaper pair."}"#;
        let (endpoint, server) = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ));
        let classifier = HttpClassifier::new(&endpoint, Duration::from_secs(2)).unwrap();
        let advice = classifier.classify(&headphones()).unwrap();
        assert!(!advice.allowed);
        assert_eq!(
            advice.alert.as_deref(),
            Some("Alert: $650.00 is over your Shopping limit.")
        );
        assert_eq!(advice.suggestion.as_deref(), Some("Try a cheaper pair."));

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/smartspend"));
        assert!(request.contains(r#""amount":650.0"#));
        assert!(request.contains(r#""category":"Shopping""#));
    }

    #[test]
    fn malformed_body_is_a_classifier_error() {
        let (endpoint, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot json!"
                .to_string(),
        );
        let classifier = HttpClassifier::new(&endpoint, Duration::from_secs(2)).unwrap();
        let err = classifier.classify(&headphones()).unwrap_err();
        assert!(matches!(err, CoreError::Classifier(message) if message.starts_with("unreadable verdict")));
        server.join().unwrap();
    }

    #[test]
    fn trims_trailing_slash() {
        let classifier =
            HttpClassifier::new("http://localhost:8000/api/smartspend/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(classifier.endpoint(), "http://localhost:8000/api/smartspend");
    }

    #[test]
    fn unreachable_endpoint_is_a_classifier_error() {
        let classifier =
            HttpClassifier::new("http://127.0.0.1:9/api/smartspend", Duration::from_millis(500))
                .unwrap();
        let err = classifier
            .classify(&headphones())
            .unwrap_err();
        assert!(matches!(err, CoreError::Classifier(_)));
    }
}
