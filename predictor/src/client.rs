//! HTTP client for the remote prediction endpoint.

use crate::{
    config::ClientConfig,
    error::PredictorError,
    prediction::{PredictionRequest, PredictionResult},
};

/// Something that can turn a feature vector into a prediction.
///
/// Implementations are called from the runtime's blocking pool.
pub trait Predict: Send + Sync {
    /// Runs one prediction.
    ///
    /// # Errors
    /// Any failure is reported as `RequestFailed`.
    fn predict(&self, features: &[f64]) -> Result<PredictionResult, PredictorError>;

    /// Returns true if the service looks reachable.
    fn health(&self) -> bool {
        true
    }
}

/// Posts feature vectors to the configured endpoint.
///
/// The agent keeps a cookie store, so credentials set by the service are sent back.
pub struct HttpPredictor {
    agent: ureq::Agent,
    endpoint: String,
    root_url: String,
}

impl HttpPredictor {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .build();

        Self {
            agent,
            endpoint: config.endpoint.clone(),
            root_url: config.root_url(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predict for HttpPredictor {
    fn predict(&self, features: &[f64]) -> Result<PredictionResult, PredictorError> {
        let request = self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let response = match request.send_json(PredictionRequest { features }) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                log::warn!("prediction endpoint answered HTTP {code}");
                return Err(PredictorError::RequestFailed);
            }
            Err(ureq::Error::Transport(e)) => {
                log::warn!("prediction request to {} failed: {e}", self.endpoint);
                return Err(PredictorError::RequestFailed);
            }
        };

        response.into_json::<PredictionResult>().map_err(|e| {
            log::warn!("prediction response could not be decoded: {e}");
            PredictorError::RequestFailed
        })
    }

    /// Probes the service root; any 2xx answer counts as up.
    fn health(&self) -> bool {
        match self.agent.get(&self.root_url).call() {
            Ok(response) => (200..300).contains(&response.status()),
            Err(e) => {
                log::debug!("health check on {} failed: {e}", self.root_url);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        sync::mpsc,
        thread,
    };

    use super::*;

    /// Serves one canned response and hands back the raw request it received.
    fn serve_once(response: String) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = tx.send(read_request(&mut stream));
                let _ = stream.write_all(response.as_bytes());
            }
        });
        (format!("http://{addr}/predict"), rx)
    }

    /// Reads the head and, if announced, the full body of one request.
    fn read_request(stream: &mut impl Read) -> String {
        let mut raw = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap_or(0);
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&raw);
            let Some(head_end) = text.find("\r\n\r\n") else {
                continue;
            };
            let body_len = text[..head_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if raw.len() >= head_end + 4 + body_len {
                break;
            }
        }
        String::from_utf8_lossy(&raw).into_owned()
    }

    fn predictor(endpoint: String) -> HttpPredictor {
        HttpPredictor::new(&ClientConfig {
            endpoint,
            ..ClientConfig::default()
        })
    }

    fn json_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn predict_decodes_success_body() {
        let (url, requests) = serve_once(json_response("200 OK", r#"{"prediction":1,"confidence":0.75}"#));
        let result = predictor(url).predict(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

        assert_eq!(result, PredictionResult { prediction: 1, confidence: 0.75 });

        let raw = requests.recv().unwrap();
        assert!(raw.starts_with("POST /predict"));
        assert!(raw.contains(r#"{"features":[1.0,2.0,3.0,4.0,5.0]}"#));
    }

    #[test]
    fn non_success_status_is_request_failed() {
        let (url, _) = serve_once(json_response("500 Internal Server Error", r#"{"detail":"boom"}"#));
        let err = predictor(url).predict(&[1.0; 5]).unwrap_err();
        assert!(matches!(err, PredictorError::RequestFailed));
    }

    #[test]
    fn malformed_body_is_request_failed() {
        let (url, _) = serve_once(json_response("200 OK", r#"{"label":"cat"}"#));
        let err = predictor(url).predict(&[1.0; 5]).unwrap_err();
        assert!(matches!(err, PredictorError::RequestFailed));
    }

    #[test]
    fn connection_refused_is_request_failed() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = predictor(format!("http://{addr}/predict")).predict(&[1.0; 5]).unwrap_err();
        assert!(matches!(err, PredictorError::RequestFailed));
    }

    #[test]
    fn health_probes_service_root() {
        let (url, requests) = serve_once(json_response("200 OK", r#"{"status":"running"}"#));
        assert!(predictor(url).health());
        assert!(requests.recv().unwrap().starts_with("GET / "));
    }
}
