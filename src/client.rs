use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Text substituted when the backend answers without a `response` field.
pub const NO_RESPONSE: &str = "No response.";

/// Outcome of a single inference request.
///
/// Failures are part of the produced document rather than errors: a
/// failed chunk renders as an inline notice and the conversion carries
/// on with the next chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceResult {
    /// The backend produced text for the chunk
    Reply(String),

    /// The request failed; the description replaces the chunk's text
    Failure(String),
}

impl InferenceResult {
    /// Renders this outcome as one block of the output document.
    #[must_use]
    pub fn into_block(self) -> String {
        match self {
            Self::Reply(text) => text,
            Self::Failure(description) => format!("Error from API: {description}"),
        }
    }

    /// Returns true if the request failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// A text-generation backend.
///
/// The pipeline is written against this trait so tests can substitute
/// a scripted backend for the real HTTP client.
pub trait InferenceBackend {
    /// Requests a completion for one prompt.
    fn generate(&self, prompt: &str) -> InferenceResult;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_ctx: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Blocking HTTP client for the Ollama `/api/generate` endpoint.
#[derive(Debug)]
pub struct OllamaClient {
    http: Client,
    url: String,
    model: String,
    num_ctx: u32,
}

impl OllamaClient {
    /// Creates a client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an extra header is not valid HTTP or the
    /// underlying client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.extra_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::config(format!("Invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("Invalid header value for '{name}': {e}")))?;
            headers.insert(name, value);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::network(e.to_string()))?;

        Ok(Self {
            http,
            url: config.api_url.clone(),
            model: config.model.clone(),
            num_ctx: config.num_ctx,
        })
    }

    /// Sends one prompt to the backend and returns the outcome.
    ///
    /// Transport errors, non-success statuses, and unparseable bodies
    /// all come back as [`InferenceResult::Failure`]; this never
    /// returns a [`Result`].
    pub fn generate(&self, prompt: &str) -> InferenceResult {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_ctx: self.num_ctx,
            },
        };

        debug!("POST {} ({} chars)", self.url, prompt.chars().count());

        let response = match self.http.post(&self.url).json(&request).send() {
            Ok(response) => response,
            Err(e) => return InferenceResult::Failure(e.to_string()),
        };

        let status = response.status();
        let body = match response.text() {
            Ok(body) => body,
            Err(e) => return InferenceResult::Failure(e.to_string()),
        };

        if !status.is_success() {
            warn!("HTTP {status} from inference backend");
            warn!("Response body: {body}");
            return InferenceResult::Failure(format!("HTTP status {status}"));
        }

        match serde_json::from_str::<GenerateResponse>(&body) {
            Ok(parsed) => InferenceResult::Reply(
                parsed
                    .response
                    .unwrap_or_else(|| NO_RESPONSE.to_string()),
            ),
            Err(e) => InferenceResult::Failure(format!("malformed response body: {e}")),
        }
    }
}

impl InferenceBackend for OllamaClient {
    fn generate(&self, prompt: &str) -> InferenceResult {
        Self::generate(self, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::mpsc;
    use std::thread;

    fn test_config(url: &str) -> Config {
        Config::builder().input_dir(".").api_url(url).build().unwrap()
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    data.extend_from_slice(&buf[..n]);
                    let text = String::from_utf8_lossy(&data);
                    if let Some(header_end) = text.find("\r\n\r\n") {
                        let content_length = text[..header_end]
                            .lines()
                            .find_map(|line| {
                                let (name, value) = line.split_once(':')?;
                                name.eq_ignore_ascii_case("content-length")
                                    .then(|| value.trim().parse::<usize>().ok())
                                    .flatten()
                            })
                            .unwrap_or(0);
                        if data.len() >= header_end + 4 + content_length {
                            break;
                        }
                    }
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    fn body_of(request: &str) -> &str {
        request.split_once("\r\n\r\n").map_or("", |(_, body)| body)
    }

    fn spawn_backend(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status_line = status_line.to_string();
        let body = body.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let request = read_request(&mut stream);
                let _ = tx.send(request);
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        (format!("http://{addr}/api/generate"), rx)
    }

    #[test]
    fn test_reply_is_extracted() {
        let (url, _rx) = spawn_backend("HTTP/1.1 200 OK", r#"{"response":"- one\n- two"}"#);
        let client = OllamaClient::new(&test_config(&url)).unwrap();

        let outcome = client.generate("summarize");
        assert_eq!(outcome, InferenceResult::Reply("- one\n- two".to_string()));
        assert_eq!(outcome.into_block(), "- one\n- two");
    }

    #[test]
    fn test_missing_response_field_yields_sentinel() {
        let (url, _rx) = spawn_backend("HTTP/1.1 200 OK", "{}");
        let client = OllamaClient::new(&test_config(&url)).unwrap();

        let outcome = client.generate("summarize");
        assert_eq!(outcome, InferenceResult::Reply(NO_RESPONSE.to_string()));
        assert!(!outcome.is_failure());
    }

    #[test]
    fn test_http_error_becomes_failure() {
        let (url, _rx) = spawn_backend("HTTP/1.1 500 Internal Server Error", "boom");
        let client = OllamaClient::new(&test_config(&url)).unwrap();

        let outcome = client.generate("summarize");
        assert!(outcome.is_failure());
        let block = outcome.into_block();
        assert!(block.starts_with("Error from API:"));
        assert!(block.contains("500"));
    }

    #[test]
    fn test_malformed_body_becomes_failure() {
        let (url, _rx) = spawn_backend("HTTP/1.1 200 OK", "not json at all");
        let client = OllamaClient::new(&test_config(&url)).unwrap();

        let outcome = client.generate("summarize");
        assert!(outcome.is_failure());
        assert!(outcome.into_block().contains("malformed response body"));
    }

    #[test]
    fn test_connection_refused_becomes_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/generate", listener.local_addr().unwrap());
        drop(listener);

        let client = OllamaClient::new(&test_config(&url)).unwrap();
        let outcome = client.generate("summarize");
        assert!(outcome.is_failure());
        assert!(outcome.into_block().starts_with("Error from API:"));
    }

    #[test]
    fn test_wire_format() {
        let (url, rx) = spawn_backend("HTTP/1.1 200 OK", r#"{"response":"ok"}"#);
        let config = Config::builder()
            .input_dir(".")
            .api_url(&url)
            .model("llama3")
            .num_ctx(4096)
            .build()
            .unwrap();
        let client = OllamaClient::new(&config).unwrap();
        client.generate("hello chunk");

        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /api/generate"));

        let payload: serde_json::Value = serde_json::from_str(body_of(&request)).unwrap();
        assert_eq!(payload["model"], "llama3");
        assert_eq!(payload["prompt"], "hello chunk");
        assert_eq!(payload["stream"], false);
        assert_eq!(payload["options"]["num_ctx"], 4096);
    }

    #[test]
    fn test_extra_headers_are_sent() {
        let (url, rx) = spawn_backend("HTTP/1.1 200 OK", r#"{"response":"ok"}"#);
        let config = Config::builder()
            .input_dir(".")
            .api_url(&url)
            .header("X-Api-Key", "secret")
            .build()
            .unwrap();
        let client = OllamaClient::new(&config).unwrap();
        client.generate("hello");

        let request = rx.recv().unwrap().to_lowercase();
        assert!(request.contains("x-api-key: secret"));
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let config = Config::builder()
            .input_dir(".")
            .header("bad name", "value")
            .build()
            .unwrap();
        let err = OllamaClient::new(&config).unwrap_err();
        assert!(err.is_config());
    }
}
