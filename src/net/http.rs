// SPDX-License-Identifier: MPL-2.0
//! HTTP transport built on `reqwest` streaming bodies.

use super::{ByteStream, Transport, TransportError};
use crate::config::Config;
use crate::error::{Error, Result};
use futures_util::{future, StreamExt, TryFutureExt, TryStreamExt};
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    max_body_bytes: u64,
}

impl HttpTransport {
    /// Build a client with the redirect policy, timeout and user agent from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the TLS backend cannot be initialized.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit()))
            .user_agent(config.user_agent());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes(),
        })
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, max_body_bytes: u64) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &Url) -> ByteStream {
        let request = self.client.get(url.clone());
        let limit = self.max_body_bytes;

        let response = async move {
            let response = request.send().await.map_err(TransportError::from)?;
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status(status.as_u16()));
            }
            if response.content_length().is_some_and(|len| len > limit) {
                return Err(TransportError::BodyTooLarge { limit });
            }
            Ok::<_, TransportError>(response.bytes_stream().map_err(TransportError::from))
        };

        let mut received: u64 = 0;
        response
            .try_flatten_stream()
            .and_then(move |chunk| {
                received += chunk.len() as u64;
                if received > limit {
                    future::err(TransportError::BodyTooLarge { limit })
                } else {
                    future::ok(chunk)
                }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve `response` verbatim to a single connection and return the URL.
    fn serve_once(response: Vec<u8>) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = stream.write_all(&response);
                let _ = stream.flush();
            }
        });
        Url::parse(&format!("http://{addr}/image.png")).expect("valid test url")
    }

    async fn collect(
        transport: &HttpTransport,
        url: &Url,
    ) -> std::result::Result<Vec<u8>, TransportError> {
        transport
            .fetch(url)
            .try_fold(Vec::new(), |mut body, chunk| async move {
                body.extend_from_slice(&chunk);
                Ok(body)
            })
            .await
    }

    fn http_response(status: &str, body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    #[tokio::test]
    async fn collects_successful_body() {
        let url = serve_once(http_response("200 OK", b"pixels"));
        let transport = HttpTransport::from_config(&Config::default()).expect("client");

        let body = collect(&transport, &url).await.expect("body");

        assert_eq!(&body[..], b"pixels");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let url = serve_once(http_response("404 Not Found", b"missing"));
        let transport = HttpTransport::from_config(&Config::default()).expect("client");

        let result = collect(&transport, &url).await;

        assert_eq!(result.err(), Some(TransportError::Status(404)));
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let url = serve_once(http_response("200 OK", &[0u8; 64]));
        let transport = HttpTransport::with_client(reqwest::Client::new(), 16);

        let result = collect(&transport, &url).await;

        assert_eq!(result.err(), Some(TransportError::BodyTooLarge { limit: 16 }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("address");
        drop(listener);
        let url = Url::parse(&format!("http://{addr}/")).expect("url");
        let transport = HttpTransport::from_config(&Config::default()).expect("client");

        let result = collect(&transport, &url).await;

        assert!(matches!(result, Err(TransportError::Request(_))));
    }
}
