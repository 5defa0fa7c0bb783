//! Minimal HTTP/1 client over a plain TCP connection.
//!
//! Each call opens one connection, sends one request and reads the whole
//! response. Providers are tiny single-endpoint services, so connection
//! reuse is not worth the extra state.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;

use tokio::net::TcpStream;
use url::{Host, Position, Url};

use crate::ClientError;

/// Send an HTTP request to `url` and return the status and body text.
///
/// Non-2xx statuses are returned, not treated as errors; the caller decides.
///
/// # Errors
/// Returns [`ClientError::Connect`] if the TCP connection fails,
/// [`ClientError::Http`] on handshake or transfer errors, and
/// [`ClientError::InvalidUrl`] if `url` has no host or port.
pub(crate) async fn send_request(
    url: &Url,
    method: Method,
    body: Option<String>,
) -> Result<(StatusCode, String), ClientError> {
    // `host_str` keeps IPv6 brackets, which belong in the Host header only.
    let host = url
        .host_str()
        .ok_or_else(|| ClientError::InvalidUrl(format!("{url}: missing host")))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| ClientError::InvalidUrl(format!("{url}: missing port")))?;

    let stream = connect(url, port)
        .await
        .map_err(|e| ClientError::Connect(format!("{host}:{port}: {e}")))?;

    let io = TokioIo::new(stream);

    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| ClientError::Http(format!("handshake: {e}")))?;

    // Drive the connection in the background.
    tokio::spawn(async move {
        if let Err(e) = conn.await {
            tracing::debug!("provider connection closed: {e}");
        }
    });

    let body_bytes = body.map(Bytes::from).unwrap_or_default();
    let content_len = body_bytes.len();

    let host_header = match url.port() {
        Some(p) => format!("{host}:{p}"),
        None => host.to_owned(),
    };

    let mut builder = Request::builder()
        .method(method)
        .uri(&url[Position::BeforePath..])
        .header(hyper::header::HOST, host_header)
        .header(hyper::header::ACCEPT, "application/json");

    if content_len > 0 {
        builder = builder.header(hyper::header::CONTENT_TYPE, "application/json");
        builder = builder.header(hyper::header::CONTENT_LENGTH, content_len.to_string());
    }

    let req = builder
        .body(Full::new(body_bytes))
        .map_err(|e| ClientError::Http(format!("build request: {e}")))?;

    let resp: Response<_> = sender
        .send_request(req)
        .await
        .map_err(|e| ClientError::Http(format!("send request: {e}")))?;

    let status = resp.status();
    let body_bytes = resp
        .into_body()
        .collect()
        .await
        .map_err(|e| ClientError::Http(format!("read response body: {e}")))?
        .to_bytes();

    Ok((status, String::from_utf8_lossy(&body_bytes).into_owned()))
}

/// Open a TCP connection to the host of `url`.
///
/// IP literals are connected to directly; domain names go through the
/// resolver.
async fn connect(url: &Url, port: u16) -> std::io::Result<TcpStream> {
    match url.host() {
        Some(Host::Ipv4(ip)) => TcpStream::connect(SocketAddr::from((ip, port))).await,
        Some(Host::Ipv6(ip)) => TcpStream::connect(SocketAddr::from((ip, port))).await,
        Some(Host::Domain(domain)) => TcpStream::connect((domain, port)).await,
        None => Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "missing host")),
    }
}
