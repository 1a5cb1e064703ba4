use crate::request::{Body, HttpRequest};
use anyhow::{Context, anyhow};
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes a request and buffers the full response body.
pub async fn execute(req: &HttpRequest) -> anyhow::Result<HttpResponse> {
    let resp = send(req).await?;
    let status = resp.status().as_u16();
    let body = resp
        .bytes()
        .await
        .context("failed reading response body")?
        .to_vec();

    Ok(HttpResponse { status, body })
}

/// Executes a request and streams the response body chunk-by-chunk into
/// `dest`, returning the number of bytes written. Used for audio downloads
/// that should not be held in memory.
///
/// Non-2xx statuses fail before the file is touched. The file handle is
/// scoped to this call and closes on every exit path; a partial file from a
/// mid-stream failure is left in place.
pub async fn stream_to_file(req: &HttpRequest, dest: &Path) -> anyhow::Result<u64> {
    let resp = send(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.bytes().await.unwrap_or_default();
        return Err(anyhow!(
            "request failed: status={} body={}",
            status.as_u16(),
            String::from_utf8_lossy(&body)
        ));
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("create output file {}", dest.display()))?;

    let mut written: u64 = 0;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("read response stream")?;
        file.write_all(&chunk).await.context("write output chunk")?;
        written += chunk.len() as u64;
    }
    file.flush().await.context("flush output file")?;

    Ok(written)
}

async fn send(req: &HttpRequest) -> anyhow::Result<reqwest::Response> {
    // Important: without an explicit timeout, a broken endpoint can hang the
    // whole screening run indefinitely.
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60))
        .build()
        .context("build http client")?;

    let mut headers = HeaderMap::new();
    for (k, v) in &req.headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .with_context(|| format!("invalid header name: {k}"))?;
        let value =
            HeaderValue::from_str(v).with_context(|| format!("invalid header value for {k}"))?;
        headers.insert(name, value);
    }

    let builder = match req.method.as_str() {
        "GET" => client.get(&req.url),
        "POST" => client.post(&req.url),
        other => return Err(anyhow!("unsupported method: {other}")),
    }
    .headers(headers);

    let builder = match &req.body {
        Body::Empty => builder,
        Body::Json(s) => builder.body(s.clone()),
    };

    builder.send().await.context("http request failed")
}
