use reqwest::{Client, StatusCode};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to write fetch report: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Refuse to save non-2xx responses. Off by default: error pages are
    /// saved like any other body.
    pub check_status: bool,
}

#[derive(Debug)]
pub struct FetchReport {
    pub status: StatusCode,
    pub bytes: usize,
    pub elapsed: Duration,
}

/// No default timeout: a server that never answers blocks forever unless
/// `timeout` is given.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// GETs `url` and writes the whole body to `destination`, reporting the URL
/// and the elapsed time on `out`.
///
/// The body is read completely before `destination` is opened, so a failed
/// request leaves any existing file untouched.
pub async fn fetch_and_save<W: Write>(
    client: &Client,
    destination: &Path,
    url: &str,
    options: FetchOptions,
    out: &mut W,
) -> Result<FetchReport, FetchError> {
    writeln!(out, "{url}").map_err(FetchError::Output)?;
    out.flush().map_err(FetchError::Output)?;

    let start = Instant::now();

    let request_error = |source: reqwest::Error| FetchError::Request {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().await.map_err(request_error)?;
    let status = response.status();
    debug!(%url, %status, "Received response headers");

    let body = response.bytes().await.map_err(request_error)?;

    if !status.is_success() {
        if options.check_status {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        warn!(%url, %status, "Saving body of unsuccessful response");
    }

    write_body(destination, &body).map_err(|source| FetchError::Write {
        path: destination.to_path_buf(),
        source,
    })?;

    let elapsed = start.elapsed();
    writeln!(out, "Fetch time: {}", elapsed.as_secs_f64()).map_err(FetchError::Output)?;

    info!(
        path = %destination.display(),
        bytes = body.len(),
        "Saved response body"
    );

    Ok(FetchReport {
        status,
        bytes: body.len(),
        elapsed,
    })
}

fn write_body(destination: &Path, body: &[u8]) -> io::Result<()> {
    let mut file = File::create(destination)?;
    file.write_all(body)?;
    file.flush()
}
