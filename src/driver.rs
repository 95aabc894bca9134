use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::bbox::BoundingBox;
use crate::config::Endpoint;
use crate::fetch::{self, FetchError, FetchOptions, FetchReport};

/// One scheduled call: where the body goes and where it comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub destination: PathBuf,
    pub url: String,
}

pub fn plan_requests(endpoints: &[Endpoint], bbox: &BoundingBox, output_dir: &Path) -> Vec<FetchRequest> {
    endpoints
        .iter()
        .map(|endpoint| FetchRequest {
            destination: output_dir.join(endpoint.output_file),
            url: bbox.map_url(endpoint.base_url),
        })
        .collect()
}

/// Runs the requests one after the other. The first failure aborts the run;
/// files saved by earlier requests are left in place.
pub async fn run<W: Write>(
    client: &Client,
    requests: &[FetchRequest],
    options: FetchOptions,
    out: &mut W,
) -> Result<Vec<FetchReport>, FetchError> {
    let mut reports = Vec::with_capacity(requests.len());

    for (i, request) in requests.iter().enumerate() {
        info!("[{}/{}] Fetching into {}", i + 1, requests.len(), request.destination.display());
        let report = fetch::fetch_and_save(client, &request.destination, &request.url, options, out).await?;
        info!(
            status = %report.status,
            bytes = report.bytes,
            elapsed = ?report.elapsed,
            "[{}/{}] Done",
            i + 1,
            requests.len()
        );
        reports.push(report);
    }

    Ok(reports)
}
