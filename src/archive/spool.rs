//! Plain-text exchange recorder
//!
//! Each exchange is appended to a per-run records file as
//!
//! ```text
//! ==> 2024-01-01T00:00:00+00:00 GET https://example.com/
//! <request headers>
//!
//! HTTP/1.1 200 OK
//! <response headers>
//!
//! <body>
//! ```
//!
//! and the body is also copied to a temporary file under the temp directory.

use crate::archive::{ArchiveError, Archiver, TempArtifact};
use crate::crawler::CapturedResponse;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::HeaderMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Archiver writing exchange records to a single append-only file
pub struct SpoolArchiver {
    temp_dir: PathBuf,
    records_path: PathBuf,
    records: Mutex<tokio::fs::File>,
}

impl SpoolArchiver {
    /// Creates both directories and opens a new records file
    ///
    /// # Arguments
    ///
    /// * `temp_dir` - Directory receiving temporary body copies
    /// * `output_dir` - Directory receiving the records file
    pub fn new(temp_dir: &Path, output_dir: &Path) -> Result<Self, ArchiveError> {
        std::fs::create_dir_all(temp_dir)?;
        std::fs::create_dir_all(output_dir)?;

        let records_path = output_dir.join(format!(
            "capture-{}-{}.records",
            Utc::now().format("%Y%m%d%H%M%S"),
            std::process::id()
        ));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&records_path)?;

        tracing::debug!("Archiving exchanges to {}", records_path.display());

        Ok(Self {
            temp_dir: temp_dir.to_path_buf(),
            records_path,
            records: Mutex::new(tokio::fs::File::from_std(file)),
        })
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    async fn append_record(&self, response: &CapturedResponse) -> Result<(), ArchiveError> {
        let record = format_record(response);

        let mut records = self.records.lock().await;
        records.write_all(&record).await?;
        records.flush().await?;
        Ok(())
    }

    async fn write_temp_copy(&self, body: Vec<u8>) -> Result<PathBuf, ArchiveError> {
        let temp_dir = self.temp_dir.clone();

        tokio::task::spawn_blocking(move || -> Result<PathBuf, ArchiveError> {
            let mut file = tempfile::Builder::new()
                .prefix("capture-")
                .suffix(".body")
                .tempfile_in(&temp_dir)?;
            file.write_all(&body)?;
            file.flush()?;
            let (_, path) = file.keep()?;
            Ok(path)
        })
        .await
        .map_err(|e| ArchiveError::Task(e.to_string()))?
    }
}

#[async_trait]
impl Archiver for SpoolArchiver {
    async fn archive(&self, response: &CapturedResponse) -> Result<TempArtifact, ArchiveError> {
        self.append_record(response).await?;
        let path = self.write_temp_copy(response.body.clone()).await?;
        Ok(TempArtifact::new(path))
    }
}

fn format_record(response: &CapturedResponse) -> Vec<u8> {
    let mut record = Vec::with_capacity(response.body.len() + 512);

    record.extend_from_slice(
        format!(
            "==> {} {} {}\n",
            Utc::now().to_rfc3339(),
            response.method,
            response.url
        )
        .as_bytes(),
    );
    write_headers(&mut record, &response.request_headers);
    record.push(b'\n');

    record.extend_from_slice(
        format!("{:?} {}\n", response.version, response.status).as_bytes(),
    );
    write_headers(&mut record, &response.headers);
    record.push(b'\n');

    record.extend_from_slice(&response.body);
    record.extend_from_slice(b"\n\n");
    record
}

fn write_headers(record: &mut Vec<u8>, headers: &HeaderMap) {
    for (name, value) in headers {
        record.extend_from_slice(name.as_str().as_bytes());
        record.extend_from_slice(b": ");
        record.extend_from_slice(value.as_bytes());
        record.push(b'\n');
    }
}
