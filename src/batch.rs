use crate::config::AppConfig;
use crate::dispatch::dispatch;
use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::state::{AnalyticsRequest, BatchRecord, BatchSummary, PerfCounters};
use portable_atomic::Ordering;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Capacity of the worker -> writer channel
const RECORD_CHANNEL_CAPACITY: usize = 256;

/// Read one tagged JSON request from a file, or stdin when the path is `-`.
pub async fn read_request(path: &Path) -> AnalyticsResult<AnalyticsRequest> {
    read_json(path).await
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AnalyticsResult<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::AsyncReadExt::read_to_string(&mut tokio::io::stdin(), &mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AnalyticsError::Io(format!("{}: {e}", path.display())))?
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Run every request file concurrently and stream one JSON line per file to `out`.
/// A failing file produces an error record; it never aborts the batch.
pub async fn run_batch<W>(paths: Vec<PathBuf>, out: W, config: &AppConfig) -> AnalyticsResult<BatchSummary>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let counters = Arc::new(PerfCounters::new());
    let permits = Arc::new(Semaphore::new(config.batch_concurrency));
    let (record_tx, record_rx) = mpsc::channel::<BatchRecord>(RECORD_CHANNEL_CAPACITY);

    tracing::info!(files = paths.len(), concurrency = config.batch_concurrency, "batch started");

    let writer_counters = counters.clone();
    let writer = tokio::spawn(async move { run_record_writer(out, record_rx, writer_counters).await });

    let mut workers = JoinSet::new();
    for path in paths {
        let permits = permits.clone();
        let counters = counters.clone();
        let tx = record_tx.clone();
        let config = config.clone();

        workers.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| AnalyticsError::ChannelClosed(format!("semaphore: {e}")))?;

            counters.requests_received.fetch_add(1, Ordering::Relaxed);
            let request_id = uuid::Uuid::new_v4().to_string();
            let source = path.display().to_string();

            let outcome = match read_request(&path).await {
                Ok(request) => dispatch(request, &config),
                Err(e) => Err(e),
            };

            let record = match outcome {
                Ok(result) => {
                    counters.requests_succeeded.fetch_add(1, Ordering::Relaxed);
                    BatchRecord { request_id, source, ok: true, result: Some(result), error: None }
                }
                Err(e) => {
                    counters.requests_failed.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(request_id = %request_id, source = %source, error = %e, "request failed");
                    BatchRecord { request_id, source, ok: false, result: None, error: Some(e.to_string()) }
                }
            };

            tx.send(record)
                .await
                .map_err(|e| AnalyticsError::ChannelClosed(format!("record writer: {e}")))
        });
    }
    // Writer exits once every worker's sender is gone
    drop(record_tx);

    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined? {
            tracing::error!(error = %e, "batch worker error");
        }
    }

    writer.await??;

    let summary = counters.summary();
    tracing::info!(
        received = summary.received,
        succeeded = summary.succeeded,
        failed = summary.failed,
        written = summary.written,
        "batch finished"
    );
    Ok(summary)
}

/// Dedicated writer task. The only task that touches the output stream.
async fn run_record_writer<W>(
    mut out: W,
    mut rx: mpsc::Receiver<BatchRecord>,
    counters: Arc<PerfCounters>,
) -> AnalyticsResult<()>
where
    W: AsyncWrite + Unpin,
{
    tracing::debug!("record writer started");

    while let Some(record) = rx.recv().await {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        out.write_all(&line).await?;
        counters.records_written.fetch_add(1, Ordering::Relaxed);
    }
    out.flush().await?;

    tracing::debug!("record writer shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_batch_mixed_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(
            dir.path(),
            "expense.json",
            r#"{"type":"expense","principal":100000,"years":1,"expenseRatioA":0.0003,"expenseRatioB":0.0009}"#,
        );
        let bad = write_file(dir.path(), "broken.json", "{ not json");
        let invalid = write_file(
            dir.path(),
            "overlap.json",
            r#"{"type":"overlap","funds":[{"ticker":"IVV","holdings":[]}]}"#,
        );
        let out_path = dir.path().join("out.jsonl");
        let out = tokio::fs::File::create(&out_path).await.unwrap();

        let summary = run_batch(vec![good, bad, invalid], out, &AppConfig::default())
            .await
            .unwrap();

        assert_eq!(summary.received, 3);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.written, 3);

        let text = std::fs::read_to_string(&out_path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        let ok: Vec<_> = lines.iter().filter(|l| l["ok"] == true).collect();
        assert_eq!(ok.len(), 1);
        assert_eq!(ok[0]["result"]["type"], "expense");
        assert_eq!(ok[0]["result"]["yearlyData"][0]["savings"], 60.0);
        assert!(lines.iter().all(|l| l["requestId"].as_str().map_or(false, |s| s.len() == 36)));
    }

    #[tokio::test]
    async fn test_missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = tokio::fs::File::create(dir.path().join("out.jsonl")).await.unwrap();
        let summary = run_batch(vec![dir.path().join("nope.json")], out, &AppConfig::default())
            .await
            .unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.written, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let summary = run_batch(Vec::new(), tokio::io::sink(), &AppConfig::default())
            .await
            .unwrap();
        assert_eq!(summary.received, 0);
        assert_eq!(summary.written, 0);
    }

    #[tokio::test]
    async fn test_read_request_parses_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "norm.json",
            r#"{"type":"normalize","prices":[{"date":"2024-01-02","close":50.0}]}"#,
        );
        let req = read_request(&path).await.unwrap();
        assert_eq!(req.kind(), "normalize");
    }
}
