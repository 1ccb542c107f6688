//! Stdin/stdout JSON bridge for the search host.
//!
//! Reads newline-delimited JSON `CommandEnvelope` messages from stdin,
//! runs each one against the search orchestrator and writes one
//! `ResponseEnvelope` per command as newline-delimited JSON to stdout.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use bt_search_core::{DocumentStore, SearchOrchestrator};
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::error::{HostError, Result};
use crate::host::contract::{CommandEnvelope, CommandName, ResponseEnvelope};

/// Request id used when the incoming line could not be parsed at all.
pub const PARSE_ERROR_ID: &str = "parse-error";

/// Run the bridge on the process's stdin/stdout until stdin closes.
pub async fn run_stdio_bridge<S: DocumentStore>(orchestrator: &SearchOrchestrator<S>) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    run_bridge(orchestrator, reader, writer).await
}

/// Run the bridge over an arbitrary line reader and writer.
///
/// Commands are handled one at a time in arrival order. Blank lines are
/// skipped. The bridge returns when the reader reaches EOF, or with an
/// error if the writer breaks.
pub async fn run_bridge<S, R, W>(
    orchestrator: &SearchOrchestrator<S>,
    mut reader: R,
    mut writer: W,
) -> Result<()>
where
    S: DocumentStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| HostError::Protocol(format!("failed to read from stdin: {e}")))?;

        if bytes_read == 0 {
            tracing::info!("stdin closed (EOF); shutting down stdio bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<CommandEnvelope>(trimmed) {
            Ok(envelope) => handle_command(orchestrator, &envelope).await,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    raw_line = %trimmed,
                    "failed to parse command envelope from stdin"
                );
                ResponseEnvelope::error(
                    PARSE_ERROR_ID,
                    format!("failed to parse command envelope: {e}"),
                )
            }
        };

        let json = serde_json::to_string(&response).map_err(|e| {
            HostError::Protocol(format!("failed to serialize response envelope: {e}"))
        })?;
        write_line(&mut writer, &json).await?;
    }

    Ok(())
}

/// Dispatch one validated command and build its response.
pub async fn handle_command<S: DocumentStore>(
    orchestrator: &SearchOrchestrator<S>,
    envelope: &CommandEnvelope,
) -> ResponseEnvelope {
    if let Err(e) = envelope.validate() {
        tracing::warn!(request_id = %envelope.request_id, error = %e, "rejected command envelope");
        return ResponseEnvelope::error(envelope.request_id.clone(), e.to_string());
    }

    match envelope.command {
        CommandName::HostPing => ResponseEnvelope::ok(envelope.request_id.clone(), json!({"pong": true})),
        CommandName::HostVersion => ResponseEnvelope::ok(
            envelope.request_id.clone(),
            json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            }),
        ),
        CommandName::Search => {
            let request = match envelope.search_request() {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!(request_id = %envelope.request_id, error = %e, "invalid search request");
                    return ResponseEnvelope::error(envelope.request_id.clone(), e.to_string());
                }
            };
            let page = u32::try_from(request.page).unwrap_or(u32::MAX);
            let response = orchestrator.search(&request.keyword, page).await;
            tracing::info!(
                request_id = %envelope.request_id,
                keyword = %request.keyword,
                total = response.total,
                "search completed"
            );
            match serde_json::to_value(&response) {
                Ok(payload) => ResponseEnvelope::ok(envelope.request_id.clone(), payload),
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize search response");
                    ResponseEnvelope::error(
                        envelope.request_id.clone(),
                        format!("failed to serialize search response: {e}"),
                    )
                }
            }
        }
    }
}

/// Write a single JSON line and flush.
async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> Result<()> {
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| HostError::Protocol(format!("failed to write to stdout: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| HostError::Protocol(format!("failed to write newline to stdout: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| HostError::Protocol(format!("failed to flush stdout: {e}")))?;
    Ok(())
}
