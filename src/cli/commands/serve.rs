//! JSON-lines tool loop.
//!
//! Each input line is `{"id": ..., "tool": "...", "arguments": {...}}`;
//! each output line is `{"id": ..., "ok": true, "result": ...}` or
//! `{"id": ..., "ok": false, "error": "..."}`. A bad line gets an error
//! response and the loop carries on.

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::gateway::PlayerGateway;
use crate::tools::{ToolCall, Toolbox};

/// One response line.
#[derive(Debug, Serialize, PartialEq)]
pub struct ServeResponse {
    pub id: Value,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServeResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, error: impl ToString) -> Self {
        Self {
            id,
            ok: false,
            result: None,
            error: Some(error.to_string()),
        }
    }
}

/// Answer every request line from `reader` on `writer` until end of input.
///
/// Returns the number of requests answered.
pub async fn serve<G, R, W>(toolbox: &Toolbox<G>, reader: R, mut writer: W) -> Result<usize>
where
    G: PlayerGateway + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut answered = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(toolbox, &line).await;
        if let Some(error) = &response.error {
            tracing::warn!("Tool call failed: {}", error);
        }

        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        answered += 1;
    }

    tracing::debug!("Input closed after {} requests", answered);
    Ok(answered)
}

async fn handle_line<G: PlayerGateway + ?Sized>(toolbox: &Toolbox<G>, line: &str) -> ServeResponse {
    let mut request: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return ServeResponse::failure(Value::Null, format!("Invalid JSON: {}", e)),
    };

    let id = request
        .as_object_mut()
        .and_then(|object| object.remove("id"))
        .unwrap_or(Value::Null);

    let call = match ToolCall::from_value(request) {
        Ok(call) => call,
        Err(e) => return ServeResponse::failure(id, e),
    };

    match toolbox.call(call).await {
        Ok(result) => ServeResponse::success(id, result),
        Err(e) => ServeResponse::failure(id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::gateway::MockGateway;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::io::BufReader;

    async fn run(input: &str) -> (Vec<Value>, Arc<MockGateway>) {
        let gateway = Arc::new(MockGateway::new());
        let toolbox = Toolbox::from_settings(gateway.clone(), &Settings::default());
        let mut output = Vec::new();

        serve(&toolbox, BufReader::new(input.as_bytes()), &mut output)
            .await
            .unwrap();

        let responses = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (responses, gateway)
    }

    #[tokio::test]
    async fn answers_each_line_with_its_id() {
        let input = concat!(
            r#"{"id": 1, "tool": "getStatus"}"#,
            "\n",
            r#"{"id": "two", "tool": "runPlayerCommand", "arguments": {"commands": [["next"]]}}"#,
            "\n"
        );

        let (responses, gateway) = run(input).await;

        assert_eq!(
            responses,
            vec![
                json!({"id": 1, "ok": true, "result": {"state": "stop"}}),
                json!({"id": "two", "ok": true, "result": {"state": "stop"}}),
            ]
        );
        assert_eq!(gateway.command_batches().len(), 2);
    }

    #[tokio::test]
    async fn bad_lines_do_not_stop_the_loop() {
        let input = concat!(
            "not json\n",
            "\n",
            r#"{"id": 2, "tool": "shuffle"}"#,
            "\n",
            r#"{"id": 3, "tool": "getStatus"}"#,
            "\n"
        );

        let (responses, _) = run(input).await;

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["ok"], false);
        assert_eq!(responses[1]["id"], 2);
        assert!(responses[1]["error"]
            .as_str()
            .unwrap()
            .contains("shuffle"));
        assert_eq!(responses[2]["ok"], true);
    }

    #[tokio::test]
    async fn gateway_errors_become_error_responses() {
        let input = r#"{"id": 9, "tool": "browseDirectory", "arguments": {"paths": ["missing"]}}"#;

        let (responses, _) = run(input).await;

        assert_eq!(responses[0]["ok"], false);
        assert!(responses[0].get("result").is_none());
    }
}
