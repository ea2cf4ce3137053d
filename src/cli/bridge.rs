//! The `bridge` command: a component driven over JSON lines.
//!
//! Each input line is one [`BridgeRequest`]. Rendered markup and errors go
//! out as [`BridgeOutput`] lines, interleaved with the component's
//! [`HostMessage`](crate::HostMessage)s on the same stream.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::{
    component::{Component, Rendered},
    config::RenderPolicy,
    render::{error_html, to_html},
    Error, HostConfig, JsonLinesHost,
};

/// Messages from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeRequest {
    /// New configuration.
    Render {
        /// The configuration, as the host sends it.
        args: HostConfig,
    },
    /// User selected data rows.
    Select {
        /// Zero-based data row ids.
        rows: Vec<usize>,
    },
    /// Host accepted the last reported value.
    Ack,
}

/// Output lines besides host messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BridgeOutput {
    /// Markup for a successful render.
    Rendered {
        /// HTML fragment.
        html: String,
    },
    /// A request failed; for renders `html` holds the error view.
    Error {
        /// Error description.
        message: String,
        /// Error markup, when there is something to show.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        html: Option<String>,
    },
}

pub(crate) fn cmd_bridge(policy: RenderPolicy) -> crate::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_bridge(stdin.lock(), stdout.lock(), policy)
}

/// Drive a component from `input` until end of stream.
///
/// Malformed lines and rejected selections are answered with an error line;
/// only transport failures end the loop.
///
/// # Errors
///
/// I/O and JSON errors on the streams.
pub fn run_bridge<R: BufRead, W: Write>(
    input: R,
    output: W,
    policy: RenderPolicy,
) -> crate::Result<()> {
    let mut component = Component::new(policy, JsonLinesHost::new(output));

    for (line_no, line) in input.lines().enumerate() {
        let line = line.map_err(Error::io_no_path)?;
        if line.trim().is_empty() {
            continue;
        }

        let request: BridgeRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                log::warn!("line {}: malformed request: {e}", line_no + 1);
                emit(&mut component, &error_output(&Error::from(e), None))?;
                continue;
            }
        };

        match request {
            BridgeRequest::Render { args } => {
                let out = match component.render(args) {
                    Rendered::Table(decoded) => BridgeOutput::Rendered {
                        html: to_html(&decoded),
                    },
                    Rendered::Failed(err) => {
                        let html = error_html(&err);
                        error_output(&err, Some(html))
                    }
                };
                emit(&mut component, &out)?;
                component.mount()?;
            }
            BridgeRequest::Select { rows } => {
                if let Err(err) = component.select_rows(rows) {
                    if matches!(err, Error::Io { .. } | Error::Json(_)) {
                        return Err(err);
                    }
                    log::warn!("line {}: {err}", line_no + 1);
                    emit(&mut component, &error_output(&err, None))?;
                }
            }
            BridgeRequest::Ack => component.acknowledge(),
        }
    }

    Ok(())
}

fn error_output(err: &Error, html: Option<String>) -> BridgeOutput {
    BridgeOutput::Error {
        message: err.to_string(),
        html,
    }
}

fn emit<W: Write>(
    component: &mut Component<JsonLinesHost<W>>,
    out: &BridgeOutput,
) -> crate::Result<()> {
    let writer = component.host_mut().writer_mut();
    serde_json::to_writer(&mut *writer, out)?;
    writer.write_all(b"\n").map_err(Error::io_no_path)?;
    writer.flush().map_err(Error::io_no_path)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::config::ReportTrigger;

    const RENDER: &str = r#"{"type":"render","args":{"data":{"format":"grid","header_rows":1,"header_columns":1,"cells":[[{"type":"blank"},{"type":"columns","content":"foo"}],[{"type":"index","content":0},{"type":"data","content":"hey"}]]}}}"#;

    fn run(input: &str, policy: RenderPolicy) -> Vec<Value> {
        let mut out = Vec::new();
        run_bridge(input.as_bytes(), &mut out, policy).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_render_then_select() {
        let input = format!("{RENDER}\n{}\n", r#"{"type":"select","rows":[0]}"#);
        let lines = run(&input, RenderPolicy::default());
        let types: Vec<&str> = lines.iter().map(|v| v["type"].as_str().unwrap()).collect();
        assert_eq!(
            types,
            vec!["rendered", "setFrameHeight", "componentReady", "setComponentValue"]
        );
        assert!(lines[0]["html"].as_str().unwrap().contains("<td>hey</td>"));
        assert_eq!(lines[3]["value"], serde_json::json!([0]));
    }

    #[test]
    fn test_report_on_mount_and_ack() {
        let input = format!("{RENDER}\n{}\n", r#"{"type":"ack"}"#);
        let policy = RenderPolicy::default().with_report(ReportTrigger::OnMount);
        let lines = run(&input, policy);
        assert_eq!(lines.last().unwrap()["type"], "setComponentValue");
        assert_eq!(lines.last().unwrap()["value"]["format"], "grid");
    }

    #[test]
    fn test_bad_input_keeps_running() {
        let input = format!("not json\n\n{}\n{RENDER}\n", r#"{"type":"select","rows":[0]}"#);
        let lines = run(&input, RenderPolicy::default());
        assert_eq!(lines[0]["type"], "error");
        assert_eq!(lines[1]["type"], "error");
        assert!(lines[1]["message"].as_str().unwrap().contains("No table"));
        assert_eq!(lines[2]["type"], "rendered");
    }

    #[test]
    fn test_failed_render_shows_error_view() {
        let input = RENDER.replace(r#""type":"data""#, r#""type":"dat""#);
        let lines = run(&input, RenderPolicy::default());
        assert_eq!(lines[0]["type"], "error");
        assert!(lines[0]["html"].as_str().unwrap().contains("table-error"));
        assert!(lines[0]["message"].as_str().unwrap().contains("'dat'"));
    }
}
