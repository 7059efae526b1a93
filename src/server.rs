//! Newline-delimited stdio transport around the dispatcher.
//!
//! The loop announces readiness with a bare `READY` line, then reads one
//! request per line and writes exactly one response line for it before
//! reading the next. Output is flushed after every line.

use serde_json::json;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::ServerConfig;
use crate::jsonrpc::Dispatcher;
use crate::logging::{debug, error, info};
use crate::{Error, Result, codes};

/// Line written once at startup, before any response
pub const READY_LINE: &str = "READY";

/// Stdio JSON-RPC server
pub struct Server {
    dispatcher: Dispatcher,
    config: ServerConfig,
}

impl Server {
    /// Server with every fixture method registered
    pub fn new(config: ServerConfig) -> Self {
        Self::with_dispatcher(crate::create_default_dispatcher(), config)
    }

    /// Server around a custom dispatcher
    pub fn with_dispatcher(dispatcher: Dispatcher, config: ServerConfig) -> Self {
        Self { dispatcher, config }
    }

    /// The dispatcher requests are routed through
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Configuration the server was started with
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on the process's standard input and output until end of input
    pub async fn run_stdio(&self) -> Result<()> {
        self.run(BufReader::new(io::stdin()), io::stdout()).await
    }

    /// Serve requests from `reader`, writing responses to `writer`.
    ///
    /// Returns when `reader` reaches end of stream. Bad requests never end
    /// the loop; only transport I/O errors do.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            "Fixture server starting (framework path {})",
            self.config.framework_path.display()
        );

        write_line(&mut writer, READY_LINE.as_bytes()).await?;

        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }

            let request = line.trim_ascii();
            if request.is_empty() {
                continue;
            }

            let response = match self.dispatcher.dispatch_bytes(request).await {
                Ok(response) => response,
                Err(e) => {
                    error!("Failed to build response: {}", e);
                    internal_error_line(&e)
                }
            };

            write_line(&mut writer, response.as_bytes()).await?;
        }

        info!(
            "End of input after {} routed requests",
            self.dispatcher.request_count()
        );
        Ok(())
    }
}

async fn write_line<W>(writer: &mut W, line: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    debug!("Wrote {} bytes", line.len() + 1);
    Ok(())
}

// Last-resort response when a request's own response could not be serialized.
fn internal_error_line(err: &Error) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": {
            "code": codes::INTERNAL_ERROR,
            "message": format!("Internal error: {}", err),
            "data": {},
        },
    })
    .to_string()
}
