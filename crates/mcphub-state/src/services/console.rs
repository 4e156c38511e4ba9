// Console interceptor
// Tees application log output to the debug relay without altering call
// sites: a `log::Log` decorator delegates to the base sink first, then
// best-effort forwards a rendered line over a channel drained by a detached
// task. Forwarding can be toggled at runtime; registration with the `log`
// facade happens once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use tokio::sync::mpsc;

use crate::stores::debug::DebugStore;

/// Handle controlling whether log records are forwarded to the debug relay
#[derive(Clone)]
pub struct ConsoleInterceptor {
    forwarding: Arc<AtomicBool>,
}

impl ConsoleInterceptor {
    /// Start forwarding. Calling while already installed is a no-op.
    pub fn install(&self) {
        if !self.forwarding.swap(true, Ordering::SeqCst) {
            log::info!("[console] log forwarding installed");
        }
    }

    /// Stop forwarding. Calling while not installed is a no-op.
    pub fn uninstall(&self) {
        if self.forwarding.swap(false, Ordering::SeqCst) {
            log::info!("[console] log forwarding uninstalled");
        }
    }

    pub fn is_installed(&self) -> bool {
        self.forwarding.load(Ordering::SeqCst)
    }
}

struct ForwardedLine {
    level: Level,
    line: String,
}

/// Logger decorator: base sink first, then the relay channel
struct RelayLogger {
    base: Box<dyn Log>,
    forwarding: Arc<AtomicBool>,
    tx: mpsc::UnboundedSender<ForwardedLine>,
}

impl Log for RelayLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.base.enabled(metadata) || self.forwarding.load(Ordering::Relaxed)
    }

    fn log(&self, record: &Record) {
        // Existing behavior is preserved unconditionally
        self.base.log(record);

        if !self.forwarding.load(Ordering::Relaxed) {
            return;
        }
        // The relay itself logs dropped-entry diagnostics through this same
        // facade; skipping that one module prevents a forwarding feedback
        // loop while every other store's warnings still reach the relay.
        if record.target().starts_with("mcphub_state::stores::debug") {
            return;
        }

        let line = if record.target().is_empty() {
            record.args().to_string()
        } else {
            format!("[{}] {}", record.target(), record.args())
        };
        // A full or closed channel must never fail the logging call site
        let _ = self.tx.send(ForwardedLine {
            level: record.level(),
            line,
        });
    }

    fn flush(&self) {
        self.base.flush();
    }
}

/// Register the decorating logger with the `log` facade and spawn the relay
/// drain task. Must be called from within a tokio runtime, once.
pub fn init(
    base: Box<dyn Log>,
    max_level: LevelFilter,
    relay: DebugStore,
) -> Result<ConsoleInterceptor, SetLoggerError> {
    let forwarding = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::unbounded_channel();

    spawn_forwarder(rx, relay);

    log::set_boxed_logger(Box::new(RelayLogger {
        base,
        forwarding: forwarding.clone(),
        tx,
    }))?;
    log::set_max_level(max_level);

    Ok(ConsoleInterceptor { forwarding })
}

fn spawn_forwarder(mut rx: mpsc::UnboundedReceiver<ForwardedLine>, relay: DebugStore) {
    tokio::spawn(async move {
        while let Some(forwarded) = rx.recv().await {
            match forwarded.level {
                Level::Error => relay.error(&forwarded.line, None).await,
                Level::Warn => relay.warn(&forwarded.line, None).await,
                _ => relay.log(&forwarded.line, None).await,
            }
        }
    });
}

// ============================================================================
// Argument rendering
// ============================================================================

/// One argument of a forwarded console line
#[derive(Debug, Clone)]
pub enum ConsoleArg {
    Text(String),
    Error { name: String, message: String },
    Value(serde_json::Value),
}

impl ConsoleArg {
    pub fn text(text: impl Into<String>) -> Self {
        ConsoleArg::Text(text.into())
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        ConsoleArg::Error {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<&str> for ConsoleArg {
    fn from(text: &str) -> Self {
        ConsoleArg::Text(text.to_string())
    }
}

impl From<serde_json::Value> for ConsoleArg {
    fn from(value: serde_json::Value) -> Self {
        ConsoleArg::Value(value)
    }
}

/// Render arguments into one line: text as-is, errors as `name: message`,
/// values serialized with a plain-text coercion fallback; joined by spaces.
pub fn render_args(args: &[ConsoleArg]) -> String {
    args.iter()
        .map(|arg| match arg {
            ConsoleArg::Text(text) => text.clone(),
            ConsoleArg::Error { name, message } => format!("{}: {}", name, message),
            ConsoleArg::Value(value) => {
                serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Entry point for console events reported by the host UI layer: mixed
/// arguments are rendered into one line and written through the debug relay,
/// which no-ops while debug mode is off.
pub async fn capture(relay: &DebugStore, level: Level, args: &[ConsoleArg]) {
    let line = render_args(args);
    match level {
        Level::Error => relay.error(&line, None).await,
        Level::Warn => relay.warn(&line, None).await,
        _ => relay.log(&line, None).await,
    }
}
