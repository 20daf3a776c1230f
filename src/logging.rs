use anyhow::{Result, anyhow};
use chrono::Local;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Target of every event this crate emits
pub const LOG_TARGET: &str = "softassert";

/// Event formatter that tags softassert events.
///
/// Events from the code under test keep the plain `LEVEL [time]: fields`
/// layout. Failure events from the reporter are rendered as
/// `[#total kind] message`, and reports routed through `TracingLogger` are
/// prefixed with `assertion failed:`.
pub struct CustomFormatter;

/// Fields the reporter attaches to its failure events
#[derive(Default)]
struct FailureFields {
    kind: Option<String>,
    total: Option<u64>,
    message: Option<String>,
}

impl Visit for FailureFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "kind" {
            self.kind = Some(value.to_string());
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "total" {
            self.total = Some(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{:?}", value)),
            "kind" => self.kind = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let timestamp = Local::now().format("%H:%M:%S");

        let (emoji, level_str) = match *metadata.level() {
            Level::TRACE => ("🔬", "TRACE"),
            Level::DEBUG => ("🐛", "DEBUG"),
            Level::INFO => ("ℹ️ ", "INFO"),
            Level::WARN => ("⚠️ ", "WARN"),
            Level::ERROR => ("❌", "ERROR"),
        };

        write!(writer, "{} {} [{}]: ", emoji, level_str, timestamp)?;

        if metadata.target() != LOG_TARGET {
            ctx.field_format().format_fields(writer.by_ref(), event)?;
            return writeln!(writer);
        }

        let mut fields = FailureFields::default();
        event.record(&mut fields);
        let message = fields.message.unwrap_or_default();

        match (fields.kind, fields.total) {
            (Some(kind), Some(total)) => writeln!(writer, "[#{} {}] {}", total, kind, message),
            _ if *metadata.level() == Level::ERROR => {
                writeln!(writer, "assertion failed: {}", message)
            }
            _ => writeln!(writer, "{}", message),
        }
    }
}

/// Install a global subscriber using [`CustomFormatter`].
///
/// `RUST_LOG` takes precedence over `default_filter`. Output goes through the
/// test writer so the harness captures it per test. Fails if a global
/// subscriber is already set, e.g. by an earlier test in the same binary.
pub fn init_logging(default_filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .event_format(CustomFormatter)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_test_writer()
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}
