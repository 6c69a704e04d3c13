//! Formatting of tracing events emitted by lists.
//!
//! Every modification of a [`CowList`](crate::list::CowList) runs inside a
//! `cowlist` span that records the list name and the operation. Events
//! emitted inside this span describe the located insertion points and the
//! published versions.
//!
//! ```text
//! TRACE cowlist{list="numbers" op="insert_in_order"}: cowlist::list: published version=1 len=1
//! ```

use nu_ansi_term::{Color, Style};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    filter::Directive,
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields, FormattedFields},
    registry::LookupSpan,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// The log level that will be used if `RUST_LOG` is not defined.
pub const FALLBACK_LOG_LEVEL: Level = Level::INFO;

/// Create a new tracing subscriber with a list formatter.
///
/// # Panics
///
/// Panics when subscriber initilization fails.
pub fn init() {
    try_init().expect("Failed to set global tracing subscriber");
}

/// Create a new tracing subscriber with a list formatter.
///
/// # Errors
///
/// Fails if a global subscriber was allready set.
pub fn try_init() -> Result<(), TryInitError> {
    let subscriber = tracing_subscriber::fmt();
    let subscriber = subscriber.event_format(format());
    let subscriber = subscriber.with_env_filter(
        EnvFilter::builder()
            .with_default_directive(Directive::from(FALLBACK_LOG_LEVEL))
            .from_env_lossy(),
    );
    subscriber.finish().try_init()
}

/// An instance of a list formatter.
#[must_use]
pub fn format() -> ListFormat {
    ListFormat
}

/// A formatter that prints the active list spans in front of each event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFormat;

impl ListFormat {
    fn level_style(level: Level) -> Style {
        match level {
            Level::TRACE => Style::new().fg(Color::Cyan),
            Level::DEBUG => Style::new().fg(Color::Purple),
            Level::INFO => Style::new().fg(Color::Green),
            Level::WARN => Style::new().fg(Color::Yellow),
            Level::ERROR => Style::new().fg(Color::Red),
        }
    }

    fn fmt_spans<S, N>(
        writer: &mut Writer<'_>,
        ctx: &FmtContext<'_, S, N>,
        ansi: bool,
    ) -> std::fmt::Result
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        N: for<'a> FormatFields<'a> + 'static,
    {
        let Some(scope) = ctx.event_scope() else {
            return Ok(());
        };

        let bold = Style::new().bold();
        let mut seen = false;
        for span in scope.from_root() {
            styled(writer, bold, ansi, span.metadata().name())?;
            let ext = span.extensions();
            if let Some(fields) = ext.get::<FormattedFields<N>>() {
                if !fields.is_empty() {
                    styled(writer, bold, ansi, "{")?;
                    write!(writer, "{fields}")?;
                    styled(writer, bold, ansi, "}")?;
                }
            }
            styled(writer, Style::new().dimmed(), ansi, ":")?;
            seen = true;
        }

        if seen {
            writer.write_char(' ')?;
        }
        Ok(())
    }
}

impl<S, N> FormatEvent<S, N> for ListFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        styled(&mut writer, Self::level_style(*meta.level()), ansi, meta.level().as_str())?;
        writer.write_char(' ')?;

        Self::fmt_spans(&mut writer, ctx, ansi)?;

        styled(&mut writer, Style::new().dimmed(), ansi, meta.target())?;
        writer.write_str(": ")?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Writes `text`, wrapped in the ANSI codes of `style` if enabled.
fn styled(writer: &mut Writer<'_>, style: Style, ansi: bool, text: &str) -> std::fmt::Result {
    if ansi {
        write!(writer, "{}{text}{}", style.prefix(), style.suffix())
    } else {
        writer.write_str(text)
    }
}
