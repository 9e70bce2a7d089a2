use crate::format::{format_json, PrettyFormatter};
use crate::record::{self, Record};
use crate::tint::{HueScheduler, SharedScheduler, TintStream};
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Pretty layer for development terminals.
///
/// Each event runs through an explicit pipeline: collect the fields, format
/// the record, advance the hue scheduler, then push the text through the tint
/// stream as a single chunk. One event, one chunk, one fresh color.
pub struct TintLayer<W> {
    formatter: PrettyFormatter,
    scheduler: SharedScheduler,
    stream: Mutex<TintStream<W>>,
}

impl<W: Write> TintLayer<W> {
    pub fn new(sink: W) -> Self {
        let scheduler = HueScheduler::shared();
        Self {
            formatter: PrettyFormatter::default(),
            stream: Mutex::new(TintStream::new(sink, scheduler.clone())),
            scheduler,
        }
    }
}

impl TintLayer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<S, W> Layer<S> for TintLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let record = Record::from_event(event);
        let meta = event.metadata();
        let text = self.formatter.format(*meta.level(), meta.target(), &record);

        self.scheduler.lock().unwrap().generate();

        // Sink failures stay inside the logger.
        let mut stream = self.stream.lock().unwrap();
        let _ = stream.write_all(text.as_bytes());
        let _ = stream.flush();
    }
}

/// Line-JSON layer for production, one pino-shaped object per record.
pub struct JsonLayer<W> {
    pid: u32,
    hostname: String,
    sink: Mutex<W>,
}

impl<W: Write> JsonLayer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            pid: record::pid(),
            hostname: record::hostname(),
            sink: Mutex::new(sink),
        }
    }
}

impl JsonLayer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<S, W> Layer<S> for JsonLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + Send + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let record = Record::from_event(event);
        let meta = event.metadata();
        let line = format_json(*meta.level(), meta.target(), &record, self.pid, &self.hostname);

        let mut sink = self.sink.lock().unwrap();
        let _ = writeln!(sink, "{line}");
        let _ = sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl SharedSink {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn bg_prefix(line: &str) -> &str {
        assert!(line.starts_with("\x1b[48;2;"), "line not tinted: {line:?}");
        &line[..line.find('m').unwrap() + 1]
    }

    #[test]
    fn tinted_line_per_event() {
        let sink = SharedSink::default();
        let subscriber = tracing_subscriber::registry().with(TintLayer::new(sink.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(user = "ada", "hello tint");
        });

        let text = sink.text();
        assert!(text.ends_with("\x1b[0m\n"));
        assert!(text.contains("hello tint"));
        assert!(text.contains("user"));
        bg_prefix(&text);
    }

    #[test]
    fn color_advances_between_events() {
        let sink = SharedSink::default();
        let subscriber = tracing_subscriber::registry().with(TintLayer::new(sink.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("first");
            tracing::info!("second");
        });

        let text = sink.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_ne!(bg_prefix(lines[0]), bg_prefix(lines[1]));
    }

    #[test]
    fn multiline_event_stays_inside_one_chunk() {
        let sink = SharedSink::default();
        let subscriber = tracing_subscriber::registry().with(TintLayer::new(sink.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(key = "value", "payload");
        });

        let text = sink.text();
        // Header plus one field line, all under a single wrapper: exactly one
        // background assertion per embedded reset plus the leading one.
        let resets = text.matches("\x1b[0m").count();
        let backgrounds = text.matches("\x1b[48;2;").count();
        assert_eq!(backgrounds, resets);
    }

    #[test]
    fn json_layer_emits_parseable_lines() {
        let sink = SharedSink::default();
        let subscriber = tracing_subscriber::registry().with(JsonLayer::new(sink.clone()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(attempt = 2u64, "upstream flapping");
        });

        let text = sink.text();
        assert!(text.ends_with('\n'));
        let parsed: Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(parsed["level"], 40);
        assert_eq!(parsed["msg"], "upstream flapping");
        assert_eq!(parsed["attempt"], 2);
        assert!(parsed["time"].as_i64().unwrap() > 0);
        assert!(parsed["pid"].as_u64().is_some());
        assert!(parsed["hostname"].as_str().is_some());
        assert!(!text.contains("\x1b["));
    }
}
