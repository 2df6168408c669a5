//! Colorful console output for benchmark runs.
//!
//! Provides a custom `tracing` layer that formats runner events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Series start/end and one line per measured size
//! - **WARN**: Dropped sizes
//! - **DEBUG**: Size start with the planned trial count
//! - **TRACE**: Individual trials

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SERIES_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "asymptote=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(BenchmarkConsoleLayer)
            .try_init();
    });
}

// Marks the start of a series for elapsed time tracking.
fn mark_series_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SERIES_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since series start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SERIES_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
    _                                _       _
   / \   ___ _   _ _ __ ___  _ __ | |_ ___ | |_ ___
  / _ \ / __| | | | '_ ` _ \| '_ \| __/ _ \| __/ _ \
 / ___ \\__ \ |_| | | | | | | |_) | || (_) | ||  __/
/_/   \_\___/\__, |_| |_| |_| .__/ \__\___/ \__\___|
             |___/          |_|
"#;

    let version_line = format!(
        "              v{} - Empirical Complexity Benchmarks\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats benchmark events with colors.
pub struct BenchmarkConsoleLayer;

impl<S: Subscriber> Layer<S> for BenchmarkConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if !accepts_target(metadata.target()) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

// Events from the runner (`asymptote_benchmark`) and the command line tool
// (`asymptote`).
fn accepts_target(target: &str) -> bool {
    target.starts_with("asymptote")
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    series: Option<String>,
    subject: Option<String>,
    expected: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    termination: Option<String>,
    markdown: Option<String>,
    csv: Option<String>,
    size: Option<u64>,
    sizes: Option<u64>,
    trials: Option<u64>,
    planned: Option<u64>,
    samples: Option<u64>,
    dropped: Option<u64>,
    average_us: Option<u64>,
    duration_us: Option<u64>,
    duration_ms: Option<u64>,
    completed: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "series" => self.series = Some(value),
            "subject" => self.subject = Some(value),
            "expected" => self.expected = Some(value),
            "status" => self.status = Some(value),
            "reason" => self.reason = Some(value),
            "termination" => self.termination = Some(value),
            "markdown" => self.markdown = Some(value),
            "csv" => self.csv = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "size" => self.size = Some(value),
            "sizes" => self.sizes = Some(value),
            "trials" => self.trials = Some(value),
            "planned" => self.planned = Some(value),
            "samples" => self.samples = Some(value),
            "dropped" => self.dropped = Some(value),
            "average_us" => self.average_us = Some(value),
            "duration_us" => self.duration_us = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "completed" {
            self.completed = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "series_start" => format_series_start(v),
        "series_end" => format_series_end(v),
        "size_start" => format_size_start(v),
        "size_end" => format_size_end(v),
        "size_dropped" => format_size_dropped(v),
        "trial" => format_trial(v, level),
        "report_written" => format_report_written(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_series_start(v: &EventVisitor) -> String {
    mark_series_start();
    let series = v.series.as_deref().unwrap_or("Unknown");
    let subject = v.subject.as_deref().unwrap_or("Unknown");
    let expected = v.expected.as_deref().unwrap_or("?");
    let sizes = v.sizes.unwrap_or(0);

    format!(
        "{} {} {} │ {} │ expected {} │ {} sizes",
        format_elapsed(),
        "▶".bright_green().bold(),
        series.white().bold(),
        subject.bright_cyan(),
        expected.bright_magenta(),
        format_count(sizes).bright_yellow(),
    )
}

fn format_series_end(v: &EventVisitor) -> String {
    let series = v.series.as_deref().unwrap_or("Unknown");
    let samples = v.samples.unwrap_or(0);
    let dropped = v.dropped.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let termination = v.termination.as_deref().unwrap_or("");

    let mut output = format!(
        "{} {} {} complete │ {} │ {} sizes",
        format_elapsed(),
        "■".bright_cyan().bold(),
        series.white().bold(),
        format_duration_ms(duration).yellow(),
        format_count(samples).white(),
    );

    if dropped > 0 {
        output.push_str(&format!(
            " │ {} dropped",
            format_count(dropped).bright_red()
        ));
    }

    if !termination.is_empty() && termination != "all sizes attempted" {
        output.push_str(&format!(" │ {}", termination.bright_yellow()));
    }

    output
}

fn format_size_start(v: &EventVisitor) -> String {
    let size = v.size.unwrap_or(0);
    let trials = v.trials.unwrap_or(0);

    format!(
        "{} {} n = {:>8} │ {} trials planned",
        format_elapsed(),
        "▷".bright_blue(),
        format_count(size).white(),
        format_count(trials).bright_black(),
    )
}

fn format_size_end(v: &EventVisitor) -> String {
    let size = v.size.unwrap_or(0);
    let average = v.average_us.unwrap_or(0);
    let trials = v.trials.unwrap_or(0);
    let planned = v.planned.unwrap_or(trials);
    let status = v.status.as_deref().unwrap_or("complete");

    let marker = match status {
        "complete" => "✓".bright_green().to_string(),
        _ => "✂".bright_yellow().to_string(),
    };

    let mut output = format!(
        "{} {} n = {:>8} │ avg {:>12} │ {}/{} trials",
        format_elapsed(),
        marker,
        format_count(size).white().bold(),
        format_duration_us(average).bright_magenta(),
        format_count(trials),
        format_count(planned),
    );

    if status != "complete" {
        output.push_str(&format!(" │ {}", status.replace('_', " ").bright_yellow()));
    }

    output
}

fn format_size_dropped(v: &EventVisitor) -> String {
    let size = v.size.unwrap_or(0);
    let reason = v.reason.as_deref().unwrap_or("unknown");

    format!(
        "{} {} n = {:>8} │ dropped: {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        format_count(size).white(),
        reason.bright_red(),
    )
}

fn format_report_written(v: &EventVisitor) -> String {
    let series = v.series.as_deref().unwrap_or("Unknown");
    let markdown = v.markdown.as_deref().unwrap_or("");
    let csv = v.csv.as_deref().unwrap_or("");

    format!(
        "{} {} {} │ {}, {}",
        format_elapsed(),
        "▣".bright_blue(),
        series.white(),
        markdown.bright_black(),
        csv.bright_black(),
    )
}

fn format_trial(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let size = v.size.unwrap_or(0);
    let duration = v.duration_us.unwrap_or(0);
    let icon = if v.completed.unwrap_or(false) {
        "·".bright_black().to_string()
    } else {
        "!".bright_red().to_string()
    };

    format!(
        "{} {} n = {:>8} │ {}",
        format_elapsed(),
        icon,
        format_count(size).bright_black(),
        format_duration_us(duration).bright_black(),
    )
}

fn format_duration_us(us: u64) -> String {
    if us < 1_000 {
        format!("{}μs", us)
    } else if us < 1_000_000 {
        format!("{:.2}ms", us as f64 / 1_000.0)
    } else {
        format_duration_ms(us / 1_000)
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_us() {
        assert_eq!(format_duration_us(999), "999μs");
        assert_eq!(format_duration_us(1_500), "1.50ms");
        assert_eq!(format_duration_us(2_500_000), "2.50s");
        assert_eq!(format_duration_us(125_000_000), "2m 5s");
    }

    #[test]
    fn test_size_end_marks_cutoff() {
        let v = EventVisitor {
            event: Some("size_end".into()),
            size: Some(25),
            average_us: Some(1_500),
            trials: Some(1),
            planned: Some(3),
            status: Some("trial_cutoff".into()),
            ..Default::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("1.50ms"));
        assert!(line.contains("trial cutoff"));
    }

    #[test]
    fn test_series_start_formats_counts() {
        let v = EventVisitor {
            event: Some("series_start".into()),
            series: Some("Dijkstra".into()),
            subject: Some("Dijkstra".into()),
            expected: Some("O(E + V log V)".into()),
            sizes: Some(1200),
            ..Default::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("1,200"));
        assert!(line.contains("O(E + V log V)"));
    }

    #[test]
    fn test_report_written_lists_files() {
        let v = EventVisitor {
            event: Some("report_written".into()),
            series: Some("Subset Sum (Backtracking)".into()),
            markdown: Some("results/subset_sum_backtracking.md".into()),
            csv: Some("results/subset_sum_backtracking.csv".into()),
            ..Default::default()
        };
        let line = format_event(&v, Level::INFO);
        assert!(line.contains("Subset Sum (Backtracking)"));
        assert!(line.contains("subset_sum_backtracking.md"));
        assert!(line.contains("subset_sum_backtracking.csv"));
    }

    #[test]
    fn test_accepts_cli_and_runner_targets() {
        assert!(accepts_target("asymptote::suite"));
        assert!(accepts_target("asymptote_benchmark::runner"));
        assert!(!accepts_target("tempfile"));
    }

    #[test]
    fn test_trial_only_rendered_at_trace() {
        let v = EventVisitor {
            event: Some("trial".into()),
            size: Some(10),
            duration_us: Some(5),
            completed: Some(true),
            ..Default::default()
        };
        assert!(format_event(&v, Level::DEBUG).is_empty());
        assert!(!format_event(&v, Level::TRACE).is_empty());
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let v = EventVisitor {
            event: Some("something_else".into()),
            ..Default::default()
        };
        assert!(format_event(&v, Level::INFO).is_empty());
    }
}
