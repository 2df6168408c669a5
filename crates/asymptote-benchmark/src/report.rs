//! Report generation for benchmark series.

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use asymptote_core::ComplexityClass;

use crate::estimator::{ExponentialEstimate, GrowthEstimate};
use crate::result::BenchmarkSeries;

/// Sizes at or below this make exponential curves hard to tell from polynomial ones.
const SMALL_SIZE_CAVEAT: usize = 40;

/// Formats a duration with a unit suited to its magnitude.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50 μs");
/// assert_eq!(format_duration(Duration::from_millis(250)), "250.00 ms");
/// assert_eq!(format_duration(Duration::from_millis(2500)), "2.5000 s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1.50 min");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1.50 hours");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2} μs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2} ms", secs * 1_000.0)
    } else if secs < 60.0 {
        format!("{secs:.4} s")
    } else if secs < 3600.0 {
        format!("{:.2} min", secs / 60.0)
    } else {
        format!("{:.2} hours", secs / 3600.0)
    }
}

fn format_exponent(estimate: &GrowthEstimate) -> String {
    estimate
        .exponent()
        .map_or_else(|| "N/A".to_string(), |k| format!("O(n^{k:.2})"))
}

fn format_base(estimate: &ExponentialEstimate) -> String {
    estimate
        .base()
        .map_or_else(|| "N/A".to_string(), |b| format!("O({b:.3}^n)"))
}

/// CSV exporter for benchmark series.
///
/// One row per sample: `size,avg_seconds,trials_completed,trials_planned,status`.
/// Dropped sizes do not appear.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::{BenchmarkSeries, CsvExporter};
/// use asymptote_core::ComplexityClass;
///
/// let series = BenchmarkSeries::new("Test", "Subject", ComplexityClass::Exponential);
/// let csv = CsvExporter::to_string(&series);
/// assert_eq!(csv, "size,avg_seconds,trials_completed,trials_planned,status\n");
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports a series to a CSV string.
    pub fn to_string(series: &BenchmarkSeries) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = Self::render(series, &mut output);
        output
    }

    fn render(series: &BenchmarkSeries, out: &mut String) -> fmt::Result {
        writeln!(out, "size,avg_seconds,trials_completed,trials_planned,status")?;
        for sample in &series.samples {
            writeln!(
                out,
                "{},{:.9},{},{},{}",
                sample.size,
                sample.average_secs(),
                sample.trials_completed,
                sample.trials_planned,
                sample.status,
            )?;
        }
        Ok(())
    }

    /// Exports a series to a CSV file.
    pub fn to_file(series: &BenchmarkSeries, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(series))
    }

    /// Writes a series as CSV to a writer.
    pub fn write<W: Write>(series: &BenchmarkSeries, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(series).as_bytes())
    }
}

/// Markdown report generator.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::{BenchmarkSeries, MarkdownReport};
/// use asymptote_core::ComplexityClass;
///
/// let series = BenchmarkSeries::new("Test", "Subject", ComplexityClass::Exponential);
/// let md = MarkdownReport::to_string(&series);
/// assert!(md.contains("# Benchmark: Test"));
/// assert!(md.contains("*No sizes completed.*"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates a Markdown report for one series.
    pub fn to_string(series: &BenchmarkSeries) -> String {
        let mut output = String::new();
        let _ = Self::render(series, &mut output);
        output
    }

    fn render(series: &BenchmarkSeries, out: &mut String) -> fmt::Result {
        let growth = series.growth();
        let exponential = series.exponential();

        writeln!(out, "# Benchmark: {}", series.name)?;
        writeln!(out)?;
        writeln!(out, "- **Subject**: {}", series.subject)?;
        writeln!(out, "- **Theoretical complexity**: {}", series.expected)?;
        writeln!(out, "- **Sizes measured**: {}", series.samples.len())?;
        writeln!(out, "- **Termination**: {}", series.termination)?;
        writeln!(out, "- **Wall time**: {}", format_duration(series.elapsed))?;
        writeln!(out)?;

        writeln!(out, "## Growth")?;
        writeln!(out)?;
        writeln!(out, "| Fit | Estimate |")?;
        writeln!(out, "|-----|----------|")?;
        writeln!(out, "| Power law | {} |", format_exponent(&growth))?;
        writeln!(out, "| Exponential | {} |", format_base(&exponential))?;
        writeln!(out)?;

        let largest = series.sizes().last().map_or(0, |s| s.get());
        if series.expected == ComplexityClass::Exponential
            && largest <= SMALL_SIZE_CAVEAT
            && growth.is_determined()
        {
            writeln!(
                out,
                "> For small n, exponential functions can appear polynomial-like."
            )?;
            writeln!(out)?;
        }

        if series.samples.is_empty() {
            writeln!(out, "*No sizes completed.*")?;
        } else {
            writeln!(out, "## Samples")?;
            writeln!(out)?;
            writeln!(out, "| n | Avg Time | Trials | Status |")?;
            writeln!(out, "|---|----------|--------|--------|")?;
            for sample in &series.samples {
                writeln!(
                    out,
                    "| {} | {} | {}/{} | {} |",
                    sample.size,
                    format_duration(sample.average_duration),
                    sample.trials_completed,
                    sample.trials_planned,
                    sample.status,
                )?;
            }
        }

        if !series.dropped.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Dropped Sizes")?;
            writeln!(out)?;
            for dropped in &series.dropped {
                writeln!(out, "- n = {}: {}", dropped.size, dropped.reason)?;
            }
        }

        Ok(())
    }

    /// Writes a Markdown report to a file.
    pub fn to_file(series: &BenchmarkSeries, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(series))
    }

    /// Writes a Markdown report to a writer.
    pub fn write<W: Write>(series: &BenchmarkSeries, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(series).as_bytes())
    }
}

/// Generates a comparison table for several series.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::{BenchmarkSeries, MarkdownReport};
/// use asymptote_core::ComplexityClass;
///
/// let a = BenchmarkSeries::new("Subset Sum", "Backtracking", ComplexityClass::Exponential);
/// let b = BenchmarkSeries::new("Shortest Path", "Dijkstra", ComplexityClass::Linearithmic);
///
/// let comparison = MarkdownReport::comparison(&[&a, &b]);
/// assert!(comparison.contains("## Comparison"));
/// assert!(comparison.contains("| Dijkstra |"));
/// ```
impl MarkdownReport {
    pub fn comparison(series: &[&BenchmarkSeries]) -> String {
        let mut output = String::new();
        let _ = Self::render_comparison(series, &mut output);
        output
    }

    fn render_comparison(series: &[&BenchmarkSeries], out: &mut String) -> fmt::Result {
        writeln!(out, "## Comparison")?;
        writeln!(out)?;
        writeln!(
            out,
            "| Subject | Series | Largest n | Empirical | Exponential | Theoretical |"
        )?;
        writeln!(
            out,
            "|---------|--------|-----------|-----------|-------------|-------------|"
        )?;

        for s in series {
            let largest = s
                .sizes()
                .last()
                .map_or_else(|| "N/A".to_string(), |n| n.to_string());
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                s.subject,
                s.name,
                largest,
                format_exponent(&s.growth()),
                format_base(&s.exponential()),
                s.expected,
            )?;
        }
        Ok(())
    }
}

/// Plain-text analysis report over a full suite.
///
/// Lists every series with its measured sizes and times, the empirical
/// exponent next to the theoretical class, and closes with a note on why the
/// two can disagree.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::{AnalysisReport, BenchmarkSeries};
/// use asymptote_core::ComplexityClass;
///
/// let series = BenchmarkSeries::new("Dijkstra", "Dijkstra", ComplexityClass::Linearithmic);
/// let text = AnalysisReport::new(vec![series]).to_string();
/// assert!(text.starts_with("=== Algorithm Performance Analysis Report ==="));
/// assert!(text.contains("Empirical growth rate: N/A"));
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    series: Vec<BenchmarkSeries>,
}

impl AnalysisReport {
    pub fn new(series: Vec<BenchmarkSeries>) -> Self {
        Self { series }
    }

    pub fn series(&self) -> &[BenchmarkSeries] {
        &self.series
    }

    /// Writes the report to a file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_string())
    }

    // Contrasts how far each class got before its ceilings stopped it.
    fn write_comparison(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "COMPLEXITY COMPARISON ANALYSIS:")?;
        for s in &self.series {
            match s.samples.last() {
                Some(last) => writeln!(
                    f,
                    "- {} ({}): largest n = {} in {}",
                    s.name,
                    s.expected,
                    last.size,
                    format_duration(last.average_duration),
                )?,
                None => writeln!(f, "- {} ({}): no size completed", s.name, s.expected)?,
            }
        }

        let has_exponential = self
            .series
            .iter()
            .any(|s| s.expected == ComplexityClass::Exponential);
        let has_polynomial = self.series.iter().any(|s| s.expected.is_polynomial());
        if has_exponential && has_polynomial {
            writeln!(f)?;
            writeln!(
                f,
                "Exponential-time series grow multiplicatively with each added element and"
            )?;
            writeln!(
                f,
                "reach their time ceilings at small inputs. Polynomial-time series scale to"
            )?;
            writeln!(f, "far larger inputs within the same budget.")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Algorithm Performance Analysis Report ===")?;
        writeln!(f)?;

        writeln!(f, "ANALYZED ALGORITHMS:")?;
        for (i, s) in self.series.iter().enumerate() {
            writeln!(f, "{}. {} ({}) - {}", i + 1, s.name, s.subject, s.expected)?;
        }
        writeln!(f)?;

        for s in &self.series {
            let growth = s.growth();
            let sizes: Vec<String> = s.sizes().map(|n| n.to_string()).collect();
            let times: Vec<String> = s
                .samples
                .iter()
                .map(|x| format!("{:.6}", x.average_secs()))
                .collect();

            writeln!(f, "{}:", s.name.to_uppercase())?;
            writeln!(f, "Tested sizes: [{}]", sizes.join(", "))?;
            writeln!(f, "Execution times (s): [{}]", times.join(", "))?;
            match growth.exponent() {
                Some(k) => writeln!(f, "Empirical growth rate: O(n^{k:.4})")?,
                None => writeln!(f, "Empirical growth rate: N/A")?,
            }
            if let Some(base) = s.exponential().base() {
                writeln!(f, "Exponential fit: O({base:.4}^n)")?;
            }
            writeln!(f, "Theoretical complexity: {}", s.expected)?;
            for dropped in &s.dropped {
                writeln!(f, "Dropped n={}: {}", dropped.size, dropped.reason)?;
            }
            if s.termination.is_early() {
                writeln!(f, "Stopped early: {}", s.termination)?;
            }
            if s.expected == ComplexityClass::Exponential {
                writeln!(
                    f,
                    "Note: For small n, exponential functions can appear polynomial-like"
                )?;
            }
            writeln!(f)?;
        }

        self.write_comparison(f)?;

        writeln!(f, "EMPIRICAL FIT EXPLANATION:")?;
        writeln!(
            f,
            "The empirical growth rates above come from least-squares regression of"
        )?;
        writeln!(
            f,
            "log execution time against log input size. They may differ from the"
        )?;
        writeln!(f, "theoretical complexity because of:")?;
        writeln!(f, "1. The limited range of input sizes tested")?;
        writeln!(f, "2. Implementation optimizations affecting measured time")?;
        writeln!(f, "3. Hardware effects like caching and memory access patterns")?;
        writeln!(f, "4. Statistical variation in timing measurements")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{DropReason, DroppedSize, SampleStatus, SeriesTermination, SizeSample};
    use asymptote_core::{ComplexityClass, ProblemSize};

    fn series() -> BenchmarkSeries {
        let mut series =
            BenchmarkSeries::new("Subset Sum", "Backtracking", ComplexityClass::Exponential);
        for (n, micros, status) in [
            (10, 100, SampleStatus::Complete),
            (20, 1_000, SampleStatus::Complete),
            (30, 10_000, SampleStatus::TrialCutoff),
        ] {
            series.samples.push(SizeSample {
                size: ProblemSize::new(n).unwrap(),
                average_duration: Duration::from_micros(micros),
                trials_completed: 2,
                trials_planned: 3,
                status,
            });
        }
        series.dropped.push(DroppedSize {
            size: ProblemSize::new(35).unwrap(),
            reason: DropReason::TrialTimeout,
        });
        series.termination = SeriesTermination::SeriesCeiling {
            size: ProblemSize::new(35).unwrap(),
        };
        series
    }

    #[test]
    fn test_csv_rows() {
        let csv = CsvExporter::to_string(&series());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "10,0.000100000,2,3,complete");
        assert_eq!(lines[3], "30,0.010000000,2,3,trial_cutoff");
    }

    #[test]
    fn test_csv_write_matches_string() {
        let mut buffer = Vec::new();
        CsvExporter::write(&series(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), CsvExporter::to_string(&series()));
    }

    #[test]
    fn test_markdown_marks_cutoffs_and_drops() {
        let md = MarkdownReport::to_string(&series());
        assert!(md.contains("| 30 | 10.00 ms | 2/3 | trial_cutoff |"));
        assert!(md.contains("## Dropped Sizes"));
        assert!(md.contains("- n = 35: trial timeout"));
        assert!(md.contains("stopped after n=35: exceeded series ceiling"));
        assert!(md.contains("polynomial-like"));
    }

    #[test]
    fn test_markdown_growth_table() {
        let md = MarkdownReport::to_string(&series());
        // 10x per 10 sizes: base 10^(1/10)
        assert!(md.contains("| Exponential | O(1.259^n) |"));
        assert!(md.contains("| Power law | O(n^"));
    }

    #[test]
    fn test_comparison_rows() {
        let a = series();
        let b = BenchmarkSeries::new("Shortest Path", "Dijkstra", ComplexityClass::Linearithmic);
        let table = MarkdownReport::comparison(&[&a, &b]);
        assert!(table.contains("| Backtracking | Subset Sum | 30 |"));
        assert!(table.contains("| Dijkstra | Shortest Path | N/A | N/A | N/A | O(E + V log V) |"));
    }

    #[test]
    fn test_analysis_report_sections() {
        let text = AnalysisReport::new(vec![series()]).to_string();
        assert!(text.contains("1. Subset Sum (Backtracking) - O(2^n)"));
        assert!(text.contains("Tested sizes: [10, 20, 30]"));
        assert!(text.contains("Execution times (s): [0.000100, 0.001000, 0.010000]"));
        assert!(text.contains("Dropped n=35: trial timeout"));
        assert!(text.contains("EMPIRICAL FIT EXPLANATION:"));
        assert!(text.contains("COMPLEXITY COMPARISON ANALYSIS:"));
        assert!(text.contains("- Subset Sum (O(2^n)): largest n = 30 in 10.00 ms"));
    }

    #[test]
    fn test_analysis_report_contrasts_classes() {
        let dp = BenchmarkSeries::new(
            "Subset Sum (Dynamic Programming)",
            "Dynamic Programming",
            ComplexityClass::PseudoPolynomial,
        );
        let dijkstra =
            BenchmarkSeries::new("Shortest Path", "Dijkstra", ComplexityClass::Linearithmic);

        let text = AnalysisReport::new(vec![series(), dp.clone(), dijkstra]).to_string();
        assert!(text.contains("- Shortest Path (O(E + V log V)): no size completed"));
        assert!(text.contains("Polynomial-time series scale to"));
        assert_eq!(text.matches("polynomial-like").count(), 1);

        let text = AnalysisReport::new(vec![dp]).to_string();
        assert!(!text.contains("polynomial-like"));
        assert!(!text.contains("Polynomial-time series scale to"));
    }

    #[test]
    fn test_format_duration_boundaries() {
        assert_eq!(format_duration(Duration::ZERO), "0.00 μs");
        assert_eq!(format_duration(Duration::from_millis(1)), "1.00 ms");
        assert_eq!(format_duration(Duration::from_secs(60)), "1.00 min");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1.00 hours");
    }
}
