//! Benchmark suite: the series the command line tool knows how to run.

use std::fs;
use std::path::{Path, PathBuf};

use asymptote_algorithms::{
    verify, Backtracking, Dijkstra, DynamicProgramming, Exhaustive, HardSubsetSum,
    NearEqualSubsetSum, RandomGraph, RandomSubsetSum,
};
use asymptote_benchmark::{
    AnalysisReport, Benchmark, BenchmarkSeries, CsvExporter, MarkdownReport,
};
use asymptote_config::SuiteConfig;
use asymptote_core::{AsymptoteError, Result};
use tracing::info;

/// Runs series from a [`SuiteConfig`] and writes their reports.
pub struct Suite {
    config: SuiteConfig,
    output_dir: PathBuf,
}

impl Suite {
    /// Validates the configuration and prepares the output directory.
    pub fn new(config: SuiteConfig) -> Result<Self> {
        config.validate()?;
        let output_dir = PathBuf::from(&config.output_dir);
        fs::create_dir_all(&output_dir)?;
        Ok(Self { config, output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs the fixed correctness cases; any failure is an error.
    pub fn verify(&self) -> Result<verify::VerificationReport> {
        let report = verify::run_all();
        if report.all_passed() {
            Ok(report)
        } else {
            let failures: Vec<String> = report
                .cases
                .iter()
                .filter(|c| !c.passed)
                .map(ToString::to_string)
                .collect();
            Err(AsymptoteError::Internal(format!(
                "{} correctness case(s) failed:\n{}",
                failures.len(),
                failures.join("\n")
            )))
        }
    }

    pub fn backtracking(&self) -> Result<BenchmarkSeries> {
        let config = self.config.seeded(&self.config.backtracking);
        let generator = NearEqualSubsetSum::new(config.random_seed);
        let series = Benchmark::new(config, Backtracking, generator).run()?;
        self.write_series(&series, "subset_sum_backtracking")?;
        Ok(series)
    }

    pub fn dynamic_programming(&self) -> Result<BenchmarkSeries> {
        let config = self.config.seeded(&self.config.dynamic_programming);
        let generator = RandomSubsetSum::new(config.random_seed);
        let series = Benchmark::new(config, DynamicProgramming, generator).run()?;
        self.write_series(&series, "subset_sum_dp")?;
        Ok(series)
    }

    /// Exhaustive search over instances no subset can satisfy.
    pub fn worst_case(&self) -> Result<BenchmarkSeries> {
        let config = self.config.worst_case.clone();
        let series = Benchmark::new(config, Exhaustive, HardSubsetSum).run()?;
        self.write_series(&series, "subset_sum_worst_case")?;
        Ok(series)
    }

    pub fn dijkstra(&self) -> Result<BenchmarkSeries> {
        let config = self.config.seeded(&self.config.shortest_path);
        let generator = RandomGraph::new(config.random_seed);
        let series = Benchmark::new(config, Dijkstra, generator).run()?;
        self.write_series(&series, "shortest_path")?;
        Ok(series)
    }

    /// Verification, then the Subset Sum series: backtracking and dynamic
    /// programming, plus the worst case when requested.
    pub fn subset_sum(&self, worst_case: bool) -> Result<Vec<BenchmarkSeries>> {
        self.verify()?;
        self.subset_sum_series(worst_case)
    }

    /// Verification, then the Dijkstra series.
    pub fn shortest_path(&self) -> Result<BenchmarkSeries> {
        self.verify()?;
        self.dijkstra()
    }

    /// Every Subset Sum solver against Dijkstra, with comparison and
    /// analysis reports.
    pub fn compare(&self) -> Result<Vec<BenchmarkSeries>> {
        let series = vec![
            self.backtracking()?,
            self.dynamic_programming()?,
            self.worst_case()?,
            self.dijkstra()?,
        ];
        self.write_summary(&series)?;
        Ok(series)
    }

    /// Verification, then every series, then the summary reports.
    pub fn all(&self, worst_case: bool) -> Result<Vec<BenchmarkSeries>> {
        self.verify()?;
        let mut series = self.subset_sum_series(worst_case)?;
        series.push(self.dijkstra()?);
        self.write_summary(&series)?;
        Ok(series)
    }

    fn subset_sum_series(&self, worst_case: bool) -> Result<Vec<BenchmarkSeries>> {
        let mut series = vec![self.backtracking()?, self.dynamic_programming()?];
        if worst_case {
            series.push(self.worst_case()?);
        }
        Ok(series)
    }

    fn write_series(&self, series: &BenchmarkSeries, stem: &str) -> Result<()> {
        let markdown = self.output_dir.join(format!("{stem}.md"));
        let csv = self.output_dir.join(format!("{stem}.csv"));
        MarkdownReport::to_file(series, &markdown)?;
        CsvExporter::to_file(series, &csv)?;
        info!(
            event = "report_written",
            series = %series.name,
            markdown = %markdown.display(),
            csv = %csv.display(),
        );
        Ok(())
    }

    /// Writes `comparison.md` and `algorithm_analysis_report.txt`.
    pub fn write_summary(&self, series: &[BenchmarkSeries]) -> Result<()> {
        let refs: Vec<&BenchmarkSeries> = series.iter().collect();
        fs::write(
            self.output_dir.join("comparison.md"),
            MarkdownReport::comparison(&refs),
        )?;
        AnalysisReport::new(series.to_vec())
            .to_file(self.output_dir.join("algorithm_analysis_report.txt"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_config::BenchmarkConfig;

    fn tiny_suite(dir: &Path) -> SuiteConfig {
        SuiteConfig {
            output_dir: dir.to_string_lossy().into_owned(),
            random_seed: Some(7),
            backtracking: BenchmarkConfig::new("Subset Sum (Backtracking)")
                .with_sizes([4, 6, 8])
                .with_baseline_trials(2),
            dynamic_programming: BenchmarkConfig::new("Subset Sum (Dynamic Programming)")
                .with_sizes([4, 8, 16])
                .with_baseline_trials(2),
            worst_case: BenchmarkConfig::new("Subset Sum (Worst Case)")
                .with_sizes([4, 6, 8])
                .with_baseline_trials(1),
            shortest_path: BenchmarkConfig::new("Dijkstra")
                .with_sizes([5, 10, 20])
                .with_baseline_trials(1),
        }
    }

    #[test]
    fn test_subset_sum_writes_reports() {
        let dir = tempfile::tempdir().unwrap();
        let suite = Suite::new(tiny_suite(dir.path())).unwrap();

        let series = suite.subset_sum(true).unwrap();
        assert_eq!(series.len(), 3);

        for stem in ["subset_sum_backtracking", "subset_sum_dp", "subset_sum_worst_case"] {
            assert!(dir.path().join(format!("{stem}.md")).exists(), "{stem}.md");
            assert!(dir.path().join(format!("{stem}.csv")).exists(), "{stem}.csv");
        }
        let csv = fs::read_to_string(dir.path().join("subset_sum_dp.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_all_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        let suite = Suite::new(tiny_suite(dir.path())).unwrap();

        let series = suite.all(false).unwrap();
        assert_eq!(series.len(), 3);

        let analysis =
            fs::read_to_string(dir.path().join("algorithm_analysis_report.txt")).unwrap();
        assert!(analysis.contains("DIJKSTRA:"));
        let comparison = fs::read_to_string(dir.path().join("comparison.md")).unwrap();
        assert!(comparison.contains("| Dynamic Programming |"));
    }

    #[test]
    fn test_compare_covers_every_solver() {
        let dir = tempfile::tempdir().unwrap();
        let suite = Suite::new(tiny_suite(dir.path())).unwrap();

        let series = suite.compare().unwrap();
        let names: Vec<_> = series.iter().map(|s| s.subject.as_str()).collect();
        assert_eq!(
            names,
            vec!["Backtracking", "Dynamic Programming", "Exhaustive Search", "Dijkstra"]
        );

        let comparison = fs::read_to_string(dir.path().join("comparison.md")).unwrap();
        let analysis =
            fs::read_to_string(dir.path().join("algorithm_analysis_report.txt")).unwrap();
        for s in &series {
            assert!(comparison.contains(&format!("| {} | {} |", s.subject, s.name)));
            assert!(analysis.contains(&format!("{}:", s.name.to_uppercase())));
        }
        assert!(analysis.contains("COMPLEXITY COMPARISON ANALYSIS:"));
    }

    #[test]
    fn test_shortest_path_writes_reports() {
        let dir = tempfile::tempdir().unwrap();
        let suite = Suite::new(tiny_suite(dir.path())).unwrap();

        let series = suite.shortest_path().unwrap();
        assert_eq!(series.samples.len(), 3);
        assert!(dir.path().join("shortest_path.md").exists());
    }

    #[test]
    fn test_invalid_series_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = tiny_suite(dir.path());
        config.shortest_path.sizes.clear();

        assert!(matches!(
            Suite::new(config),
            Err(AsymptoteError::Usage(_))
        ));
    }

    #[test]
    fn test_verify_passes() {
        let dir = tempfile::tempdir().unwrap();
        let suite = Suite::new(tiny_suite(dir.path())).unwrap();
        assert!(suite.verify().unwrap().all_passed());
    }
}
