use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{PipelineConfig, Thresholds};
use crate::data::classify::classify;
use crate::data::filter::indices_below;
use crate::data::loader::{detect_format, load_as};
use crate::data::model::{ClassifiedTable, Dataset};
use crate::engine::{self, EngineOutput};
use crate::error::LoadError;
use crate::logging::{FileSink, RunLog};
use crate::report::{
    log_result_distribution, log_value_distribution, ResultDistribution, ValueDistribution,
};

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

/// Where a pipeline run currently is.
///
/// `Loaded → Filtered → Classified → Generated → Reported → Completed`; an
/// empty dataset jumps from `Loaded` straight to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Loaded,
    Filtered,
    Classified,
    Generated,
    Reported,
    Completed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// One dataset's filter → classify → generate → report run.
///
/// All derived state is owned by the instance. Calling [`Pipeline::run`]
/// again recomputes it from the dataset instead of accumulating.
#[derive(Debug)]
pub struct Pipeline {
    source: Option<PathBuf>,
    dataset: Dataset,
    thresholds: Thresholds,
    log: RunLog,
    stage: Stage,
    filtered_indices: Option<Vec<usize>>,
    classified: Option<ClassifiedTable>,
    output: Option<EngineOutput>,
    results: Option<Vec<f64>>,
    result_distribution: Option<ResultDistribution>,
    value_distribution: Option<ValueDistribution>,
    completed: bool,
}

impl Pipeline {
    /// Load `path` with a file log under `config.log_dir`.
    ///
    /// If the log file cannot be opened the run still proceeds, logging only
    /// through the `log` facade.
    pub fn load(path: &Path, config: &PipelineConfig) -> Result<Self, LoadError> {
        let name = run_name(path);
        let log = match FileSink::for_input(&config.log_dir, path) {
            Ok(sink) => RunLog::new(name, sink),
            Err(e) => {
                log::warn!("{e:#}; logging for {} goes to stderr only", path.display());
                RunLog::silent(name)
            }
        };
        Self::load_with_log(path, config.thresholds.clone(), log)
    }

    /// Load `path` reporting to an injected log.
    pub fn load_with_log(
        path: &Path,
        thresholds: Thresholds,
        log: RunLog,
    ) -> Result<Self, LoadError> {
        log.info(format!("Reading data from {}", path.display()));

        let dataset = detect_format(path)
            .and_then(|format| {
                log.info(format!("File is a {format}!"));
                load_as(path, format)
            })
            .map_err(|e| {
                log.error(&e);
                e
            })?;

        log.info(format!("Loaded {} rows", dataset.len()));
        let mut pipeline = Self::from_dataset(dataset, thresholds, log);
        pipeline.source = Some(path.to_path_buf());
        Ok(pipeline)
    }

    /// Wrap an in-memory dataset.
    pub fn from_dataset(dataset: Dataset, thresholds: Thresholds, log: RunLog) -> Self {
        Self {
            source: None,
            dataset,
            thresholds,
            log,
            stage: Stage::Loaded,
            filtered_indices: None,
            classified: None,
            output: None,
            results: None,
            result_distribution: None,
            value_distribution: None,
            completed: false,
        }
    }

    /// Run every stage in order and mark the run completed.
    pub fn run(&mut self) {
        self.reset();

        if self.dataset.is_empty() {
            self.log.warn("No data to process!");
            self.advance(Stage::Completed);
            self.completed = true;
            return;
        }

        self.filter();
        self.classify();
        self.generate();
        self.report();

        self.advance(Stage::Completed);
        self.completed = true;
        self.log.info("Run completed");
    }

    fn reset(&mut self) {
        self.stage = Stage::Loaded;
        self.filtered_indices = None;
        self.classified = None;
        self.output = None;
        self.results = None;
        self.result_distribution = None;
        self.value_distribution = None;
        self.completed = false;
    }

    fn advance(&mut self, next: Stage) {
        self.log.debug(format!("stage {} -> {next}", self.stage));
        self.stage = next;
    }

    fn filter(&mut self) {
        let t = &self.thresholds.filter;
        self.log.separator();
        self.log
            .info(format!("Filtering data with a value less than {}", t.below));
        let indices = indices_below(self.dataset.values(), t);
        self.log
            .info(format!("{} rows matched the filter", indices.len()));
        self.filtered_indices = Some(indices);
        self.advance(Stage::Filtered);
    }

    fn classify(&mut self) {
        self.log.separator();
        self.log.info("Adding level column to the data.");
        self.classified = Some(classify(
            self.dataset.values(),
            &self.thresholds.classifier,
        ));
        self.log.info("Column added!");
        self.advance(Stage::Classified);
    }

    fn generate(&mut self) {
        let n = self.dataset.len();
        if n > self.thresholds.oversized_rows {
            self.log.separator();
            self.log.warn(format!(
                "Data of {n} entries is too large for any sensible manipulation."
            ));
            self.log.separator();
        }

        let output = engine::generate(self.dataset.values(), &self.thresholds);
        self.log.debug(format!(
            "PassA produced {} values, PassB produced {}",
            output.pass_a.len(),
            output.pass_b.len()
        ));
        self.results = Some(output.combined());
        self.output = Some(output);
        self.advance(Stage::Generated);
    }

    fn report(&mut self) {
        let t = &self.thresholds.report;
        let results = self.results.as_deref().unwrap_or_default();

        let result_dist = ResultDistribution::of(results, t);
        log_result_distribution(&self.log, &result_dist);

        let value_dist = ValueDistribution::of(self.dataset.values(), t);
        log_value_distribution(&self.log, &value_dist, t);

        self.result_distribution = Some(result_dist);
        self.value_distribution = Some(value_dist);
        self.advance(Stage::Reported);
    }

    // -- accessors --

    /// Path the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Positions of rows below the filter threshold.
    pub fn filtered_indices(&self) -> Option<&[usize]> {
        self.filtered_indices.as_deref()
    }

    pub fn classified(&self) -> Option<&ClassifiedTable> {
        self.classified.as_ref()
    }

    /// The final derived sequence: PassA output followed by PassB output.
    pub fn results(&self) -> Option<&[f64]> {
        self.results.as_deref()
    }

    /// The two pass outputs kept apart.
    pub fn engine_outputs(&self) -> Option<&EngineOutput> {
        self.output.as_ref()
    }

    pub fn result_distribution(&self) -> Option<&ResultDistribution> {
        self.result_distribution.as_ref()
    }

    pub fn value_distribution(&self) -> Option<&ValueDistribution> {
        self.value_distribution.as_ref()
    }
}

/// Run name used for the log: the input's file stem.
fn run_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Level;
    use crate::logging::MemorySink;

    fn pipeline(values: Vec<f64>) -> (Pipeline, MemorySink) {
        let sink = MemorySink::new();
        let p = Pipeline::from_dataset(
            Dataset::new(values),
            Thresholds::default(),
            RunLog::new("test", sink.clone()),
        );
        (p, sink)
    }

    #[test]
    fn fresh_pipeline_is_loaded_and_not_completed() {
        let (p, _) = pipeline(vec![1.0]);
        assert_eq!(p.stage(), Stage::Loaded);
        assert!(!p.completed());
        assert!(p.results().is_none());
    }

    #[test]
    fn run_populates_every_output() {
        let (mut p, sink) = pipeline(vec![5.0, 11.0, 100.0, 101.0]);
        p.run();

        assert!(p.completed());
        assert_eq!(p.stage(), Stage::Completed);
        assert_eq!(p.filtered_indices(), Some(&[0usize, 1][..]));

        let classified = p.classified().unwrap();
        let levels: Vec<Level> = classified.levels().collect();
        assert_eq!(levels, vec![Level::Low, Level::Low, Level::Medium, Level::High]);

        let out = p.engine_outputs().unwrap();
        assert_eq!(out.pass_a.len(), 20);
        // 5 → -5, 11 → 1, 100 → [120, 80], 101 → 202; each unit three times
        assert_eq!(out.pass_b.len(), 3 * 5);
        assert_eq!(p.results().unwrap().len(), 35);

        let dist = p.result_distribution().unwrap();
        assert_eq!(dist.total(), 35);
        assert!(sink.contains("Filtering data with a value less than 42"));
    }

    #[test]
    fn empty_dataset_short_circuits() {
        let (mut p, sink) = pipeline(vec![]);
        p.run();

        assert!(p.completed());
        assert_eq!(p.stage(), Stage::Completed);
        assert!(p.filtered_indices().is_none());
        assert!(p.classified().is_none());
        assert!(p.results().is_none());
        assert!(sink.contains("WARN - No data to process!"));
    }

    #[test]
    fn rerun_recomputes_instead_of_accumulating() {
        let (mut p, _) = pipeline((0..60).map(f64::from).collect());
        p.run();
        let first = p.results().unwrap().to_vec();
        p.run();
        assert_eq!(p.results().unwrap(), first.as_slice());
    }

    #[test]
    fn oversized_dataset_warns_but_still_generates() {
        let (mut p, sink) = pipeline(vec![1.0; 1001]);
        p.run();
        assert!(sink.contains("Data of 1001 entries is too large"));
        assert!(p.results().is_some());
    }
}
