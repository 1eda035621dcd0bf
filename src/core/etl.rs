use crate::core::{LoadReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct LoadEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> LoadEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<LoadReport> {
        tracing::info!("Starting season load...");

        // Extract
        let raw_data = self.pipeline.extract()?;
        tracing::info!("Extracted {} CSV rows", raw_data.len());
        self.monitor.log_stats("Extract");

        // Transform
        let season = self.pipeline.transform(raw_data)?;
        tracing::info!(
            "Normalized {} teams, {} referees, {} matches ({} rows rejected)",
            season.teams.len(),
            season.referees.len(),
            season.matches.len(),
            season.rejected_rows
        );
        self.monitor.log_stats("Transform");

        // Load
        let report = self.pipeline.load(season)?;
        tracing::info!(
            "Inserted {} matches, skipped {} duplicates",
            report.matches_inserted,
            report.duplicates_skipped
        );
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NormalizedSeason, RawMatch};
    use crate::utils::error::ExplorerError;
    use std::cell::Cell;

    struct CountingPipeline {
        loads: Cell<usize>,
        fail_transform: bool,
    }

    impl Pipeline for CountingPipeline {
        fn extract(&self) -> Result<Vec<RawMatch>> {
            Ok(Vec::new())
        }

        fn transform(&self, _data: Vec<RawMatch>) -> Result<NormalizedSeason> {
            if self.fail_transform {
                return Err(ExplorerError::DatasetError {
                    row: 2,
                    message: "bad row".to_string(),
                });
            }
            Ok(NormalizedSeason::default())
        }

        fn load(&self, season: NormalizedSeason) -> Result<LoadReport> {
            self.loads.set(self.loads.get() + 1);
            Ok(LoadReport {
                matches_inserted: season.matches.len(),
                ..LoadReport::default()
            })
        }
    }

    #[test]
    fn test_engine_runs_all_phases() {
        let engine = LoadEngine::new(CountingPipeline {
            loads: Cell::new(0),
            fail_transform: false,
        });
        let report = engine.run().unwrap();
        assert_eq!(report, LoadReport::default());
        assert_eq!(engine.pipeline.loads.get(), 1);
    }

    #[test]
    fn test_engine_stops_before_load_on_transform_error() {
        let engine = LoadEngine::new(CountingPipeline {
            loads: Cell::new(0),
            fail_transform: true,
        });
        assert!(engine.run().is_err());
        assert_eq!(engine.pipeline.loads.get(), 0);
    }
}
