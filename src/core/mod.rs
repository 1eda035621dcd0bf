pub mod etl;

pub use crate::app::pipelines::season_pipeline::SeasonPipeline;
pub use crate::domain::model::{LoadReport, NormalizedSeason, RawMatch};
pub use crate::domain::ports::{ConfigProvider, MatchRepository, Pipeline, Storage};
pub use crate::utils::error::Result;
