pub mod season_pipeline;
