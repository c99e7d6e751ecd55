pub mod catalog;
pub mod generator;
pub mod insights;
pub mod lenient;
pub mod normalizer;
pub mod prompts;
pub mod request;
pub mod trip_plan;
