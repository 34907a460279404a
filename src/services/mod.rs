pub mod color;
pub mod complements;
pub mod enrichment;
pub mod outfit_generator;
pub mod providers;
pub mod recommendations;
pub mod scoring;
pub mod similarity;
