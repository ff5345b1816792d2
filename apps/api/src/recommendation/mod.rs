// Care recommendation pipeline.
// Raw model text -> parser -> formatter -> one of the renderers.
// The raw string on the plant row is the durable artifact; structuring happens on every read.

pub mod formatter;
pub mod handlers;
pub mod parser;
pub mod patterns;
pub mod prompts;
pub mod render;
pub mod titles;

pub use parser::{ParsedRecommendation, PlantContext, RecommendationParser};
