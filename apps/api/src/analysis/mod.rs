// AI analysis: prompt construction → model call → fence strip → JSON parse →
// schema validation. All model calls go through llm_client::TextModel.

pub mod ats;
pub mod handlers;
pub mod normalize;
pub mod prompts;
pub mod structure;
