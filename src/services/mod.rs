pub mod analysis;
pub mod patterns;
pub mod summarizer;
