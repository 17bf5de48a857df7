mod ollama;

pub use ollama::*;
