mod analyzer;
mod resolver;

pub use analyzer::Analyzer;
pub use resolver::DataResolver;
