mod normalizer;
mod retriever;

pub use normalizer::INormalizer;
pub use retriever::IRetriever;
