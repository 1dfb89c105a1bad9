pub mod model;
pub mod smacof;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::MdsConfig;
pub use smacof::embed;
pub use types::{EmbeddedPoint, Embedding};
