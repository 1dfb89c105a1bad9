mod dissimilarity;
mod euclidean;


pub use dissimilarity::DissimilarityMatrix;
pub use euclidean::euclidean_matrix;
