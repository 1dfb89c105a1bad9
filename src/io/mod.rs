mod csv;
mod manifest;
mod tables;
mod writers;


pub use csv::{join_record, quote_cell, split_record};
pub use manifest::RunManifest;
pub use tables::{read_feature_table, read_matrix, FeatureTable};
pub use writers::{write_clustering, write_matrix, write_pairs, write_projection, MATRIX_CORNER};
