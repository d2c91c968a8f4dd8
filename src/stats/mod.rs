pub mod distribution;
pub mod null_model;

pub use distribution::{DistributionMeta, ScoreDistribution};
pub use null_model::{generate_null_distribution, random_alignment, random_sequence, NullModel};
