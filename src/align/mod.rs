//! 两序列比对引擎：打分矩阵、共享的动态规划表，以及全局 / 局部两种回溯。

pub mod scoring;
pub mod table;
pub mod traceback;

pub use scoring::ScoringMatrix;
pub use table::{AlignmentMode, AlignmentTable};
pub use traceback::{align, global_alignment, local_alignment, ops_to_cigar, traceback, Alignment};
