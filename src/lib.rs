//! # seqalign
//!
//! 两序列最优比对引擎，以及建立在其上的显著性检验与拼写建议。
//!
//! 本 crate 提供：
//!
//! - **打分矩阵**：由字母表与 (diag, off_diag, dash) 三个标量构造，或从外部文本表加载
//! - **动态规划表**：全局 / 局部两种模式共用同一递推
//! - **回溯**：全局（补齐两端间隙）与局部（从最大单元回溯到 0）
//! - **零模型**：反复打乱序列做局部比对，统计得分分布并计算 z 值
//! - **拼写建议**：由全局比对得分推出编辑距离，筛选词表
//!
//! ## 快速示例
//!
//! ```rust
//! use seqalign::align::{self, AlignmentMode, AlignmentTable, ScoringMatrix};
//!
//! let matrix = ScoringMatrix::build(b"ACGT", 2, 1, 0);
//! let table = AlignmentTable::compute(b"AC", b"AT", &matrix, AlignmentMode::Global).unwrap();
//! assert_eq!(table.corner(), 3);
//!
//! let aln = align::global_alignment(b"AC", b"AT", &matrix, &table).unwrap();
//! assert_eq!(aln.aligned_x, b"AC");
//! assert_eq!(aln.aligned_y, b"AT");
//!
//! let words = ["hello", "humbled", "humble", "tumble"];
//! let near = seqalign::spell::check_spelling("humble", 1, &words).unwrap();
//! assert_eq!(near.len(), 2);
//! ```
//!
//! ## 模块说明
//!
//! - [`align`] — 打分矩阵、得分表、全局 / 局部回溯
//! - [`stats`] — 零模型与得分分布
//! - [`spell`] — 编辑距离与拼写建议
//! - [`io`] — 打分矩阵 / 序列 / FASTA / 词表读取
//! - [`config`] — TOML 运行配置
//! - [`util`] — 内置字母表与符号工具

pub mod align;
pub mod config;
pub mod error;
pub mod io;
pub mod spell;
pub mod stats;
pub mod util;

pub use error::{AlignError, AlignResult};
