use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use super::distribution::{DistributionMeta, ScoreDistribution};
use crate::align::table::Scorer;
use crate::align::{align, local_alignment, Alignment, AlignmentMode, AlignmentTable, ScoringMatrix};
use crate::error::AlignResult;
use crate::util::alphabet::strip_gaps;

/// 零模型：反复打乱 seq_y 并与 seq_x 做局部比对，统计得分分布
///
/// 试验之间互相独立，交给 rayon 线程池并行执行，最后按得分累加合并。
/// 设置种子后，第 k 次试验的随机源由 `(seed, k)` 共同决定（见 [`trial_rng`]），
/// 因此结果与线程数和调度顺序无关，相邻种子之间也不共享任何一次打乱。
pub struct NullModel<'m> {
    matrix: &'m ScoringMatrix,
    seed: Option<u64>,
}

impl<'m> NullModel<'m> {
    pub fn new(matrix: &'m ScoringMatrix) -> Self {
        Self { matrix, seed: None }
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn generate(&self, seq_x: &[u8], seq_y: &[u8], num_trials: u64) -> AlignResult<ScoreDistribution> {
        // shuffling never introduces new symbols, so one check covers every trial
        Scorer::new(self.matrix, seq_x, seq_y)?;

        info!(trials = num_trials, len_x = seq_x.len(), len_y = seq_y.len(), seed = ?self.seed, "building null distribution");

        let mut dist = (0..num_trials)
            .into_par_iter()
            .map(|k| self.trial(seq_x, seq_y, k))
            .try_fold(ScoreDistribution::new, |mut acc, score| {
                acc.record(score?);
                AlignResult::Ok(acc)
            })
            .try_reduce(ScoreDistribution::new, |a, b| Ok(a.merged(b)))?;

        dist.set_meta(DistributionMeta { seed: self.seed, ..Default::default() });
        debug!(distinct_scores = dist.iter().count(), "null distribution done");
        Ok(dist)
    }

    fn trial(&self, seq_x: &[u8], seq_y: &[u8], k: u64) -> AlignResult<i32> {
        let mut shuffled = seq_y.to_vec();
        match self.seed {
            Some(seed) => shuffled.shuffle(&mut trial_rng(seed, k)),
            None => shuffled.shuffle(&mut rand::thread_rng()),
        }
        let table = AlignmentTable::compute(seq_x, &shuffled, self.matrix, AlignmentMode::Local)?;
        Ok(local_alignment(seq_x, &shuffled, self.matrix, &table)?.score)
    }
}

/// 种子占 ChaCha 密钥的前 8 字节，试验序号占随后 8 字节；
/// 不同的 `(seed, k)` 对应不同的密钥，也就是互不相关的随机流
fn trial_rng(seed: u64, k: u64) -> StdRng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&k.to_le_bytes());
    StdRng::from_seed(key)
}

/// [`NullModel`] 的函数式入口
pub fn generate_null_distribution(
    seq_x: &[u8],
    seq_y: &[u8],
    matrix: &ScoringMatrix,
    num_trials: u64,
    seed: Option<u64>,
) -> AlignResult<ScoreDistribution> {
    NullModel::new(matrix).seed(seed).generate(seq_x, seq_y, num_trials)
}

/// 从字母表中均匀随机抽取 `len` 个符号；字母表为空时返回空序列
pub fn random_sequence<R: Rng + ?Sized>(alphabet: &[u8], len: usize, rng: &mut R) -> Vec<u8> {
    if alphabet.is_empty() {
        return Vec::new();
    }
    (0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
}

/// 从矩阵的行符号（去掉间隙）中随机抽取与 `seq_y` 等长的序列，并与 `seq_y` 比对
pub fn random_alignment<R: Rng + ?Sized>(
    seq_y: &[u8],
    matrix: &ScoringMatrix,
    mode: AlignmentMode,
    rng: &mut R,
) -> AlignResult<(Vec<u8>, Alignment)> {
    let symbols = strip_gaps(matrix.row_symbols());
    let x = random_sequence(&symbols, seq_y.len(), rng);
    debug!(len = x.len(), symbols = symbols.len(), "random sequence drawn");
    let aln = align(&x, seq_y, matrix, mode)?;
    Ok((x, aln))
}
