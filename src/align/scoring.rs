use crate::error::{AlignError, AlignResult, Axis};
use crate::util::alphabet::GAP;

/// 打分矩阵：行符号 × 列符号 → 整数得分
///
/// 内部按行优先展平存储，另有两张 256 项的字节索引表，
/// 以便 DP 循环中直接按下标取分，不必做哈希查找。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoringMatrix {
    row_symbols: Vec<u8>,
    col_symbols: Vec<u8>,
    row_index: Vec<Option<usize>>,
    col_index: Vec<Option<usize>>,
    scores: Vec<i32>,
}

impl ScoringMatrix {
    /// 由字母表和三个标量构造完整矩阵（字母表 ∪ {'-'}）。
    ///
    /// - 任一侧为间隙：`dash_score`
    /// - 相同符号：`diag_score`
    /// - 不同符号：`off_diag_score`
    pub fn build(alphabet: &[u8], diag_score: i32, off_diag_score: i32, dash_score: i32) -> Self {
        let mut entries: Vec<u8> = Vec::with_capacity(alphabet.len() + 1);
        for &b in alphabet.iter().chain(std::iter::once(&GAP)) {
            if !entries.contains(&b) {
                entries.push(b);
            }
        }

        let n = entries.len();
        let mut scores = vec![0i32; n * n];
        for (r, &a) in entries.iter().enumerate() {
            for (c, &b) in entries.iter().enumerate() {
                scores[r * n + c] = if a == GAP || b == GAP {
                    dash_score
                } else if a == b {
                    diag_score
                } else {
                    off_diag_score
                };
            }
        }

        Self::assemble(entries.clone(), entries, scores)
    }

    /// 由外部解析的表构造：列符号表头 + 每行（行符号, 得分）。
    /// 重复的行符号以最后一次出现为准。
    pub fn from_rows(col_symbols: &[u8], rows: Vec<(u8, Vec<i32>)>) -> AlignResult<Self> {
        let cols = col_symbols.len();
        let mut row_symbols = Vec::with_capacity(rows.len());
        let mut scores = Vec::with_capacity(rows.len() * cols);
        for (sym, row) in rows {
            if row.len() != cols {
                return Err(AlignError::MatrixShape {
                    row: sym,
                    expected: cols,
                    found: row.len(),
                });
            }
            row_symbols.push(sym);
            scores.extend_from_slice(&row);
        }
        Ok(Self::assemble(row_symbols, col_symbols.to_vec(), scores))
    }

    fn assemble(row_symbols: Vec<u8>, col_symbols: Vec<u8>, scores: Vec<i32>) -> Self {
        let mut row_index = vec![None; 256];
        for (i, &b) in row_symbols.iter().enumerate() {
            row_index[b as usize] = Some(i);
        }
        let mut col_index = vec![None; 256];
        for (j, &b) in col_symbols.iter().enumerate() {
            col_index[b as usize] = Some(j);
        }
        Self { row_symbols, col_symbols, row_index, col_index, scores }
    }

    pub fn row_symbols(&self) -> &[u8] {
        &self.row_symbols
    }

    pub fn col_symbols(&self) -> &[u8] {
        &self.col_symbols
    }

    /// 查询 (a, b) 的得分；任一符号不在矩阵中时返回 None
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> Option<i32> {
        let r = self.row_index[a as usize]?;
        let c = self.col_index[b as usize]?;
        Some(self.at(r, c))
    }

    #[inline]
    pub(crate) fn at(&self, r: usize, c: usize) -> i32 {
        self.scores[r * self.col_symbols.len() + c]
    }

    /// 将序列编码为行下标，遇到未收录的符号立即失败
    pub(crate) fn encode_rows(&self, seq: &[u8]) -> AlignResult<Vec<usize>> {
        seq.iter().map(|&b| self.row_of(b)).collect()
    }

    pub(crate) fn encode_cols(&self, seq: &[u8]) -> AlignResult<Vec<usize>> {
        seq.iter().map(|&b| self.col_of(b)).collect()
    }

    #[inline]
    pub(crate) fn row_of(&self, a: u8) -> AlignResult<usize> {
        self.row_index[a as usize].ok_or(AlignError::UnscoredSymbol { symbol: a, axis: Axis::Row })
    }

    #[inline]
    pub(crate) fn col_of(&self, b: u8) -> AlignResult<usize> {
        self.col_index[b as usize].ok_or(AlignError::UnscoredSymbol { symbol: b, axis: Axis::Column })
    }
}
