use serde::{Deserialize, Serialize};

use super::scoring::ScoringMatrix;
use crate::error::{AlignError, AlignResult};
use crate::util::alphabet::GAP;

/// 比对模式：全局（Needleman-Wunsch）或局部（Smith-Waterman）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentMode {
    Global,
    Local,
}

impl AlignmentMode {
    #[inline]
    fn clamp(self, v: i32) -> i32 {
        match self {
            AlignmentMode::Global => v,
            AlignmentMode::Local => v.max(0),
        }
    }
}

/// Both sequences resolved against one matrix. Per-position gap scores are
/// precomputed so the DP loop and the traceback never touch the byte index.
pub(crate) struct Scorer<'m> {
    matrix: &'m ScoringMatrix,
    xs: Vec<usize>,
    ys: Vec<usize>,
    x_gap: Vec<i32>,
    y_gap: Vec<i32>,
}

impl<'m> Scorer<'m> {
    pub(crate) fn new(matrix: &'m ScoringMatrix, seq_x: &[u8], seq_y: &[u8]) -> AlignResult<Self> {
        let xs = matrix.encode_rows(seq_x)?;
        let ys = matrix.encode_cols(seq_y)?;

        // the gap only needs an entry on the side that is paired against it
        let x_gap = if xs.is_empty() {
            Vec::new()
        } else {
            let gc = matrix.col_of(GAP)?;
            xs.iter().map(|&r| matrix.at(r, gc)).collect()
        };
        let y_gap = if ys.is_empty() {
            Vec::new()
        } else {
            let gr = matrix.row_of(GAP)?;
            ys.iter().map(|&c| matrix.at(gr, c)).collect()
        };

        Ok(Self { matrix, xs, ys, x_gap, y_gap })
    }

    #[inline]
    pub(crate) fn len_x(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub(crate) fn len_y(&self) -> usize {
        self.ys.len()
    }

    /// s(x[i], y[j])
    #[inline]
    pub(crate) fn sub(&self, i: usize, j: usize) -> i32 {
        self.matrix.at(self.xs[i], self.ys[j])
    }

    /// s(x[i], '-')
    #[inline]
    pub(crate) fn x_gap(&self, i: usize) -> i32 {
        self.x_gap[i]
    }

    /// s('-', y[j])
    #[inline]
    pub(crate) fn y_gap(&self, j: usize) -> i32 {
        self.y_gap[j]
    }
}

/// 动态规划得分表，尺寸 (len_x + 1) × (len_y + 1)，行优先展平
///
/// 单元 (i, j) 为 seq_x 长度 i 的前缀与 seq_y 长度 j 的前缀的最优比对得分。
/// 局部模式下所有单元（含边界）都截断到 0 以上。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentTable {
    rows: usize,
    cols: usize,
    mode: AlignmentMode,
    cells: Vec<i32>,
}

impl AlignmentTable {
    /// 计算 seq_x 与 seq_y 的得分表。
    ///
    /// 序列中任一符号（以及需要时的间隙符号）不在矩阵中时返回
    /// [`AlignError::UnscoredSymbol`]。
    pub fn compute(
        seq_x: &[u8],
        seq_y: &[u8],
        matrix: &ScoringMatrix,
        mode: AlignmentMode,
    ) -> AlignResult<Self> {
        let scorer = Scorer::new(matrix, seq_x, seq_y)?;
        Ok(Self::fill(&scorer, mode))
    }

    pub(crate) fn fill(sc: &Scorer<'_>, mode: AlignmentMode) -> Self {
        let rows = sc.len_x() + 1;
        let cols = sc.len_y() + 1;
        let mut cells = vec![0i32; rows * cols];

        for j in 1..cols {
            cells[j] = mode.clamp(cells[j - 1] + sc.y_gap(j - 1));
        }

        for i in 1..rows {
            let row = i * cols;
            let prev = (i - 1) * cols;
            let del = sc.x_gap(i - 1);
            cells[row] = mode.clamp(cells[prev] + del);

            for j in 1..cols {
                let up = cells[prev + j] + del;
                let left = cells[row + j - 1] + sc.y_gap(j - 1);
                let diag = cells[prev + j - 1] + sc.sub(i - 1, j - 1);
                cells[row + j] = mode.clamp(up.max(left).max(diag));
            }
        }

        Self { rows, cols, mode, cells }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i32 {
        self.cells[i * self.cols + j]
    }

    /// 行数，即 len(seq_x) + 1
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 列数，即 len(seq_y) + 1
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    /// 右下角单元：全局比对的得分
    pub fn corner(&self) -> i32 {
        self.get(self.rows - 1, self.cols - 1)
    }

    /// 行优先扫描中第一个严格最大的单元 (i, j, score)。
    ///
    /// 多个单元并列最大时返回扫描顺序中最早出现的那个；
    /// 局部回溯依赖这一约定得到可复现的结果。
    pub fn max_cell(&self) -> (usize, usize, i32) {
        let mut best = (0usize, i32::MIN);
        for (idx, &v) in self.cells.iter().enumerate() {
            if v > best.1 {
                best = (idx, v);
            }
        }
        (best.0 / self.cols, best.0 % self.cols, best.1)
    }

    pub(crate) fn check_shape(&self, len_x: usize, len_y: usize) -> AlignResult<()> {
        let expected = (len_x + 1, len_y + 1);
        if (self.rows, self.cols) != expected {
            return Err(AlignError::TableShape { expected, found: (self.rows, self.cols) });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;

    fn dna() -> ScoringMatrix {
        ScoringMatrix::build(b"ACGT", 2, 1, 0)
    }

    #[test]
    fn global_corner_ac_at() {
        let t = AlignmentTable::compute(b"AC", b"AT", &dna(), AlignmentMode::Global).unwrap();
        assert_eq!((t.rows(), t.cols()), (3, 3));
        assert_eq!(t.corner(), 3);
    }

    #[test]
    fn boundaries_accumulate_gap_scores() {
        let m = ScoringMatrix::build(b"ACGT", 5, -4, -2);
        let t = AlignmentTable::compute(b"ACG", b"TT", &m, AlignmentMode::Global).unwrap();
        assert_eq!(t.get(0, 0), 0);
        assert_eq!(t.get(0, 1), -2);
        assert_eq!(t.get(0, 2), -4);
        assert_eq!(t.get(3, 0), -6);
    }

    #[test]
    fn local_cells_never_negative() {
        let m = ScoringMatrix::build(b"ACGT", 5, -4, -2);
        let t = AlignmentTable::compute(b"ACGTTGCA", b"TTAGC", &m, AlignmentMode::Local).unwrap();
        for i in 0..t.rows() {
            for j in 0..t.cols() {
                assert!(t.get(i, j) >= 0);
            }
        }
        assert_eq!(t.mode(), AlignmentMode::Local);
    }

    #[test]
    fn both_empty() {
        let t = AlignmentTable::compute(b"", b"", &dna(), AlignmentMode::Global).unwrap();
        assert_eq!((t.rows(), t.cols()), (1, 1));
        assert_eq!(t.corner(), 0);
        assert_eq!(t.max_cell(), (0, 0, 0));
    }

    #[test]
    fn unknown_symbol_fails_fast() {
        let err = AlignmentTable::compute(b"ACN", b"A", &dna(), AlignmentMode::Local).unwrap_err();
        assert_eq!(err, AlignError::UnscoredSymbol { symbol: b'N', axis: Axis::Row });
    }

    #[test]
    fn missing_gap_entry_only_matters_when_needed() {
        let m = ScoringMatrix::from_rows(b"A", vec![(b'A', vec![3])]).unwrap();
        let t = AlignmentTable::compute(b"", b"", &m, AlignmentMode::Global).unwrap();
        assert_eq!(t.corner(), 0);
        let err = AlignmentTable::compute(b"A", b"A", &m, AlignmentMode::Global).unwrap_err();
        assert_eq!(err, AlignError::UnscoredSymbol { symbol: b'-', axis: Axis::Column });
    }

    #[test]
    fn max_cell_prefers_first_in_row_major() {
        // "A" matches twice in "AA"; both (1,1) and (1,2) score 2
        let t = AlignmentTable::compute(b"A", b"AA", &dna(), AlignmentMode::Local).unwrap();
        assert_eq!(t.get(1, 1), 2);
        assert_eq!(t.get(1, 2), 2);
        assert_eq!(t.max_cell(), (1, 1, 2));
    }
}
