use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::scoring::ScoringMatrix;
use super::table::{AlignmentMode, AlignmentTable, Scorer};
use crate::error::{AlignError, AlignResult};
use crate::util::alphabet::{self, GAP};

/// 一条最优比对：得分 + 两条等长、含间隙的比对行
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub score: i32,
    pub aligned_x: Vec<u8>,
    pub aligned_y: Vec<u8>,
}

impl Alignment {
    /// 比对列数
    pub fn len(&self) -> usize {
        self.aligned_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_x.is_empty()
    }

    /// 两行符号相同的列所占百分比；空比对记为 0
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let same = self
            .aligned_x
            .iter()
            .zip(&self.aligned_y)
            .filter(|(a, b)| a == b)
            .count();
        same as f64 / self.len() as f64 * 100.0
    }

    /// 不相同的列数（错配 + 间隙），类似 SAM 的 NM
    pub fn edit_count(&self) -> usize {
        self.aligned_x
            .iter()
            .zip(&self.aligned_y)
            .filter(|(a, b)| a != b)
            .count()
    }

    pub fn ungapped_x(&self) -> Vec<u8> {
        alphabet::strip_gaps(&self.aligned_x)
    }

    pub fn ungapped_y(&self) -> Vec<u8> {
        alphabet::strip_gaps(&self.aligned_y)
    }

    /// 以 seq_x 为 query 的 CIGAR：M 对齐列，I 为 y 侧间隙，D 为 x 侧间隙
    pub fn cigar(&self) -> String {
        let ops: Vec<char> = self
            .aligned_x
            .iter()
            .zip(&self.aligned_y)
            .map(|(&a, &b)| match (a == GAP, b == GAP) {
                (true, _) => 'D',
                (_, true) => 'I',
                _ => 'M',
            })
            .collect();
        ops_to_cigar(&ops)
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mid: String = self
            .aligned_x
            .iter()
            .zip(&self.aligned_y)
            .map(|(&a, &b)| {
                if a == GAP || b == GAP {
                    ' '
                } else if a == b {
                    '|'
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(f, "{}", alphabet::display(&self.aligned_x))?;
        writeln!(f, "{}", mid)?;
        write!(f, "{}", alphabet::display(&self.aligned_y))
    }
}

/// 游程编码：['M','M','I'] -> "2M1I"
pub fn ops_to_cigar(ops: &[char]) -> String {
    let mut cigar = String::new();
    if ops.is_empty() {
        return cigar;
    }
    let mut cur = ops[0];
    let mut len = 1usize;
    for &op in &ops[1..] {
        if op == cur {
            len += 1;
        } else {
            let _ = write!(&mut cigar, "{}{}", len, cur);
            cur = op;
            len = 1;
        }
    }
    let _ = write!(&mut cigar, "{}{}", len, cur);
    cigar
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Diag,
    Left,
    Up,
}

/// 回溯参数：何时停止，以及停止后是否补齐到原点
struct Walk {
    stop: fn(usize, usize, i32) -> bool,
    pad_to_origin: bool,
}

fn at_edge(i: usize, j: usize, _cell: i32) -> bool {
    i == 0 || j == 0
}

fn at_zero(_i: usize, _j: usize, cell: i32) -> bool {
    cell == 0
}

const GLOBAL_WALK: Walk = Walk { stop: at_edge, pad_to_origin: true };

const LOCAL_WALK: Walk = Walk { stop: at_zero, pad_to_origin: false };

/// Fixed priority: diagonal, then left (gap in x), then up (gap in y).
#[inline]
fn choose_step(table: &AlignmentTable, sc: &Scorer<'_>, i: usize, j: usize) -> Step {
    let here = table.get(i, j);
    if i > 0 && j > 0 && here == table.get(i - 1, j - 1) + sc.sub(i - 1, j - 1) {
        Step::Diag
    } else if j > 0 && here == table.get(i, j - 1) + sc.y_gap(j - 1) {
        Step::Left
    } else if i > 0 {
        Step::Up
    } else {
        Step::Left
    }
}

fn walk_back(
    seq_x: &[u8],
    seq_y: &[u8],
    sc: &Scorer<'_>,
    table: &AlignmentTable,
    start: (usize, usize),
    walk: &Walk,
) -> (Vec<u8>, Vec<u8>) {
    let (mut i, mut j) = start;
    let mut ax: Vec<u8> = Vec::with_capacity(i + j);
    let mut ay: Vec<u8> = Vec::with_capacity(i + j);

    while !(walk.stop)(i, j, table.get(i, j)) {
        match choose_step(table, sc, i, j) {
            Step::Diag => {
                ax.push(seq_x[i - 1]);
                ay.push(seq_y[j - 1]);
                i -= 1;
                j -= 1;
            }
            Step::Left => {
                ax.push(GAP);
                ay.push(seq_y[j - 1]);
                j -= 1;
            }
            Step::Up => {
                ax.push(seq_x[i - 1]);
                ay.push(GAP);
                i -= 1;
            }
        }
    }

    if walk.pad_to_origin {
        while i > 0 {
            ax.push(seq_x[i - 1]);
            ay.push(GAP);
            i -= 1;
        }
        while j > 0 {
            ax.push(GAP);
            ay.push(seq_y[j - 1]);
            j -= 1;
        }
    }

    ax.reverse();
    ay.reverse();
    (ax, ay)
}

fn trace(seq_x: &[u8], seq_y: &[u8], sc: &Scorer<'_>, table: &AlignmentTable) -> Alignment {
    let (start, score, walk) = match table.mode() {
        AlignmentMode::Global => {
            let start = (table.rows() - 1, table.cols() - 1);
            (start, table.corner(), &GLOBAL_WALK)
        }
        AlignmentMode::Local => {
            let (i, j, best) = table.max_cell();
            ((i, j), best, &LOCAL_WALK)
        }
    };
    let (aligned_x, aligned_y) = walk_back(seq_x, seq_y, sc, table, start, walk);
    Alignment { score, aligned_x, aligned_y }
}

fn prepare<'m>(
    seq_x: &[u8],
    seq_y: &[u8],
    matrix: &'m ScoringMatrix,
    table: &AlignmentTable,
    expected: AlignmentMode,
) -> AlignResult<Scorer<'m>> {
    if table.mode() != expected {
        return Err(AlignError::ModeMismatch { expected, found: table.mode() });
    }
    table.check_shape(seq_x.len(), seq_y.len())?;
    Scorer::new(matrix, seq_x, seq_y)
}

/// 全局回溯：从右下角出发，到达第 0 行或第 0 列后用间隙补齐剩余前缀
pub fn global_alignment(
    seq_x: &[u8],
    seq_y: &[u8],
    matrix: &ScoringMatrix,
    table: &AlignmentTable,
) -> AlignResult<Alignment> {
    let sc = prepare(seq_x, seq_y, matrix, table, AlignmentMode::Global)?;
    Ok(trace(seq_x, seq_y, &sc, table))
}

/// 局部回溯：从全表最大单元（行优先第一个）出发，遇到值为 0 的单元即停止
pub fn local_alignment(
    seq_x: &[u8],
    seq_y: &[u8],
    matrix: &ScoringMatrix,
    table: &AlignmentTable,
) -> AlignResult<Alignment> {
    let sc = prepare(seq_x, seq_y, matrix, table, AlignmentMode::Local)?;
    Ok(trace(seq_x, seq_y, &sc, table))
}

/// 按表的模式选择回溯方式
pub fn traceback(
    seq_x: &[u8],
    seq_y: &[u8],
    matrix: &ScoringMatrix,
    table: &AlignmentTable,
) -> AlignResult<Alignment> {
    let sc = prepare(seq_x, seq_y, matrix, table, table.mode())?;
    Ok(trace(seq_x, seq_y, &sc, table))
}

/// 建表并回溯，一步完成
pub fn align(
    seq_x: &[u8],
    seq_y: &[u8],
    matrix: &ScoringMatrix,
    mode: AlignmentMode,
) -> AlignResult<Alignment> {
    let sc = Scorer::new(matrix, seq_x, seq_y)?;
    let table = AlignmentTable::fill(&sc, mode);
    Ok(trace(seq_x, seq_y, &sc, &table))
}
