use thiserror::Error;

use crate::align::AlignmentMode;

/// 打分矩阵的哪一条轴缺少某个符号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// 行符号（seq_x 一侧）
    Row,
    /// 列符号（seq_y 一侧）
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// 可打印 ASCII 原样显示，其余字节显示为 `\xNN`
fn show_symbol(b: &u8) -> String {
    if b.is_ascii_graphic() || *b == b' ' {
        format!("'{}'", *b as char)
    } else {
        format!("'\\x{:02x}'", b)
    }
}

/// 比对核心的错误类型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignError {
    #[error("symbol {} has no {axis} entry in the scoring matrix", show_symbol(.symbol))]
    UnscoredSymbol { symbol: u8, axis: Axis },

    /// 编辑距离的输入中出现了间隙符号，它会被当作间隙计分
    #[error("word {word:?} contains the gap symbol '-' at position {position}")]
    GapInInput { word: String, position: usize },

    #[error("traceback expects a {expected:?} table but got a {found:?} table")]
    ModeMismatch {
        expected: AlignmentMode,
        found: AlignmentMode,
    },

    #[error("alignment table is {found:?} but the sequences need {expected:?}")]
    TableShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("scoring matrix row {} has {found} scores, header has {expected}", show_symbol(.row))]
    MatrixShape {
        row: u8,
        expected: usize,
        found: usize,
    },
}

pub type AlignResult<T> = Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let e = AlignError::UnscoredSymbol { symbol: b'Z', axis: Axis::Column };
        assert_eq!(e.to_string(), "symbol 'Z' has no column entry in the scoring matrix");

        let e = AlignError::ModeMismatch {
            expected: AlignmentMode::Global,
            found: AlignmentMode::Local,
        };
        assert!(e.to_string().contains("Global"));
    }

    #[test]
    fn non_ascii_symbol_shown_as_hex() {
        // first byte of "é" in UTF-8
        let e = AlignError::UnscoredSymbol { symbol: 0xC3, axis: Axis::Row };
        assert_eq!(e.to_string(), "symbol '\\xc3' has no row entry in the scoring matrix");

        let e = AlignError::MatrixShape { row: b'\t', expected: 3, found: 2 };
        assert_eq!(e.to_string(), "scoring matrix row '\\x09' has 2 scores, header has 3");
    }
}
