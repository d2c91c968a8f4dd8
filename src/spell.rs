//! 基于编辑距离的拼写建议。
//!
//! 编辑距离由全局比对得分推出：在 2/1/0（匹配 / 错配 / 间隙）打分下，
//! `len(a) + len(b) - score` 恰好等于替换、插入、删除的总次数。

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::align::{align, AlignmentMode, ScoringMatrix};
use crate::error::{AlignError, AlignResult};
use crate::util::alphabet::{self, GAP, LOWERCASE};

pub const EDIT_DIAG_SCORE: i32 = 2;
pub const EDIT_OFF_DIAG_SCORE: i32 = 1;
pub const EDIT_DASH_SCORE: i32 = 0;

fn unit_cost_matrix(alphabet: &[u8]) -> ScoringMatrix {
    ScoringMatrix::build(alphabet, EDIT_DIAG_SCORE, EDIT_OFF_DIAG_SCORE, EDIT_DASH_SCORE)
}

/// 单词中不允许出现间隙符号 '-'
fn reject_gaps(word: &[u8]) -> AlignResult<()> {
    match word.iter().position(|&b| b == GAP) {
        Some(position) => Err(AlignError::GapInInput {
            word: alphabet::display(word).into_owned(),
            position,
        }),
        None => Ok(()),
    }
}

fn distance_with(matrix: &ScoringMatrix, a: &[u8], b: &[u8]) -> AlignResult<usize> {
    reject_gaps(a)?;
    reject_gaps(b)?;
    let score = align(a, b, matrix, AlignmentMode::Global)?.score;
    Ok(a.len() + b.len() - score as usize)
}

/// 任意两串的编辑距离，打分矩阵建立在两串出现过的符号之上
pub fn edit_distance(a: &[u8], b: &[u8]) -> AlignResult<usize> {
    let matrix = unit_cost_matrix(&alphabet::symbols_of(&[a, b]));
    distance_with(&matrix, a, b)
}

/// 在固定字母表上持有一张 2/1/0 打分矩阵，对词表做精确距离筛选
pub struct SpellChecker {
    matrix: ScoringMatrix,
}

impl SpellChecker {
    pub fn new(alphabet: &[u8]) -> Self {
        Self { matrix: unit_cost_matrix(alphabet) }
    }

    pub fn distance(&self, a: &str, b: &str) -> AlignResult<usize> {
        distance_with(&self.matrix, a.as_bytes(), b.as_bytes())
    }

    /// 返回词表中与 `query` 编辑距离恰好为 `dist` 的所有不同单词。
    ///
    /// 每个候选词都完整计算，不做剪枝；任一单词含字母表外的符号时整个调用失败。
    pub fn check<S: AsRef<str> + Sync>(&self, query: &str, dist: usize, words: &[S]) -> AlignResult<BTreeSet<String>> {
        info!(query, dist, candidates = words.len(), "checking spelling");
        let hits = words
            .par_iter()
            .map(|w| -> AlignResult<Option<String>> {
                let w = w.as_ref();
                Ok((self.distance(query, w)? == dist).then(|| w.to_string()))
            })
            .filter_map(Result::transpose)
            .collect::<AlignResult<BTreeSet<String>>>()?;
        debug!(matches = hits.len(), "spelling done");
        Ok(hits)
    }
}

impl Default for SpellChecker {
    fn default() -> Self {
        Self::new(LOWERCASE)
    }
}

/// 使用默认小写字母表的拼写检查
pub fn check_spelling<S: AsRef<str> + Sync>(query: &str, dist: usize, words: &[S]) -> AlignResult<BTreeSet<String>> {
    SpellChecker::default().check(query, dist, words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;

    #[test]
    fn humble_at_distance_one() {
        let words = ["hello", "humbled", "humble", "tumble"];
        let got = check_spelling("humble", 1, &words).unwrap();
        let want: BTreeSet<String> = ["humbled", "tumble"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn exact_distance_only() {
        let words = vec!["humble".to_string(), "humble".to_string()];
        let got = check_spelling("humble", 0, &words).unwrap();
        assert_eq!(got.len(), 1);
        assert!(check_spelling("humble", 1, &words).unwrap().is_empty());
    }

    #[test]
    fn classic_distances() {
        assert_eq!(edit_distance(b"kitten", b"sitting").unwrap(), 3);
        assert_eq!(edit_distance(b"flaw", b"lawn").unwrap(), 2);
        assert_eq!(edit_distance(b"", b"abc").unwrap(), 3);
        assert_eq!(edit_distance(b"", b"").unwrap(), 0);
        assert_eq!(edit_distance(b"GATTACA", b"GATTACA").unwrap(), 0);
    }

    #[test]
    fn checker_and_free_function_agree() {
        let sc = SpellChecker::default();
        assert_eq!(sc.distance("firefly", "fireflies").unwrap(), 3);
        assert_eq!(edit_distance(b"firefly", b"fireflies").unwrap(), 3);
    }

    #[test]
    fn empty_entries_are_evaluated() {
        let got = check_spelling("ab", 2, &["", "ab", "abcd"]).unwrap();
        let want: BTreeSet<String> = ["", "abcd"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn out_of_alphabet_word_fails() {
        let err = check_spelling("humble", 1, &["Humble"]).unwrap_err();
        assert_eq!(err, AlignError::UnscoredSymbol { symbol: b'H', axis: Axis::Column });
    }

    #[test]
    fn hyphenated_words_are_rejected() {
        let gap = AlignError::GapInInput { word: "re-do".to_string(), position: 2 };
        assert_eq!(edit_distance(b"re-do", b"re-do").unwrap_err(), gap);
        assert_eq!(edit_distance(b"redo", b"re-do").unwrap_err(), gap);
        assert_eq!(SpellChecker::default().distance("re-do", "redo").unwrap_err(), gap);
        assert_eq!(check_spelling("re-do", 0, &["re-do"]).unwrap_err(), gap);
        assert!(check_spelling("redo", 1, &["redo", "-"]).is_err());
    }
}
