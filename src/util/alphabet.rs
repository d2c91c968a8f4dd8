use serde::{Deserialize, Serialize};

/// 间隙符号，所有对齐结果中用它填充
pub const GAP: u8 = b'-';

pub const DNA: &[u8] = b"ACGT";
/// 20 种标准氨基酸加上 B/Z/X 三个模糊符号
pub const AMINO_ACIDS: &[u8] = b"ACBEDGFIHKMLNQPSRTWVYXZ";
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// 可通过名称选择的内置字母表
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    #[default]
    Dna,
    Protein,
    Lowercase,
}

impl Alphabet {
    #[inline]
    pub fn symbols(self) -> &'static [u8] {
        match self {
            Alphabet::Dna => DNA,
            Alphabet::Protein => AMINO_ACIDS,
            Alphabet::Lowercase => LOWERCASE,
        }
    }
}

/// Distinct symbols of `seqs` in first-seen order, gap excluded.
pub fn symbols_of(seqs: &[&[u8]]) -> Vec<u8> {
    let mut seen = [false; 256];
    let mut out = Vec::new();
    for seq in seqs {
        for &b in *seq {
            if b != GAP && !seen[b as usize] {
                seen[b as usize] = true;
                out.push(b);
            }
        }
    }
    out
}

/// 去掉对齐行中的间隙
pub fn strip_gaps(aligned: &[u8]) -> Vec<u8> {
    aligned.iter().copied().filter(|&b| b != GAP).collect()
}

#[inline]
pub fn display(seq: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_alphabets_exclude_gap() {
        for a in [Alphabet::Dna, Alphabet::Protein, Alphabet::Lowercase] {
            assert!(!a.symbols().contains(&GAP));
        }
        assert_eq!(Alphabet::Protein.symbols().len(), 23);
    }

    #[test]
    fn symbols_of_dedups_in_order() {
        assert_eq!(symbols_of(&[b"humble", b"tumble-"]), b"humblet".to_vec());
        assert!(symbols_of(&[b"", b"--"]).is_empty());
    }

    #[test]
    fn strip_gaps_basic() {
        assert_eq!(strip_gaps(b"A-C--G"), b"ACG".to_vec());
    }
}
