use anyhow::{anyhow, bail, Result};
use std::io::{BufRead, Write};

use crate::align::ScoringMatrix;

fn single_symbol(tok: &str, line_no: usize) -> Result<u8> {
    match tok.as_bytes() {
        [b] => Ok(*b),
        _ => bail!("line {}: expected a single-byte symbol, got '{}'", line_no, tok),
    }
}

/// 解析空白分隔的打分矩阵文本（如 PAM50）：
///
/// ```text
///    A  R  -
/// A  2 -2 -5
/// R -2  6 -5
/// -  -5 -5  1
/// ```
///
/// 第一行为列符号，其后每行以行符号开头，后跟与列数相同的整数。空行跳过。
pub fn parse_scoring_matrix<R: BufRead>(reader: R) -> Result<ScoringMatrix> {
    let mut header: Option<Vec<u8>> = None;
    let mut rows: Vec<(u8, Vec<i32>)> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let mut toks = line.split_whitespace().peekable();
        if toks.peek().is_none() {
            continue;
        }

        if header.is_none() {
            let syms = toks.map(|t| single_symbol(t, line_no)).collect::<Result<Vec<u8>>>()?;
            header = Some(syms);
            continue;
        }
        let n_cols = header.as_ref().map_or(0, Vec::len);

        let row_sym = match toks.next() {
            Some(t) => single_symbol(t, line_no)?,
            None => continue,
        };
        let scores = toks
            .map(|t| {
                t.parse::<i32>()
                    .map_err(|e| anyhow!("line {}: bad score '{}': {}", line_no, t, e))
            })
            .collect::<Result<Vec<i32>>>()?;
        if scores.len() != n_cols {
            bail!(
                "line {}: row '{}' has {} scores but the header lists {} symbols",
                line_no,
                row_sym as char,
                scores.len(),
                n_cols
            );
        }
        rows.push((row_sym, scores));
    }

    let Some(cols) = header else {
        bail!("scoring matrix is empty");
    };
    Ok(ScoringMatrix::from_rows(&cols, rows)?)
}

pub fn read_scoring_matrix(path: &str) -> Result<ScoringMatrix> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open scoring matrix '{}': {}", path, e))?;
    parse_scoring_matrix(std::io::BufReader::new(fh))
        .map_err(|e| anyhow!("cannot parse scoring matrix '{}': {}", path, e))
}

/// 以 [`parse_scoring_matrix`] 能读回的格式写出矩阵
pub fn write_scoring_matrix<W: Write>(matrix: &ScoringMatrix, mut out: W) -> Result<()> {
    let cols = matrix.col_symbols();
    for &c in cols {
        write!(out, "{:>4}", c as char)?;
    }
    writeln!(out)?;
    for &r in matrix.row_symbols() {
        write!(out, "{}", r as char)?;
        for &c in cols {
            let s = matrix
                .score(r, c)
                .ok_or_else(|| anyhow!("missing score for ({}, {})", r as char, c as char))?;
            write!(out, " {:>3}", s)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
