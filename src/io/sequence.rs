use anyhow::{anyhow, Result};
use std::io::{BufRead, Read};

use super::fasta::FastaReader;

/// 读取一条序列。
///
/// 首个非空行以 '>' 开头时按 FASTA 解析并返回第一条记录；
/// 否则视为纯文本序列，整体去掉末尾空白后返回。
pub fn parse_sequence<R: BufRead>(mut reader: R) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    let first = raw.iter().position(|b| !b.is_ascii_whitespace());
    if first.map(|i| raw[i]) == Some(b'>') {
        let mut fasta = FastaReader::new(std::io::Cursor::new(raw));
        let rec = fasta
            .next_record()?
            .ok_or_else(|| anyhow!("FASTA input contains no records"))?;
        return Ok(rec.seq);
    }

    let end = raw.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(0, |i| i + 1);
    raw.truncate(end);
    Ok(raw)
}

pub fn read_sequence(path: &str) -> Result<Vec<u8>> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open sequence file '{}': {}", path, e))?;
    parse_sequence(std::io::BufReader::new(fh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn plain_text_strips_trailing_whitespace_only() {
        let seq = parse_sequence(Cursor::new(&b"MQNSHSGVNQ\n\n"[..])).unwrap();
        assert_eq!(seq, b"MQNSHSGVNQ");
        let seq = parse_sequence(Cursor::new(&b"  AC GT \r\n"[..])).unwrap();
        assert_eq!(seq, b"  AC GT");
    }

    #[test]
    fn fasta_takes_first_record() {
        let seq = parse_sequence(Cursor::new(&b"\n>a\nAC\nGT\n>b\nTTTT\n"[..])).unwrap();
        assert_eq!(seq, b"ACGT");
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        assert!(parse_sequence(Cursor::new(&b""[..])).unwrap().is_empty());
        assert!(parse_sequence(Cursor::new(&b" \n"[..])).unwrap().is_empty());
    }
}
