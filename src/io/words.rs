use anyhow::{anyhow, Result};
use std::io::BufRead;
use tracing::info;

/// 按行切分词表，仅去掉行尾的 '\r'；空行和重复项原样保留
pub fn parse_words<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        words.push(line.strip_suffix('\r').unwrap_or(&line).to_string());
    }
    Ok(words)
}

pub fn read_words(path: &str) -> Result<Vec<String>> {
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open word list '{}': {}", path, e))?;
    let words = parse_words(std::io::BufReader::new(fh))?;
    info!(path, words = words.len(), "loaded dictionary");
    Ok(words)
}
