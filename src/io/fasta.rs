use anyhow::Result;
use std::io::BufRead;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

/// 逐条读取 FASTA 记录；序列行去掉空白后原样拼接，不做大小写或字母表转换
pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    pending_header: Option<String>,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            pending_header: None,
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let n = self.reader.read_line(&mut self.buf)?;
        if n == 0 {
            self.done = true;
        }
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        let header = match self.pending_header.take() {
            Some(h) => h,
            None => loop {
                if self.done || !self.read_line()? {
                    return Ok(None);
                }
                if let Some(rest) = self.buf.strip_prefix('>') {
                    break rest.trim().to_string();
                }
            },
        };

        let (id, desc) = match header.split_once(char::is_whitespace) {
            Some((id, rest)) => {
                let rest = rest.trim();
                (id.to_string(), (!rest.is_empty()).then(|| rest.to_string()))
            }
            None => (header.clone(), None),
        };

        let mut seq: Vec<u8> = Vec::new();
        while !self.done && self.read_line()? {
            if let Some(rest) = self.buf.strip_prefix('>') {
                self.pending_header = Some(rest.trim().to_string());
                break;
            }
            seq.extend(self.buf.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_two_records() {
        let data = b">PAX6_HUMAN paired box\nMQNSHSGV\nNQLGG\n>consensus\nGQGRVNQ\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));

        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.id, "PAX6_HUMAN");
        assert_eq!(r1.desc.as_deref(), Some("paired box"));
        assert_eq!(r1.seq, b"MQNSHSGVNQLGG");

        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.id, "consensus");
        assert_eq!(r2.desc, None);
        assert_eq!(r2.seq, b"GQGRVNQ");

        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn keeps_case_and_strips_crlf() {
        let data = b"\n>w1 \r\nhu mb\r\nle\r\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, "w1");
        assert_eq!(rec.seq, b"humble");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn empty_input() {
        let mut r = FastaReader::new(Cursor::new(&b""[..]));
        assert!(r.next_record().unwrap().is_none());
    }
}
