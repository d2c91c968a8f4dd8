use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::util::alphabet::Alphabet;

/// 运行配置，从 TOML 文件读取；命令行参数优先于这里的值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub null_model: NullModelConfig,
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub alphabet: Alphabet,
    pub diag: i32,
    pub off_diag: i32,
    pub dash: i32,
    /// 外部打分矩阵文件；设置后忽略上面的三个标量
    pub matrix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullModelConfig {
    pub trials: u64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// 0 表示使用 rayon 默认线程数
    pub threads: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Dna,
            diag: 2,
            off_diag: 1,
            dash: 0,
            matrix: None,
        }
    }
}

impl Default for NullModelConfig {
    fn default() -> Self {
        Self { trials: 1000, seed: None }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| anyhow!("invalid config: {}", e))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("cannot read config '{}': {}", path.display(), e))?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.scoring.diag, 2);
        assert_eq!(cfg.null_model.trials, 1000);
    }

    #[test]
    fn partial_sections() {
        let cfg = Config::from_toml(
            r#"
            [scoring]
            alphabet = "protein"
            dash = -4

            [null_model]
            seed = 17

            [runtime]
            threads = 8
            "#,
        )
        .unwrap();
        assert_eq!(cfg.scoring.alphabet, Alphabet::Protein);
        assert_eq!(cfg.scoring.dash, -4);
        assert_eq!(cfg.scoring.off_diag, 1);
        assert_eq!(cfg.null_model.seed, Some(17));
        assert_eq!(cfg.null_model.trials, 1000);
        assert_eq!(cfg.runtime.threads, 8);
    }

    #[test]
    fn rejects_bad_alphabet() {
        assert!(Config::from_toml("[scoring]\nalphabet = \"klingon\"\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqalign.toml");
        std::fs::write(&path, "[scoring]\nmatrix = \"pam50.txt\"\n").unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.scoring.matrix.as_deref(), Some("pam50.txt"));
        assert!(Config::load(dir.path().join("missing.toml")).is_err());
    }
}
