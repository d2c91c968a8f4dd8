use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// 生成分布时的元信息，随分布一起持久化
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionMeta {
    pub seed: Option<u64>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 得分 → 出现次数
///
/// 只增不减；所有计数之和恒等于 `trials()`，
/// 下游可据此可靠地判断退化分布（零次试验或只有一个得分）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    counts: BTreeMap<i32, u64>,
    trials: u64,
    meta: DistributionMeta,
}

impl ScoreDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record(&mut self, score: i32) {
        *self.counts.entry(score).or_insert(0) += 1;
        self.trials += 1;
    }

    /// 合并两份分布（计数相加）；满足结合律，供并行归约使用
    pub fn merge(&mut self, other: ScoreDistribution) {
        for (score, n) in other.counts {
            *self.counts.entry(score).or_insert(0) += n;
        }
        self.trials += other.trials;
    }

    pub fn merged(mut self, other: ScoreDistribution) -> Self {
        self.merge(other);
        self
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn is_empty(&self) -> bool {
        self.trials == 0
    }

    pub fn count(&self, score: i32) -> u64 {
        self.counts.get(&score).copied().unwrap_or(0)
    }

    /// 按得分升序遍历 (score, count)
    pub fn iter(&self) -> impl Iterator<Item = (i32, u64)> + '_ {
        self.counts.iter().map(|(&s, &n)| (s, n))
    }

    pub fn meta(&self) -> &DistributionMeta {
        &self.meta
    }

    pub fn set_meta(&mut self, meta: DistributionMeta) {
        self.meta = meta;
    }

    /// 每个得分占总试验数的比例
    pub fn fractions(&self) -> Vec<(i32, f64)> {
        if self.trials == 0 {
            return Vec::new();
        }
        let total = self.trials as f64;
        self.iter().map(|(s, n)| (s, n as f64 / total)).collect()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.trials == 0 {
            return None;
        }
        let sum: f64 = self.iter().map(|(s, n)| s as f64 * n as f64).sum();
        Some(sum / self.trials as f64)
    }

    /// 总体标准差（除以 N）
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let var: f64 = self
            .iter()
            .map(|(s, n)| (s as f64 - mean).powi(2) * n as f64)
            .sum::<f64>()
            / self.trials as f64;
        Some(var.sqrt())
    }

    /// 观测得分相对零分布的 z 值；标准差为 0 时无意义，返回 None
    pub fn z_score(&self, observed: i32) -> Option<f64> {
        let mean = self.mean()?;
        let sd = self.std_dev()?;
        if sd == 0.0 {
            return None;
        }
        Some((observed as f64 - mean) / sd)
    }

    /// 归一化分布的文本柱状图，最长的柱子占 `width` 个字符
    pub fn render_histogram(&self, width: usize) -> String {
        let fractions = self.fractions();
        let peak = fractions.iter().map(|&(_, f)| f).fold(0.0f64, f64::max);
        let mut out = String::new();
        for (score, frac) in fractions {
            let bar = if peak > 0.0 {
                (frac / peak * width as f64).round() as usize
            } else {
                0
            };
            let _ = writeln!(out, "{:>6} | {:<width$} {:.4}", score, "#".repeat(bar), frac, width = width);
        }
        out
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let mut f = std::fs::File::create(path)?;
        bincode::serialize_into(&mut f, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let dist: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        Ok(dist)
    }
}

impl FromIterator<i32> for ScoreDistribution {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut d = Self::new();
        for s in iter {
            d.record(s);
        }
        d
    }
}
