//! 机位轮换服务 - 业务能力层
//!
//! 只负责"挑选下一个机位"能力：排除最近用过的两个机位，避免一批图片构图重复

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::models::CINEMATIC_ANGLES;

/// 参与排除的最近历史条数
const RECENT_EXCLUSION: usize = 2;

/// 机位轮换器
///
/// 历史记录只在一次批次内有效，每次批次开始都会创建新的轮换器
pub struct AngleRotator {
    angles: Vec<String>,
    history: Vec<String>,
    rng: StdRng,
}

impl AngleRotator {
    /// 使用固定的机位列表创建
    pub fn cinematic() -> Self {
        Self {
            angles: CINEMATIC_ANGLES.iter().map(|a| a.to_string()).collect(),
            history: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// 使用自定义机位列表创建，列表为空时返回 None
    pub fn with_angles(angles: Vec<String>, rng: StdRng) -> Option<Self> {
        if angles.is_empty() {
            return None;
        }
        Some(Self {
            angles,
            history: Vec::new(),
            rng,
        })
    }

    /// 使用固定种子创建（用于复现）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::cinematic()
        }
    }

    /// 挑选下一个机位
    ///
    /// 候选集 = 全部机位 - 最近两次的机位；候选集为空时（列表少于 3 个）退回全部机位
    pub fn next(&mut self) -> String {
        let recent_start = self.history.len().saturating_sub(RECENT_EXCLUSION);
        let recent = &self.history[recent_start..];

        let mut candidates: Vec<&String> = self
            .angles
            .iter()
            .filter(|angle| !recent.contains(angle))
            .collect();

        if candidates.is_empty() {
            debug!("候选机位为空，允许重复使用");
            candidates = self.angles.iter().collect();
        }

        // angles 非空，所以 candidates 一定非空
        let chosen = candidates
            .choose(&mut self.rng)
            .map(|angle| (*angle).clone())
            .unwrap_or_default();

        self.history.push(chosen.clone());
        chosen
    }

    /// 已选机位历史
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pick_repeats_last_two() {
        for seed in 0..20 {
            let mut rotator = AngleRotator::seeded(seed);
            let picks: Vec<String> = (0..50).map(|_| rotator.next()).collect();

            for i in 1..picks.len() {
                assert_ne!(picks[i], picks[i - 1], "种子 {} 第 {} 次重复", seed, i);
                if i >= 2 {
                    assert_ne!(picks[i], picks[i - 2], "种子 {} 第 {} 次重复", seed, i);
                }
            }
        }
    }

    #[test]
    fn test_picks_come_from_fixed_list() {
        let mut rotator = AngleRotator::seeded(7);
        for _ in 0..20 {
            let angle = rotator.next();
            assert!(CINEMATIC_ANGLES.contains(&angle.as_str()));
        }
        assert_eq!(rotator.history().len(), 20);
    }

    #[test]
    fn test_three_angles_cycle_strictly() {
        let angles = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut rotator = AngleRotator::with_angles(angles, StdRng::seed_from_u64(1)).unwrap();

        let picks: Vec<String> = (0..9).map(|_| rotator.next()).collect();
        // 三个机位时只剩一个候选，必然按固定周期轮换
        for i in 3..picks.len() {
            assert_eq!(picks[i], picks[i - 3]);
        }
    }

    #[test]
    fn test_small_list_falls_back_to_reuse() {
        let angles = vec!["only".to_string(), "two".to_string()];
        let mut rotator = AngleRotator::with_angles(angles, StdRng::seed_from_u64(3)).unwrap();

        let picks: Vec<String> = (0..5).map(|_| rotator.next()).collect();
        assert_eq!(picks.len(), 5);
        assert!(picks.iter().all(|p| p == "only" || p == "two"));
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(AngleRotator::with_angles(Vec::new(), StdRng::seed_from_u64(0)).is_none());
    }
}
