use std::collections::BTreeMap;

use tracing::debug;

use super::debouncer::{GestureDebouncer, GestureTransition};
use crate::config::{Config, GestureConfig};
use crate::pose::PoseSnapshot;

/// ボディスロットごとのジェスチャー判定
///
/// スロットはトラッカーフレーム内のボディ番号。初めて見たスロットに
/// 判定器を作り、`max_players` 以上のスロットは無視する。
pub struct PlayerRegistry {
    gesture: GestureConfig,
    max_players: usize,
    players: BTreeMap<usize, GestureDebouncer>,
}

impl PlayerRegistry {
    pub fn new(gesture: GestureConfig, max_players: usize) -> Self {
        Self {
            gesture,
            max_players,
            players: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.gesture.clone(), config.players.max_players)
    }

    pub fn update(&mut self, slot: usize, pose: &PoseSnapshot) -> GestureTransition {
        if slot >= self.max_players {
            debug!("ignoring body slot {} (max_players={})", slot, self.max_players);
            return GestureTransition::None;
        }
        let gesture = &self.gesture;
        self.players
            .entry(slot)
            .or_insert_with(|| GestureDebouncer::from_config(gesture))
            .update(&pose.skeleton, pose.timestamp_usec)
    }

    pub fn get(&self, slot: usize) -> Option<&GestureDebouncer> {
        self.players.get(&slot)
    }

    pub fn remove(&mut self, slot: usize) -> Option<GestureDebouncer> {
        self.players.remove(&slot)
    }

    /// 既存・今後のプレイヤー全員に適用
    pub fn set_level_threshold(&mut self, level: f32) {
        self.gesture.level_threshold = level;
        for player in self.players.values_mut() {
            player.set_level_threshold(level);
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.players.keys().copied()
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Joint, JointId, Skeleton};

    fn snapshot(hands_up: bool, timestamp_usec: u64) -> PoseSnapshot {
        let wrist_y = if hands_up { -900.0 } else { 0.0 };
        let mut s = Skeleton::default();
        s.set(JointId::Head, Joint::new(0.0, -600.0, 0.0));
        s.set(JointId::WristLeft, Joint::new(0.0, wrist_y, 0.0));
        s.set(JointId::WristRight, Joint::new(0.0, wrist_y, 0.0));
        PoseSnapshot::new(1, s, timestamp_usec)
    }

    #[test]
    fn test_creates_players_on_demand() {
        let mut reg = PlayerRegistry::new(GestureConfig::default(), 2);
        assert!(reg.is_empty());

        reg.update(1, &snapshot(false, 0));
        assert_eq!(reg.len(), 1);
        assert!(reg.get(0).is_none());
        assert!(reg.get(1).is_some());
    }

    #[test]
    fn test_ignores_slots_beyond_max() {
        let mut reg = PlayerRegistry::new(GestureConfig::default(), 2);
        assert_eq!(reg.update(2, &snapshot(true, 0)), GestureTransition::None);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_players_are_independent() {
        let mut reg = PlayerRegistry::new(GestureConfig::default(), 3);
        reg.update(0, &snapshot(true, 0));
        reg.update(2, &snapshot(false, 0));

        assert_eq!(reg.update(0, &snapshot(true, 2_100_000)), GestureTransition::Raised);
        assert_eq!(reg.update(2, &snapshot(false, 2_100_000)), GestureTransition::None);

        assert!(reg.get(0).map(|p| p.are_both_hands_raised()).unwrap_or(false));
        assert!(!reg.get(2).map(|p| p.are_both_hands_raised()).unwrap_or(true));
        assert_eq!(reg.slots().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_level_threshold_propagates() {
        let mut reg = PlayerRegistry::new(GestureConfig::default(), 2);
        reg.update(0, &snapshot(false, 0));
        reg.set_level_threshold(42.0);
        reg.update(1, &snapshot(false, 0));

        assert_eq!(reg.get(0).map(|p| p.level_threshold()), Some(42.0));
        assert_eq!(reg.get(1).map(|p| p.level_threshold()), Some(42.0));
    }

    #[test]
    fn test_remove_starts_fresh() {
        let mut reg = PlayerRegistry::new(GestureConfig::default(), 2);
        reg.update(0, &snapshot(true, 0));
        reg.update(0, &snapshot(true, 1_500_000));
        assert!(reg.remove(0).is_some());

        // 新しい判定器は蓄積ゼロから
        reg.update(0, &snapshot(true, 1_600_000));
        assert_eq!(reg.update(0, &snapshot(true, 2_200_000)), GestureTransition::None);
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.players.max_players = 5;
        config.gesture.level_threshold = 7.0;
        let mut reg = PlayerRegistry::from_config(&config);
        assert_eq!(reg.max_players(), 5);
        reg.update(4, &snapshot(false, 0));
        assert_eq!(reg.get(4).map(|p| p.level_threshold()), Some(7.0));
    }
}
