use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::predicate::{Predicate, PredicateSet};
use crate::config::GestureConfig;
use crate::pose::{JointId, Skeleton};

/// 両手上げと判定するまでに必要な連続保持時間
pub const STABLE_THRESHOLD: Duration = Duration::from_secs(2);

/// 足の高さ差による方向フラグの保持方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionMode {
    /// 閾値内に戻っても直前の値を保持する
    #[default]
    Latched,
    /// 閾値内に戻ったら両方クリアする
    Momentary,
}

/// 1回の update で起きた両手上げ状態の変化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureTransition {
    None,
    Raised,
    Lowered,
}

/// 両手上げジェスチャーのデバウンス判定
///
/// 生の判定（両手首が頭より上）が [`STABLE_THRESHOLD`] を超えて連続した時点で
/// アクティブになり、判定が外れたフレームで即座に解除される。
/// 時間は呼び出し側のタイムスタンプだけで計算するので、記録データの再生でも
/// 同じ結果になる。
///
/// NaN 座標は比較が常に false になるため「手が上がっていない」として扱われる。
#[derive(Debug, Clone)]
pub struct GestureDebouncer {
    /// 足の高さ差の閾値
    level_threshold: f32,
    direction_mode: DirectionMode,
    primary_direction: bool,
    secondary_direction: bool,
    both_hands_raised: bool,
    /// 生判定が連続して成立している時間
    hold_duration: Duration,
    /// 前回のタイムスタンプ。None は「前回サンプルなし」
    last_timestamp_usec: Option<u64>,
    predicates: PredicateSet,
}

impl GestureDebouncer {
    pub fn new() -> Self {
        Self {
            level_threshold: 0.0,
            direction_mode: DirectionMode::Latched,
            primary_direction: false,
            secondary_direction: false,
            both_hands_raised: false,
            hold_duration: Duration::ZERO,
            last_timestamp_usec: None,
            predicates: PredicateSet::default(),
        }
    }

    /// 設定から作成
    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new()
            .with_level_threshold(config.level_threshold)
            .with_direction_mode(config.direction_mode)
            .with_predicates(&config.predicates)
    }

    pub fn with_level_threshold(mut self, level: f32) -> Self {
        self.level_threshold = level;
        self
    }

    pub fn with_direction_mode(mut self, mode: DirectionMode) -> Self {
        self.direction_mode = mode;
        self
    }

    pub fn with_predicates(mut self, enabled: &[Predicate]) -> Self {
        self.predicates = PredicateSet::new(enabled);
        self
    }

    /// 次の update から有効
    pub fn set_level_threshold(&mut self, level: f32) {
        self.level_threshold = level;
    }

    pub fn level_threshold(&self) -> f32 {
        self.level_threshold
    }

    /// 1フレーム分の骨格を入力する。timestamp_usec は単調非減少であること
    pub fn update(&mut self, skeleton: &Skeleton, timestamp_usec: u64) -> GestureTransition {
        let raised = Self::raw_condition(skeleton);
        self.update_direction(skeleton);
        self.predicates.update(skeleton, self.level_threshold);

        let was_raised = self.both_hands_raised;

        let last = match self.last_timestamp_usec {
            Some(last) => last,
            None => {
                self.hold_duration = Duration::ZERO;
                timestamp_usec
            }
        };

        if !self.both_hands_raised && raised {
            // 逆行したタイムスタンプは0として加算
            self.hold_duration += Duration::from_micros(timestamp_usec.saturating_sub(last));
            self.last_timestamp_usec = Some(timestamp_usec);
            if self.hold_duration > STABLE_THRESHOLD {
                self.both_hands_raised = true;
            }
        } else if !raised {
            // 手を下げたら即解除、蓄積もリセット
            self.both_hands_raised = false;
            self.last_timestamp_usec = None;
            self.hold_duration = Duration::ZERO;
        } else {
            // アクティブ中は保持時間を凍結
            self.last_timestamp_usec = Some(timestamp_usec);
        }

        match (was_raised, self.both_hands_raised) {
            (false, true) => {
                debug!(
                    "both hands raised at {}us (held {:?})",
                    timestamp_usec, self.hold_duration
                );
                GestureTransition::Raised
            }
            (true, false) => {
                debug!("both hands lowered at {}us", timestamp_usec);
                GestureTransition::Lowered
            }
            _ => GestureTransition::None,
        }
    }

    /// 両手首が頭より上か（Y軸下向き）
    fn raw_condition(skeleton: &Skeleton) -> bool {
        let head = skeleton.get(JointId::Head);
        skeleton.get(JointId::WristLeft).is_above(head)
            && skeleton.get(JointId::WristRight).is_above(head)
    }

    fn update_direction(&mut self, skeleton: &Skeleton) {
        let delta = skeleton.get(JointId::FootLeft).y - skeleton.get(JointId::FootRight).y;
        let mut triggered = false;

        if delta > self.level_threshold {
            self.secondary_direction = true;
            self.primary_direction = false;
            triggered = true;
        }

        if -delta > self.level_threshold {
            self.primary_direction = true;
            self.secondary_direction = false;
            triggered = true;
        }

        if !triggered && self.direction_mode == DirectionMode::Momentary {
            self.primary_direction = false;
            self.secondary_direction = false;
        }
    }

    pub fn are_both_hands_raised(&self) -> bool {
        self.both_hands_raised
    }

    /// 右足が左足より level を超えて高い
    pub fn is_primary_direction_active(&self) -> bool {
        self.primary_direction
    }

    /// 左足が右足より level を超えて高い
    pub fn is_secondary_direction_active(&self) -> bool {
        self.secondary_direction
    }

    pub fn is_predicate_active(&self, predicate: Predicate) -> bool {
        self.predicates.is_active(predicate)
    }

    pub fn hold_duration(&self) -> Duration {
        self.hold_duration
    }

    pub fn last_timestamp_usec(&self) -> Option<u64> {
        self.last_timestamp_usec
    }

    pub fn reset(&mut self) {
        self.both_hands_raised = false;
        self.hold_duration = Duration::ZERO;
        self.last_timestamp_usec = None;
        self.primary_direction = false;
        self.secondary_direction = false;
    }
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
