use serde::Deserialize;

use crate::pose::{JointId, Skeleton};

/// 設定で個別に有効化できる1フレーム判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// 左膝が左腰より上（level分の余裕込み）
    LeftKneeRaised,
    RightKneeRaised,
    LeftWristAboveShoulder,
    RightWristAboveShoulder,
    LeftWristAboveHead,
    RightWristAboveHead,
}

impl Predicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeftKneeRaised => "left_knee_raised",
            Self::RightKneeRaised => "right_knee_raised",
            Self::LeftWristAboveShoulder => "left_wrist_above_shoulder",
            Self::RightWristAboveShoulder => "right_wrist_above_shoulder",
            Self::LeftWristAboveHead => "left_wrist_above_head",
            Self::RightWristAboveHead => "right_wrist_above_head",
        }
    }

    /// 現フレームの骨格で判定する。Y軸は下向き
    pub fn evaluate(&self, skeleton: &Skeleton, level: f32) -> bool {
        use JointId::*;
        let y = |id: JointId| skeleton.get(id).y;
        match self {
            Self::LeftKneeRaised => y(KneeLeft) - level < y(HipLeft),
            Self::RightKneeRaised => y(KneeRight) - level < y(HipRight),
            Self::LeftWristAboveShoulder => y(WristLeft) < y(ShoulderLeft),
            Self::RightWristAboveShoulder => y(WristRight) < y(ShoulderRight),
            Self::LeftWristAboveHead => y(WristLeft) < y(Head),
            Self::RightWristAboveHead => y(WristRight) < y(Head),
        }
    }
}

/// 有効な判定とその最新結果
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    entries: Vec<(Predicate, bool)>,
}

impl PredicateSet {
    pub fn new(enabled: &[Predicate]) -> Self {
        let mut entries: Vec<(Predicate, bool)> = Vec::with_capacity(enabled.len());
        for &p in enabled {
            if !entries.iter().any(|(q, _)| *q == p) {
                entries.push((p, false));
            }
        }
        Self { entries }
    }

    pub fn update(&mut self, skeleton: &Skeleton, level: f32) {
        for (predicate, active) in &mut self.entries {
            *active = predicate.evaluate(skeleton, level);
        }
    }

    /// 無効な判定は常に false
    pub fn is_active(&self, predicate: Predicate) -> bool {
        self.entries
            .iter()
            .any(|(p, active)| *p == predicate && *active)
    }

    pub fn is_enabled(&self, predicate: Predicate) -> bool {
        self.entries.iter().any(|(p, _)| *p == predicate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
