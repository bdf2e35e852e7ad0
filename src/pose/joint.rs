/// ボディトラッカーの 32 関節インデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointId {
    Pelvis = 0,
    SpineNavel = 1,
    SpineChest = 2,
    Neck = 3,
    ClavicleLeft = 4,
    ShoulderLeft = 5,
    ElbowLeft = 6,
    WristLeft = 7,
    HandLeft = 8,
    HandTipLeft = 9,
    ThumbLeft = 10,
    ClavicleRight = 11,
    ShoulderRight = 12,
    ElbowRight = 13,
    WristRight = 14,
    HandRight = 15,
    HandTipRight = 16,
    ThumbRight = 17,
    HipLeft = 18,
    KneeLeft = 19,
    AnkleLeft = 20,
    FootLeft = 21,
    HipRight = 22,
    KneeRight = 23,
    AnkleRight = 24,
    FootRight = 25,
    Head = 26,
    Nose = 27,
    EyeLeft = 28,
    EarLeft = 29,
    EyeRight = 30,
    EarRight = 31,
}

impl JointId {
    pub const COUNT: usize = 32;

    const ALL: [JointId; Self::COUNT] = [
        Self::Pelvis,
        Self::SpineNavel,
        Self::SpineChest,
        Self::Neck,
        Self::ClavicleLeft,
        Self::ShoulderLeft,
        Self::ElbowLeft,
        Self::WristLeft,
        Self::HandLeft,
        Self::HandTipLeft,
        Self::ThumbLeft,
        Self::ClavicleRight,
        Self::ShoulderRight,
        Self::ElbowRight,
        Self::WristRight,
        Self::HandRight,
        Self::HandTipRight,
        Self::ThumbRight,
        Self::HipLeft,
        Self::KneeLeft,
        Self::AnkleLeft,
        Self::FootLeft,
        Self::HipRight,
        Self::KneeRight,
        Self::AnkleRight,
        Self::FootRight,
        Self::Head,
        Self::Nose,
        Self::EyeLeft,
        Self::EarLeft,
        Self::EyeRight,
        Self::EarRight,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// 単一関節の3D位置
///
/// トラッカー座標系（ミリメートル）。Y軸は地面方向が正なので、
/// `a.y < b.y` は a が b より高い位置にあることを意味する。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Joint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Joint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// self が other より上にあるか（Y軸下向き）
    pub fn is_above(&self, other: &Joint) -> bool {
        self.y < other.y
    }
}

/// 32関節からなる骨格
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    pub joints: [Joint; JointId::COUNT],
}

impl Skeleton {
    pub fn new(joints: [Joint; JointId::COUNT]) -> Self {
        Self { joints }
    }

    /// インデックスで関節を取得
    pub fn get(&self, id: JointId) -> &Joint {
        &self.joints[id as usize]
    }

    pub fn set(&mut self, id: JointId, joint: Joint) {
        self.joints[id as usize] = joint;
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            joints: [Joint::default(); JointId::COUNT],
        }
    }
}

/// トラッカーから1フレーム分受け取る骨格とタイムスタンプ
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PoseSnapshot {
    /// トラッカーが割り当てたボディID
    pub body_id: u32,
    pub skeleton: Skeleton,
    /// デバイスタイムスタンプ（マイクロ秒、単調非減少）
    pub timestamp_usec: u64,
}

impl PoseSnapshot {
    pub fn new(body_id: u32, skeleton: Skeleton, timestamp_usec: u64) -> Self {
        Self {
            body_id,
            skeleton,
            timestamp_usec,
        }
    }
}
