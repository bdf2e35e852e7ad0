pub mod joint;

pub use joint::{Joint, JointId, PoseSnapshot, Skeleton};
