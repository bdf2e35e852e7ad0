use tracing::info;

use crate::gesture::GestureTransition;

/// フレームループに渡す入力イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// 手動でセッションを開始/終了
    SpacePressed,
    Quit,
    Help,
}

/// イベント列にセッション切替の入力が含まれるか
pub fn space_pressed(events: &[InputEvent]) -> bool {
    events.contains(&InputEvent::SpacePressed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Recording { started_usec: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started {
        player: usize,
        started_usec: u64,
    },
    Finished {
        player: usize,
        started_usec: u64,
        finished_usec: u64,
    },
}

/// 1プレイヤー分のジャンプセッション開始/終了
///
/// 両手上げの立ち上がり、またはスペース入力でトグルする。
pub struct SessionController {
    player: usize,
    state: SessionState,
}

impl SessionController {
    pub fn new(player: usize) -> Self {
        Self {
            player,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, SessionState::Recording { .. })
    }

    /// 1フレーム分の入力とジェスチャー変化で状態を進める
    pub fn step(
        &mut self,
        inputs: &[InputEvent],
        transition: GestureTransition,
        timestamp_usec: u64,
    ) -> Option<SessionEvent> {
        let trigger = space_pressed(inputs) || transition == GestureTransition::Raised;
        self.update(trigger, timestamp_usec)
    }

    pub fn update(&mut self, trigger: bool, timestamp_usec: u64) -> Option<SessionEvent> {
        if !trigger {
            return None;
        }

        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Recording {
                    started_usec: timestamp_usec,
                };
                info!("player {}: jump session started at {}us", self.player, timestamp_usec);
                Some(SessionEvent::Started {
                    player: self.player,
                    started_usec: timestamp_usec,
                })
            }
            SessionState::Recording { started_usec } => {
                self.state = SessionState::Idle;
                info!(
                    "player {}: jump session finished ({}us)",
                    self.player,
                    timestamp_usec.saturating_sub(started_usec)
                );
                Some(SessionEvent::Finished {
                    player: self.player,
                    started_usec,
                    finished_usec: timestamp_usec,
                })
            }
        }
    }
}
