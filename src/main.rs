use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use tracing::info;

use jump_gesture::config::Config;
use jump_gesture::gesture::{GestureTransition, PlayerRegistry};
use jump_gesture::pose::{Joint, JointId, PoseSnapshot, Skeleton};
use jump_gesture::session::{InputEvent, SessionController, SessionEvent};

#[derive(Parser, Debug)]
#[command(name = "jump_gesture", about = "Hand-raised gesture replay console")]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Override gesture.level_threshold
    #[arg(long)]
    level: Option<f32>,
}

fn print_usage() {
    println!("コマンド:");
    println!("  f slot t lw rw head lf rf  - フレーム入力 (t: µs, 他: 各関節のY mm)");
    println!("  space                      - セッション開始/終了 (次のフレームで反映)");
    println!("  s                          - 状態表示");
    println!("  h                          - ヘルプ");
    println!("  q                          - 終了");
    println!();
}

/// `f` コマンドの引数から1フレームを作る
fn parse_frame(args: &[&str]) -> Result<(usize, PoseSnapshot)> {
    if args.len() != 7 {
        bail!("expected 7 arguments, got {}", args.len());
    }
    let slot: usize = args[0].parse().context("slot")?;
    let timestamp_usec: u64 = args[1].parse().context("timestamp")?;
    let mut ys = [0.0f32; 5];
    for (y, s) in ys.iter_mut().zip(&args[2..]) {
        *y = s.parse().with_context(|| format!("joint y '{}'", s))?;
    }

    let mut skeleton = Skeleton::default();
    let joints = [
        JointId::WristLeft,
        JointId::WristRight,
        JointId::Head,
        JointId::FootLeft,
        JointId::FootRight,
    ];
    for (id, y) in joints.into_iter().zip(ys) {
        skeleton.set(id, Joint::new(0.0, y, 0.0));
    }
    Ok((slot, PoseSnapshot::new(slot as u32, skeleton, timestamp_usec)))
}

fn print_status(registry: &PlayerRegistry, sessions: &BTreeMap<usize, SessionController>) {
    if registry.is_empty() {
        println!("プレイヤーなし");
        return;
    }
    for slot in registry.slots() {
        let Some(player) = registry.get(slot) else { continue };
        let recording = sessions.get(&slot).map(|s| s.is_recording()).unwrap_or(false);
        println!(
            "  [{}] raised={} hold={:?} primary={} secondary={} recording={}",
            slot,
            player.are_both_hands_raised(),
            player.hold_duration(),
            player.is_primary_direction_active(),
            player.is_secondary_direction_active(),
            recording,
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jump_gesture=info".into()),
        )
        .init();

    info!("jump_gesture {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_VERSION"));

    let config = Config::load_or_default(&cli.config);
    let mut registry = PlayerRegistry::from_config(&config);
    if let Some(level) = cli.level {
        registry.set_level_threshold(level);
    }
    info!(
        "level_threshold={} max_players={}",
        cli.level.unwrap_or(config.gesture.level_threshold),
        registry.max_players()
    );

    println!("=== Jump Gesture Console ===");
    println!("両手を頭より上に2秒以上上げるとセッションを開始/終了します");
    println!();
    print_usage();

    let mut sessions: BTreeMap<usize, SessionController> = BTreeMap::new();
    let mut pending: Vec<InputEvent> = Vec::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        let input = match parts[0] {
            "space" => Some(InputEvent::SpacePressed),
            "q" => Some(InputEvent::Quit),
            "h" => Some(InputEvent::Help),
            _ => None,
        };

        match (parts[0], input) {
            (_, Some(InputEvent::Quit)) => break,
            (_, Some(InputEvent::Help)) => print_usage(),
            (_, Some(event)) => pending.push(event),
            ("s", None) => print_status(&registry, &sessions),
            ("f", None) => {
                let (slot, pose) = match parse_frame(&parts[1..]) {
                    Ok(frame) => frame,
                    Err(e) => {
                        println!("不正なフレーム: {:#}", e);
                        continue;
                    }
                };
                if slot >= registry.max_players() {
                    println!("スロット {} は max_players 以上なので無視します", slot);
                    continue;
                }

                let transition = registry.update(slot, &pose);
                sessions.entry(slot).or_insert_with(|| SessionController::new(slot));

                // スペース入力は全プレイヤーに適用してから消費する
                for (&s, session) in sessions.iter_mut() {
                    let t = if s == slot { transition } else { GestureTransition::None };
                    match session.step(&pending, t, pose.timestamp_usec) {
                        Some(SessionEvent::Started { player, .. }) => {
                            println!("[{}] セッション開始", player);
                        }
                        Some(SessionEvent::Finished {
                            player,
                            started_usec,
                            finished_usec,
                        }) => {
                            println!(
                                "[{}] セッション終了 ({:.2}s)",
                                player,
                                finished_usec.saturating_sub(started_usec) as f64 / 1_000_000.0
                            );
                        }
                        None => {}
                    }
                }
                pending.clear();
            }
            (cmd, None) => println!("不明なコマンド: {}", cmd),
        }
    }

    println!("終了します");
    Ok(())
}
