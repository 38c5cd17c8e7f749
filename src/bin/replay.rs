//! Delegation Replay
//!
//! Replays a recorded orchestration event script through the delegation
//! tracker and prints the live status lines to the console.
//!
//! Usage:
//!   REPLAY_EVENTS_FILE="demos/parallel_review.jsonl" \
//!   REPLAY_STEP_MS=1500 \
//!   cargo run --bin replay
//!
//! Environment variables:
//!   REPLAY_EVENTS_FILE - JSON Lines event script to replay
//!   REPLAY_STEP_MS     - (optional) pause between events in ms (default: 0)
//!   DELEGATION_*       - tracker settings, see TrackerConfig::from_env

use futures_util::StreamExt;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use subagent_tracker::replay::load_event_script;
use subagent_tracker::{ConsoleSink, DelegationTracker, TokioScheduler, TrackerConfig};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    println!("🛰️  Delegation Replay");
    println!("====================\n");

    let events_file = env::var("REPLAY_EVENTS_FILE").unwrap_or_else(|_| {
        eprintln!("❌ REPLAY_EVENTS_FILE not set!");
        std::process::exit(1);
    });

    let step_ms = match env::var("REPLAY_STEP_MS") {
        Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|e| {
            eprintln!("⚠️  Invalid REPLAY_STEP_MS '{}': {}. Using 0.", raw, e);
            0
        }),
        Err(_) => 0,
    };

    let events = match load_event_script(&events_file) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let config = TrackerConfig::from_env();

    println!("📝 Configuration:");
    println!("   Script:    {} ({} events)", events_file, events.len());
    println!("   Step:      {}ms", step_ms);
    println!("   Interval:  {}s", config.progress_interval().as_secs());
    println!();

    let tracker = DelegationTracker::new(config, Arc::new(ConsoleSink), Arc::new(TokioScheduler));
    log::info!("[REPLAY] Starting run {}", tracker.run_id());

    let step = Duration::from_millis(step_ms);
    let stream = futures_util::stream::iter(events).then(move |event| async move {
        if !step.is_zero() {
            tokio::time::sleep(step).await;
        }
        event
    });

    tracker.drain(stream).await;

    log::info!("[REPLAY] Run {} finished", tracker.run_id());
}
