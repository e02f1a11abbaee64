//! Media Player Statechart
//!
//! This example demonstrates orthogonal regions: while `playing`, the
//! `volume` and `track` regions change independently of each other.
//!
//! Key concepts:
//! - Regions initialized together with their owning state
//! - Region-addressed triggers (`volume:mute`)
//! - Deep targets (`playing:track:next`) and fan-out targets
//! - Targets bubbling up to an ancestor machine
//! - Exit hooks transforming the arguments of the next state
//!
//! Run with: RUST_LOG=statechart=debug cargo run --example media_player

use statechart::builder::{StateBuilder, StateMachineBuilder, TransitionBuilder};
use statechart::config::MachineConfig;
use statechart::core::Path;
use statechart::{BuildError, Statechart};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Arguments carried by every trigger: the playback position in seconds.
#[derive(Clone, Debug, Default)]
struct Playback {
    position: u32,
}

fn volume() -> Result<MachineConfig<Playback>, BuildError> {
    Ok(StateMachineBuilder::new()
        .initial("normal")
        .state(
            "normal",
            StateBuilder::new()
                .transition(TransitionBuilder::on("mute").to("muted"))?
                .transition(TransitionBuilder::on("louder").to("loud"))?,
        )?
        .state(
            "loud",
            StateBuilder::new().transition(TransitionBuilder::on("quieter").to("normal"))?,
        )?
        .state(
            "muted",
            StateBuilder::new().transition(TransitionBuilder::on("mute").to("normal"))?,
        )?
        .build())
}

fn track() -> Result<MachineConfig<Playback>, BuildError> {
    Ok(StateMachineBuilder::new()
        .initial("current")
        .state(
            "current",
            StateBuilder::new()
                .transition(TransitionBuilder::on("skip").to("next"))?
                // Past the end of the playlist the whole player stops.
                .transition(
                    TransitionBuilder::on("end")
                        .to("stopped")
                        .when(|p: &Playback| p.position > 0),
                )?,
        )?
        .state(
            "next",
            StateBuilder::new()
                .on_enter(|origin: Option<&Path>, p: &Playback| {
                    info!(origin = ?origin.map(ToString::to_string), position = p.position, "next track");
                })
                .transition(TransitionBuilder::on("skip").to("current"))?,
        )?
        .build())
}

fn player() -> Result<MachineConfig<Playback>, BuildError> {
    Ok(StateMachineBuilder::new()
        .initial("stopped")
        .state(
            "stopped",
            StateBuilder::new()
                .transition(TransitionBuilder::on("play").to("playing"))?
                .transition(TransitionBuilder::on("next").to("playing:track:next"))?,
        )?
        .state(
            "playing",
            StateBuilder::new()
                .on_exit(|p: &Playback| {
                    info!(position = p.position, "leaving playing, position rewound");
                    Some(Playback { position: 0 })
                })
                .region("volume", volume()?)?
                .region("track", track()?)?
                .transition(TransitionBuilder::on("stop").to("stopped"))?
                .transition(
                    TransitionBuilder::on("party").to(vec!["volume:loud", "track:next"]),
                )?,
        )?
        .build())
}

fn show(chart: &Statechart<Playback>) {
    let active: Vec<String> = chart.active_paths().iter().map(ToString::to_string).collect();
    println!("  active: {}", active.join(", "));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== Media Player Statechart ===\n");

    let mut chart = Statechart::try_new(player()?)?;
    chart.initialize(&Playback::default());
    show(&chart);

    let at = |position| Playback { position };
    for (trigger, args) in [
        ("play", at(0)),
        ("volume:mute", at(12)),
        ("track:skip", at(40)),
        ("volume:louder", at(41)),
        ("volume:mute", at(42)),
        ("volume:louder", at(43)),
        ("stop", at(90)),
        ("next", at(0)),
        ("party", at(5)),
        ("track:skip", at(6)),
        ("track:end", at(180)),
    ] {
        let enabled = chart.can_trigger(trigger, &args);
        println!("\n{trigger} at {}s (enabled: {enabled})", args.position);
        chart.trigger(trigger, &args);
        show(&chart);
    }

    println!("\nVolume region history: {:?}", chart.history().get_path(&Path::parse("playing:volume")));

    println!("\n=== Example Complete ===");
    Ok(())
}
