//! Traffic Light Statechart
//!
//! This example demonstrates a simple cyclic chart driven by one trigger.
//!
//! Key concepts:
//! - Cyclic transitions on a shared trigger token
//! - Guards over the trigger arguments
//! - Enter hooks observing the originating trigger
//!
//! Run with: cargo run --example traffic_light

use statechart::builder::{simple_transition, StateBuilder, StateMachineBuilder, TransitionBuilder};
use statechart::core::Path;
use statechart::{BuildError, Statechart};

/// Seconds elapsed since the light last changed.
type Elapsed = u32;

fn light(next: &str, min_seconds: Elapsed) -> Result<StateBuilder<Elapsed>, BuildError> {
    let name = next.to_string();
    StateBuilder::new()
        .on_enter(move |origin: Option<&Path>, elapsed: &Elapsed| {
            let origin = origin.map(ToString::to_string).unwrap_or_else(|| "boot".into());
            println!("  -> entering (after {elapsed}s, via {origin}), next is {name}");
        })
        .transition(
            TransitionBuilder::on("tick")
                .to(next)
                .when(move |elapsed: &Elapsed| *elapsed >= min_seconds),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Traffic Light Statechart ===\n");

    let config = StateMachineBuilder::new()
        .initial("red")
        .state("red", light("green", 30)?)?
        .state("green", light("yellow", 25)?)?
        .state(
            "yellow",
            StateBuilder::new().add_transition(simple_transition("tick", "red")?),
        )?
        .build();

    let mut chart = Statechart::try_new(config)?;
    chart.initialize(&0);
    println!("Initial state: {:?}\n", chart.current_state());

    for elapsed in [10, 30, 5, 25, 1] {
        let ready = chart.can_trigger("tick", &elapsed);
        chart.trigger("tick", &elapsed);
        println!(
            "tick after {elapsed:>2}s (enabled: {ready:<5}) -> {:?}",
            chart.current_state()
        );
    }

    println!("\nRoot machine visited: {:?}", chart.history().get_path(&Path::root()));

    println!("\n=== Example Complete ===");
    Ok(())
}
