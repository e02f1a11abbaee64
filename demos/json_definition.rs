//! Statechart from a JSON Definition
//!
//! This example demonstrates loading the static shape of a chart from JSON,
//! validating it, and attaching hooks in code afterwards.
//!
//! Key concepts:
//! - Serde definitions (`initialState`, `transitions`, `regions`)
//! - Accumulated validation of the whole tree
//! - Walking the configured tree with `state_names` / `region_names`
//! - Hooks attached through `state_mut` / `region_mut`
//!
//! Run with: cargo run --example json_definition

use statechart::config::MachineConfig;
use statechart::core::{FnHooks, Path};
use statechart::Statechart;
use stillwater::validation::Validation;

const DOOR: &str = r#"{
    "initialState": "closed",
    "closed": {
        "transitions": [
            { "trigger": "open", "target": "open" },
            { "trigger": "lock", "target": "locked" }
        ]
    },
    "open": {
        "transitions": [{ "trigger": "close", "target": "closed" }],
        "regions": {
            "alarm": {
                "initialState": "quiet",
                "quiet": { "transitions": [{ "trigger": "timeout", "target": "ringing" }] },
                "ringing": {}
            }
        }
    },
    "locked": {
        "transitions": [{ "trigger": "unlock", "target": "closed" }]
    }
}"#;

const BROKEN: &str = r#"{
    "initialState": "ajar",
    "closed": {
        "transitions": [{ "trigger": "open", "target": "opne" }]
    },
    "open": {
        "regions": { "alarm": { "quiet": {} } }
    }
}"#;

/// Print every state, with its regions indented below it.
fn outline<A>(config: &MachineConfig<A>, depth: usize) {
    for name in config.state_names() {
        let marker = if config.initial_state() == Some(name) { "*" } else { " " };
        println!("  {}{marker} {name}", "    ".repeat(depth));

        let Some(state) = config.state(name) else {
            continue;
        };
        for region_name in state.region_names() {
            println!("  {}  [{region_name}]", "    ".repeat(depth + 1));
            if let Some(region) = state.region(region_name) {
                outline(region, depth + 2);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Statechart from a JSON Definition ===\n");

    println!("Validating a broken definition:");
    let broken: MachineConfig<()> = MachineConfig::from_json(BROKEN)?;
    match broken.validate() {
        Validation::Success(_) => println!("  unexpectedly valid"),
        Validation::Failure(violations) => {
            for violation in violations.iter() {
                println!("  - {violation}");
            }
        }
    }

    println!("\nDriving the door:");
    let mut config: MachineConfig<()> = MachineConfig::from_json(DOOR)?;
    outline(&config, 0);
    if let Some(ringing) = config
        .state_mut("open")
        .and_then(|open| open.region_mut("alarm"))
        .and_then(|alarm| alarm.state_mut("ringing"))
    {
        ringing.set_hooks(FnHooks::new().with_enter(|origin: Option<&Path>, _: &()| {
            println!("  ALARM (via {})", origin.map(ToString::to_string).unwrap_or_default());
        }));
    }

    let mut chart = Statechart::try_new(config)?;
    chart.initialize(&());

    for trigger in ["lock", "open", "unlock", "open", "alarm:timeout", "close"] {
        chart.trigger(trigger, &());
        let active: Vec<String> = chart.active_paths().iter().map(ToString::to_string).collect();
        println!("  {trigger:<14} -> {}", active.join(", "));
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
