//! End-to-end scenarios driving whole charts through the public API.

use statechart::builder::{StateBuilder, StateMachineBuilder, TransitionBuilder};
use statechart::config::MachineConfig;
use statechart::core::{FnHooks, Path};
use statechart::{ChartError, Statechart};
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// A state that records its enter and exit hooks into `log`.
fn recorded(name: &'static str, log: &Log) -> StateBuilder<i32> {
    let enter = Arc::clone(log);
    let exit = Arc::clone(log);
    StateBuilder::new()
        .on_enter(move |origin: Option<&Path>, args: &i32| {
            let origin = origin.map(ToString::to_string).unwrap_or_default();
            enter
                .lock()
                .unwrap()
                .push(format!("enter {name} [{origin}] {args}"));
        })
        .on_exit(move |args: &i32| {
            exit.lock().unwrap().push(format!("exit {name} {args}"));
            None
        })
}

fn active(chart: &Statechart<i32>) -> Vec<String> {
    chart.active_paths().iter().map(ToString::to_string).collect()
}

fn idle_running() -> MachineConfig<i32> {
    StateMachineBuilder::new()
        .initial("idle")
        .state(
            "idle",
            StateBuilder::new()
                .transition(TransitionBuilder::on("go").to("running"))
                .unwrap(),
        )
        .unwrap()
        .state(
            "running",
            StateBuilder::new()
                .transition(TransitionBuilder::on("back").to("idle"))
                .unwrap(),
        )
        .unwrap()
        .build()
}

/// `idle -go-> busy`, `busy` owns `sub` (`a -advance-> b`, `a -leave-> idle`).
fn busy_with_sub(log: &Log) -> MachineConfig<i32> {
    let sub = StateMachineBuilder::new()
        .initial("a")
        .state(
            "a",
            recorded("a", log)
                .transition(TransitionBuilder::on("advance").to("b"))
                .unwrap()
                .transition(TransitionBuilder::on("leave").to("idle"))
                .unwrap(),
        )
        .unwrap()
        .state(
            "b",
            recorded("b", log)
                .transition(TransitionBuilder::on("leave").to("idle"))
                .unwrap(),
        )
        .unwrap()
        .build();

    StateMachineBuilder::new()
        .initial("busy")
        .state(
            "idle",
            recorded("idle", log)
                .transition(TransitionBuilder::on("go").to("busy"))
                .unwrap(),
        )
        .unwrap()
        .state("busy", recorded("busy", log).region("sub", sub).unwrap())
        .unwrap()
        .build()
}

/// `panel` owns two on/off regions, `left` and `right`.
fn panel(all_targets: Vec<&'static str>, fired: &Arc<Mutex<u32>>) -> MachineConfig<i32> {
    let switch = || {
        StateMachineBuilder::new()
            .initial("off")
            .state("off", StateBuilder::new())
            .unwrap()
            .state("on", StateBuilder::new())
            .unwrap()
            .build()
    };
    let counter = Arc::clone(fired);

    StateMachineBuilder::new()
        .initial("panel")
        .state(
            "panel",
            StateBuilder::new()
                .region("left", switch())
                .unwrap()
                .region("right", switch())
                .unwrap()
                .transition(TransitionBuilder::on("all").to(all_targets).action(
                    move |_: &i32| {
                        *counter.lock().unwrap() += 1;
                    },
                ))
                .unwrap(),
        )
        .unwrap()
        .build()
}

#[test]
fn idle_to_running_end_to_end() {
    let mut chart = Statechart::new(idle_running());
    chart.initialize(&0);

    assert!(chart.is_in_state("idle"));
    assert!(chart.can_trigger("go", &0));

    chart.trigger("go", &0);
    assert!(chart.is_in_state("running"));
    assert!(!chart.is_in_state("idle"));
    assert!(!chart.can_trigger("go", &0));

    chart.trigger("back", &0);
    assert_eq!(chart.current_state(), Some("idle"));
}

#[test]
fn guard_blocks_and_then_allows() {
    let config = StateMachineBuilder::new()
        .initial("idle")
        .state(
            "idle",
            StateBuilder::new()
                .transition(TransitionBuilder::on("go").to("running").when(|a: &i32| *a > 0))
                .unwrap(),
        )
        .unwrap()
        .state("running", StateBuilder::new())
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);

    assert!(!chart.can_trigger("go", &-1));
    chart.trigger("go", &-1);
    assert!(chart.is_in_state("idle"));

    assert!(chart.can_trigger("go", &1));
    chart.trigger("go", &1);
    assert!(chart.is_in_state("running"));
}

#[test]
fn initialize_cascades_through_every_level() {
    let innermost = StateMachineBuilder::new()
        .initial("z")
        .state("z", StateBuilder::new())
        .unwrap()
        .build();
    let middle = StateMachineBuilder::new()
        .initial("y")
        .state("y", StateBuilder::new().region("inner", innermost).unwrap())
        .unwrap()
        .build();
    let config = StateMachineBuilder::new()
        .initial("x")
        .state("x", StateBuilder::new().region("middle", middle).unwrap())
        .unwrap()
        .build();

    let chart = Statechart::start(config, &0);

    assert_eq!(active(&chart), vec!["x", "x:middle:y", "x:middle:y:inner:z"]);
    assert!(chart.is_active("x:middle:y:inner:z"));
}

#[test]
fn enter_hooks_run_parent_first_on_bootstrap() {
    let log = new_log();
    let _chart = Statechart::start(busy_with_sub(&log), &5);

    assert_eq!(entries(&log), vec!["enter busy [] 5", "enter a [] 5"]);
}

#[test]
fn region_trigger_moves_only_the_region() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);
    log.lock().unwrap().clear();

    assert!(chart.can_trigger("sub:advance", &1));
    chart.trigger("sub:advance", &1);

    assert!(chart.is_in_state("busy"));
    assert!(chart.is_active("busy:sub:b"));
    assert_eq!(entries(&log), vec!["exit a 1", "enter b [sub:advance] 1"]);
}

#[test]
fn region_triggers_need_the_region_prefix() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);

    assert!(!chart.can_trigger("advance", &0));
    assert!(!chart.can_trigger("other:advance", &0));
    chart.trigger("advance", &0);
    chart.trigger("other:advance", &0);

    assert!(chart.is_active("busy:sub:a"));
}

#[test]
fn region_target_bubbles_to_ancestor() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);
    log.lock().unwrap().clear();

    chart.trigger("sub:leave", &2);

    assert!(chart.is_in_state("idle"));
    assert!(!chart.is_active("busy:sub"));
    assert_eq!(
        entries(&log),
        vec!["exit a 2", "exit busy 2", "enter idle [sub:leave] 2"]
    );
}

#[test]
fn reentering_composite_state_restarts_regions() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);

    chart.trigger("sub:advance", &0);
    chart.trigger("sub:leave", &0);
    chart.trigger("go", &0);

    assert!(chart.is_active("busy:sub:a"));
}

#[test]
fn deep_target_activates_region_state_in_one_trigger() {
    let log = new_log();
    let region_a = StateMachineBuilder::new()
        .initial("idle")
        .state("idle", recorded("idle", &log))
        .unwrap()
        .state("running", recorded("running", &log))
        .unwrap()
        .build();
    let config = StateMachineBuilder::new()
        .initial("off")
        .state(
            "off",
            recorded("off", &log)
                .transition(TransitionBuilder::on("start").to("on:regionA:running"))
                .unwrap(),
        )
        .unwrap()
        .state(
            "on",
            recorded("on", &log)
                .region("regionA", region_a)
                .unwrap()
                .transition(TransitionBuilder::on("reset").to("regionA:idle"))
                .unwrap(),
        )
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);
    log.lock().unwrap().clear();

    chart.trigger("start", &0);

    assert!(chart.is_active("on:regionA:running"));
    assert_eq!(
        entries(&log),
        vec![
            "exit off 0",
            "enter on [start] 0",
            "enter idle [] 0",
            "exit idle 0",
            "enter running [start] 0",
        ]
    );

    log.lock().unwrap().clear();
    chart.trigger("reset", &0);
    assert!(chart.is_in_state("on"));
    assert!(chart.is_active("on:regionA:idle"));
    assert_eq!(
        entries(&log),
        vec!["exit on 0", "exit running 0", "enter idle [reset] 0"]
    );
}

#[test]
fn taken_transition_exits_even_without_a_move() {
    let log = new_log();
    let config = StateMachineBuilder::new()
        .initial("idle")
        .state(
            "idle",
            recorded("idle", &log)
                .transition(TransitionBuilder::on("tick"))
                .unwrap()
                .transition(TransitionBuilder::on("lost").to("nowhere"))
                .unwrap()
                .transition(TransitionBuilder::on("blocked").to("idle").when(|n: &i32| *n > 0))
                .unwrap(),
        )
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);
    log.lock().unwrap().clear();

    chart.trigger("tick", &1);
    chart.trigger("lost", &2);
    chart.trigger("blocked", &0);

    assert!(chart.is_in_state("idle"));
    assert_eq!(entries(&log), vec!["exit idle 1", "exit idle 2"]);
    assert_eq!(chart.history().len(), 1);
}

#[test]
fn exit_result_feeds_next_enter() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = StateMachineBuilder::new()
        .initial("idle")
        .state(
            "idle",
            StateBuilder::new()
                .on_exit(|a: &i32| Some(a + 10))
                .transition(TransitionBuilder::on("go").to("running"))
                .unwrap(),
        )
        .unwrap()
        .state(
            "running",
            StateBuilder::new()
                .on_exit(|_: &i32| None)
                .on_enter(move |_: Option<&Path>, a: &i32| sink.lock().unwrap().push(*a))
                .transition(TransitionBuilder::on("back").to("idle"))
                .unwrap(),
        )
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);

    chart.trigger("go", &1);
    chart.trigger("back", &1);
    chart.trigger("go", &2);

    assert_eq!(*seen.lock().unwrap(), vec![11, 12]);
}

#[test]
fn false_can_trigger_means_nothing_moves() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);
    let before = active(&chart);
    log.lock().unwrap().clear();

    for trigger in ["go", "sub:go", "nowhere:advance", "sub:advance:extra", ""] {
        assert!(!chart.can_trigger(trigger, &0), "{trigger}");
        chart.trigger(trigger, &0);
    }

    assert_eq!(active(&chart), before);
    assert!(entries(&log).is_empty());
}

#[test]
fn fan_out_routes_each_target_independently() {
    let fired = Arc::new(Mutex::new(0));
    let mut chart = Statechart::start(panel(vec!["left:on", "right:on"], &fired), &0);
    assert_eq!(active(&chart), vec!["panel", "panel:left:off", "panel:right:off"]);

    chart.trigger("all", &0);

    assert_eq!(active(&chart), vec!["panel", "panel:left:on", "panel:right:on"]);
    assert_eq!(*fired.lock().unwrap(), 1);
}

#[test]
fn fan_out_stops_once_the_firing_state_is_left() {
    let log = new_log();
    let left = StateMachineBuilder::new()
        .initial("off")
        .state("off", recorded("off", &log))
        .unwrap()
        .state("on", recorded("on", &log))
        .unwrap()
        .build();
    let config = StateMachineBuilder::new()
        .initial("panel")
        .state("idle", recorded("idle", &log))
        .unwrap()
        .state(
            "panel",
            recorded("panel", &log)
                .region("left", left)
                .unwrap()
                .transition(TransitionBuilder::on("all").to(vec!["idle", "left:on"]))
                .unwrap(),
        )
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);
    log.lock().unwrap().clear();

    chart.trigger("all", &0);

    assert_eq!(active(&chart), vec!["idle"]);
    assert_eq!(entries(&log), vec!["exit panel 0", "enter idle [all] 0"]);
    assert_eq!(chart.history().get_path(&Path::parse("panel:left")), vec!["off"]);
}

#[test]
fn fan_out_keeps_partial_success() {
    let fired = Arc::new(Mutex::new(0));
    let mut chart = Statechart::start(panel(vec!["left:on", "nowhere", "right:on"], &fired), &0);

    chart.trigger("all", &0);

    assert!(chart.is_active("panel:left:on"));
    assert!(chart.is_active("panel:right:on"));
    assert!(chart.is_in_state("panel"));
    assert_eq!(*fired.lock().unwrap(), 1);
}

#[test]
fn unresolvable_target_still_runs_action() {
    let fired = Arc::new(Mutex::new(0));
    let mut chart = Statechart::start(panel(vec!["nowhere"], &fired), &0);
    let before = active(&chart);

    chart.trigger("all", &0);

    assert_eq!(*fired.lock().unwrap(), 1);
    assert_eq!(active(&chart), before);
}

#[test]
fn first_enabled_transition_wins() {
    let config = StateMachineBuilder::new()
        .initial("idle")
        .state(
            "idle",
            StateBuilder::new()
                .transition(TransitionBuilder::on("go").to("fast").when(|a: &i32| *a > 10))
                .unwrap()
                .transition(TransitionBuilder::on("go").to("slow"))
                .unwrap()
                .transition(TransitionBuilder::on("go").to("never"))
                .unwrap(),
        )
        .unwrap()
        .state("fast", StateBuilder::new())
        .unwrap()
        .state("slow", StateBuilder::new())
        .unwrap()
        .state("never", StateBuilder::new())
        .unwrap()
        .build();

    let mut chart = Statechart::start(config, &0);
    chart.trigger("go", &1);
    assert!(chart.is_in_state("slow"));
}

#[test]
fn dynamic_target_is_resolved_from_arguments() {
    let config = StateMachineBuilder::new()
        .initial("idle")
        .state(
            "idle",
            StateBuilder::new()
                .transition(
                    TransitionBuilder::on("go")
                        .to_fn(|a: &i32| if *a > 10 { "fast" } else { "slow" }),
                )
                .unwrap(),
        )
        .unwrap()
        .state(
            "fast",
            StateBuilder::new()
                .transition(TransitionBuilder::on("back").to("idle"))
                .unwrap(),
        )
        .unwrap()
        .state("slow", StateBuilder::new())
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);

    chart.trigger("go", &11);
    assert!(chart.is_in_state("fast"));

    chart.trigger("back", &0);
    chart.trigger("go", &3);
    assert!(chart.is_in_state("slow"));
}

#[test]
fn self_transition_exits_and_reenters() {
    let log = new_log();
    let config = StateMachineBuilder::new()
        .initial("idle")
        .state(
            "idle",
            recorded("idle", &log)
                .transition(TransitionBuilder::on("again").to("idle"))
                .unwrap(),
        )
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);

    chart.trigger("again", &4);

    assert_eq!(
        entries(&log),
        vec!["enter idle [] 0", "exit idle 4", "enter idle [again] 4"]
    );
}

#[test]
fn added_region_activates_on_next_entry() {
    let mut chart = Statechart::start(idle_running(), &0);
    let extra = StateMachineBuilder::new()
        .initial("x")
        .state("x", StateBuilder::new())
        .unwrap()
        .build();

    chart.add_region("idle", "extra", extra).unwrap();
    assert!(!chart.is_active("idle:extra"));

    chart.trigger("go", &0);
    chart.trigger("back", &0);
    assert!(chart.is_active("idle:extra:x"));
}

#[test]
fn region_can_be_added_below_a_region() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);
    let deep = StateMachineBuilder::new()
        .initial("d")
        .state("d", StateBuilder::new())
        .unwrap()
        .build();

    chart.add_region("busy:sub:b", "deep", deep).unwrap();
    chart.trigger("sub:advance", &0);

    assert!(chart.is_active("busy:sub:b:deep:d"));
}

#[test]
fn add_region_errors_name_the_failing_segment() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);

    let err = chart
        .add_region("busy:nope:a", "deep", MachineConfig::new())
        .unwrap_err();
    assert!(matches!(err, ChartError::UnknownTarget { ref segment, .. } if segment == "nope"));
    assert_eq!(
        err.to_string(),
        "Target 'busy:nope:a' does not resolve: nothing named 'nope'"
    );

    let err = chart
        .add_region("busy", "sub", MachineConfig::new())
        .unwrap_err();
    assert!(matches!(err, ChartError::RegionExists { ref state, ref region } if state == "busy" && region == "sub"));
}

#[test]
fn missing_initial_state_leaves_machine_inactive() {
    let config: MachineConfig<i32> = StateMachineBuilder::new()
        .state(
            "idle",
            StateBuilder::new()
                .transition(TransitionBuilder::on("go").to("idle"))
                .unwrap(),
        )
        .unwrap()
        .build();
    let mut chart = Statechart::start(config, &0);

    assert!(!chart.is_initialized());
    assert!(!chart.can_trigger("go", &0));
    chart.trigger("go", &0);
    assert!(chart.active_paths().is_empty());
    assert!(chart.history().is_empty());
}

#[test]
fn history_tracks_each_machine() {
    let log = new_log();
    let mut chart = Statechart::start(busy_with_sub(&log), &0);

    chart.trigger("sub:advance", &0);
    chart.trigger("sub:leave", &0);
    chart.trigger("go", &0);

    let history = chart.history();
    assert_eq!(history.get_path(&Path::root()), vec!["busy", "idle", "busy"]);
    assert_eq!(
        history.get_path(&Path::parse("busy:sub")),
        vec!["a", "b", "a"]
    );
    assert!(history.transitions()[0].is_bootstrap());
    assert_eq!(
        history.transitions()[2].trigger,
        Some(Path::parse("sub:advance"))
    );
    assert!(history.duration().is_some());

    chart.clear_history();
    assert!(chart.history().is_empty());
}

#[test]
fn json_definition_drives_a_chart() {
    let json = r#"{
        "initialState": "stopped",
        "stopped": {
            "transitions": [{ "trigger": "play", "target": "playing" }]
        },
        "playing": {
            "transitions": [{ "trigger": "stop", "target": "stopped" }],
            "regions": {
                "volume": {
                    "initialState": "normal",
                    "normal": { "transitions": [{ "trigger": "mute", "target": "muted" }] },
                    "muted": { "transitions": [{ "trigger": "mute", "target": "normal" }] }
                }
            }
        }
    }"#;

    let log = new_log();
    let sink = Arc::clone(&log);
    let mut config: MachineConfig<i32> = MachineConfig::from_json(json).unwrap();
    config
        .state_mut("playing")
        .and_then(|playing| playing.region_mut("volume"))
        .and_then(|volume| volume.state_mut("muted"))
        .unwrap()
        .set_hooks(FnHooks::new().with_enter(move |origin: Option<&Path>, _: &i32| {
            let origin = origin.map(ToString::to_string).unwrap_or_default();
            sink.lock().unwrap().push(format!("muted by {origin}"));
        }));

    let mut chart = Statechart::try_new(config).unwrap();
    chart.initialize(&0);
    chart.trigger("play", &0);
    chart.trigger("volume:mute", &0);

    assert!(chart.is_active("playing:volume:muted"));
    assert_eq!(entries(&log), vec!["muted by volume:mute"]);

    chart.trigger("stop", &0);
    assert!(chart.is_in_state("stopped"));
}

#[test]
fn malformed_json_is_a_definition_error() {
    let result = MachineConfig::<i32>::from_json("{ not json");

    assert!(matches!(result, Err(ChartError::Definition(_))));
}
