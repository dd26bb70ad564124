//! Neon Casino main entry point.
//!
//! A small 2D casino game written in Rust using:
//! - **raylib** for windowing, drawing and input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! Walk down the street, enter the casino through the neon door and sit at
//! a blackjack table.
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, apply command line overrides, open the window
//! 2. Insert resources, register observers and state hooks
//! 3. Enter Setup, which loads the maps and spawns the street
//! 4. Each frame: poll input, apply pending state changes, run the systems
//!    of the current state, draw
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use neoncasino::components::persistent::Persistent;
use neoncasino::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use neoncasino::events::scene::switch_scene_observer;
use neoncasino::events::switchdebug::switch_debug_observer;
use neoncasino::events::table::table_action_observer;
use neoncasino::game;
use neoncasino::resources::debugmode::DebugMode;
use neoncasino::resources::gameconfig::GameConfig;
use neoncasino::resources::gamerng::GameRng;
use neoncasino::resources::gamestate::{GameState, GameStates, NextGameState};
use neoncasino::resources::input::InputState;
use neoncasino::resources::screensize::ScreenSize;
use neoncasino::resources::systemsstore::SystemsStore;
use neoncasino::resources::worldtime::WorldTime;
use neoncasino::systems::camera::camera_follow_system;
use neoncasino::systems::gamestate::{
    check_pending_state, game_flow_keys, state_is_at_table, state_is_exploring,
};
use neoncasino::systems::input::update_input_state;
use neoncasino::systems::inputsimplecontroller::input_simple_controller;
use neoncasino::systems::interaction::{exploring_interaction_system, hud_message_tick};
use neoncasino::systems::movement::movement;
use neoncasino::systems::npc::npc_wander_system;
use neoncasino::systems::render::render_system;
use neoncasino::systems::table::{table_input_system, table_tick_system};
use neoncasino::systems::time::update_world_time;

/// Neon Casino
#[derive(Parser)]
#[command(version, about = "Walk into the neon casino and try your luck at blackjack.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the shoe, the house and the patrons.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Settle every hand by the plain rules, without the house override.
    #[arg(long)]
    fair: bool,

    /// Start with the debug overlay on.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Configuration ---------------
    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if cli.fair {
        config.set_fair();
    }
    if let Some(seed) = cli.seed {
        log::info!("Using seed {}", seed);
    }

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Neon Casino");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Escape pauses instead of closing the window
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(config);
    world.insert_resource(GameRng::new(cli.seed));
    world.insert_resource(InputState::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    if cli.debug {
        world.insert_resource(DebugMode {});
    }
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.spawn((Observer::new(switch_scene_observer), Persistent));
    world.spawn((Observer::new(table_action_observer), Persistent));
    world.spawn((Observer::new(switch_debug_observer), Persistent));

    // State hooks. Registered systems are entities in bevy_ecs 0.18, so the
    // store marks them Persistent.
    let mut systems_store = SystemsStore::new();
    systems_store.register(&mut world, "setup", game::setup);
    systems_store.register(&mut world, "enter_table", game::enter_table);
    systems_store.register(&mut world, "exit_table", game::exit_table);
    systems_store.register(&mut world, "enter_game_over", game::enter_game_over);
    systems_store.register(&mut world, "restart_game", game::restart_game);
    systems_store.register(&mut world, "quit_game", game::quit_game);
    world.insert_resource(systems_store);

    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {}); // enter Setup immediately
    world.flush();

    let mut update = Schedule::default();
    update.add_systems((update_input_state, check_pending_state).chain());
    update.add_systems(game_flow_keys.after(check_pending_state));
    update.add_systems(hud_message_tick);
    update.add_systems(
        (
            input_simple_controller,
            movement,
            npc_wander_system,
            exploring_interaction_system,
            camera_follow_system,
        )
            .chain()
            .run_if(state_is_exploring)
            .after(check_pending_state),
    );
    update.add_systems(
        (table_input_system, table_tick_system)
            .chain()
            .run_if(state_is_at_table)
            .after(check_pending_state),
    );
    update.add_systems(
        render_system
            .after(camera_follow_system)
            .after(table_tick_system)
            .after(game_flow_keys),
    );

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.resource::<GameState>().is(GameStates::Quitting)
    {
        let (dt, w, h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_frame_time(), rl.get_screen_width(), rl.get_screen_height())
        };
        update_world_time(&mut world, dt);
        {
            let mut screen = world.resource_mut::<ScreenSize>();
            screen.w = w;
            screen.h = h;
        }

        update.run(&mut world);

        world.clear_trackers();
    }
    log::info!("Bye!");
}
