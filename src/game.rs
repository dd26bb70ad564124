//! State hooks.
//!
//! One-shot systems registered in
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and run by
//! the game state observer on enter/exit (see
//! [`crate::events::gamestate`]).

use bevy_ecs::prelude::*;
use log::info;

use crate::blackjack::dealing::TableLayout;
use crate::blackjack::round::Round;
use crate::events::scene::SwitchSceneEvent;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamerng::GameRng;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::hudmessage::HudMessage;
use crate::resources::scene::{CurrentScene, SceneId};
use crate::resources::screensize::ScreenSize;
use crate::resources::table::BlackjackTable;
use crate::resources::tilemapstore::TilemapStore;

/// Load the maps, open the table session and put the player on the street.
pub fn setup(
    mut commands: Commands,
    mut next_state: ResMut<NextGameState>,
    config: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    screen: Res<ScreenSize>,
) {
    let (w, h) = screen.as_f32();
    commands.insert_resource(Camera2DRes::centered(w, h));
    commands.insert_resource(TilemapStore::load_dir(&config.maps_dir));

    let mut round = Round::new(config.rules, rng.0.fork());
    round.set_layout(TableLayout::for_screen(w, h));
    info!(
        "Table open: bankroll ${}, bets ${}-${}, {} decks, house override {:.0}%",
        round.bankroll(),
        config.rules.min_bet,
        config.rules.max_bet,
        config.rules.num_decks,
        config.rules.rig_loss_rate * 100.0
    );
    commands.insert_resource(BlackjackTable(round));
    commands.insert_resource(HudMessage::default());
    commands.insert_resource(CurrentScene::new(SceneId::Street));
    commands.trigger(SwitchSceneEvent::new(SceneId::Street));

    next_state.set(GameStates::Exploring);
}

/// Sit down: a fresh felt waiting for a bet, laid out for the current screen.
pub fn enter_table(
    mut table: ResMut<BlackjackTable>,
    screen: Res<ScreenSize>,
    mut hud: ResMut<HudMessage>,
) {
    let (w, h) = screen.as_f32();
    table.set_layout(TableLayout::for_screen(w, h));
    table.open_table();
    hud.clear();
    info!("Seated with bankroll ${}", table.bankroll());
}

/// Stand up, abandoning any hand in progress.
pub fn exit_table(mut table: ResMut<BlackjackTable>) {
    table.abort();
}

pub fn enter_game_over(table: Res<BlackjackTable>, mut hud: ResMut<HudMessage>) {
    hud.clear();
    info!("Game over with bankroll ${}", table.bankroll());
}

/// Leaving the game-over screen starts over: fresh bankroll, back on the
/// street at its spawn point.
pub fn restart_game(
    mut commands: Commands,
    mut table: ResMut<BlackjackTable>,
    mut current: ResMut<CurrentScene>,
) {
    table.reset_bankroll();
    current.left_at.clear();
    commands.trigger(SwitchSceneEvent::new(SceneId::Street));
    info!("Restarted with bankroll ${}", table.bankroll());
}

pub fn quit_game() {
    info!("Quitting");
}
