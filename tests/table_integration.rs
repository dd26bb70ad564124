//! Blackjack table integration tests: actions arrive as events, the round is
//! advanced by the table systems, and bankruptcy requests the game over state.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use raylib::prelude::Vector2;

use neoncasino::blackjack::card::{Card, Rank, Suit};
use neoncasino::blackjack::round::{Round, RoundPhase, TableRules};
use neoncasino::blackjack::settlement::Outcome;
use neoncasino::blackjack::shoe::Shoe;
use neoncasino::events::table::{TableAction, TableActionEvent, table_action_observer};
use neoncasino::resources::gamestate::{GameStates, NextGameState, NextGameStates};
use neoncasino::resources::input::InputState;
use neoncasino::resources::screensize::ScreenSize;
use neoncasino::resources::table::BlackjackTable;
use neoncasino::resources::worldtime::WorldTime;
use neoncasino::systems::table::{table_input_system, table_tick_system};

const FRAME: f32 = 0.05;

fn fair_rules() -> TableRules {
    TableRules {
        rig_loss_rate: 0.0,
        ..TableRules::default()
    }
}

fn make_world(rules: TableRules, top: &[Rank]) -> World {
    let cards: Vec<Card> = top.iter().map(|&r| Card::new(r, Suit::Clubs)).collect();
    let shoe = Shoe::stacked(rules.num_decks, &cards, Rng::with_seed(3));
    let mut world = World::new();
    world.insert_resource(BlackjackTable(Round::with_shoe(rules, shoe, Rng::with_seed(4))));
    world.insert_resource(WorldTime::with_delta(FRAME));
    world.insert_resource(ScreenSize { w: 960, h: 540 });
    world.insert_resource(NextGameState::new());
    world.insert_resource(InputState::default());
    world.add_observer(table_action_observer);
    world.flush();
    world
}

fn act(world: &mut World, action: TableAction) {
    world.trigger(TableActionEvent::new(action));
    world.flush();
}

fn phase(world: &World) -> RoundPhase {
    world.resource::<BlackjackTable>().phase()
}

/// Run table frames until the round reaches `target`.
fn tick_until(world: &mut World, target: RoundPhase) -> usize {
    let mut schedule = Schedule::default();
    schedule.add_systems(table_tick_system);
    for frame in 0..200 {
        if phase(world) == target {
            return frame;
        }
        schedule.run(world);
    }
    panic!("table stuck in {:?}, wanted {:?}", phase(world), target);
}

#[test]
fn dealer_bust_pays_the_player() {
    // player 10 + 9, dealer 6 + 10, dealer draws a king
    let mut world = make_world(
        fair_rules(),
        &[
            Rank::Number(10),
            Rank::Number(6),
            Rank::Number(9),
            Rank::Number(10),
            Rank::King,
        ],
    );

    act(&mut world, TableAction::Deal);
    assert_eq!(phase(&world), RoundPhase::Dealing);
    let frames = tick_until(&mut world, RoundPhase::PlayerTurn);
    assert!(frames > 1, "the opening deal is animated");
    {
        let table = world.resource::<BlackjackTable>();
        assert_eq!(table.player().total(), 19);
        assert_eq!(table.dealer().total(), 16);
        assert!(!table.hole_revealed());
    }

    act(&mut world, TableAction::Stand);
    assert_eq!(phase(&world), RoundPhase::DealerTurn);
    assert!(!world.resource::<BlackjackTable>().hole_revealed());
    tick_until(&mut world, RoundPhase::Done);

    let table = world.resource::<BlackjackTable>();
    assert!(table.hole_revealed());
    assert_eq!(table.dealer().total(), 26);
    assert_eq!(table.bankroll(), 210);
    assert_eq!(
        table.last_settlement().map(|s| s.outcome),
        Some(Outcome::DealerBust)
    );
    assert_eq!(table.message(), "Dealer busts. You win!");
    assert_eq!(*world.resource::<NextGameState>().get(), NextGameStates::Unchanged);
}

#[test]
fn actions_out_of_turn_are_ignored() {
    let mut world = make_world(
        fair_rules(),
        &[Rank::Number(10), Rank::Number(6), Rank::Number(9), Rank::Number(10)],
    );
    act(&mut world, TableAction::Hit);
    act(&mut world, TableAction::Stand);
    act(&mut world, TableAction::NextHand);
    assert_eq!(phase(&world), RoundPhase::Betting);
    assert!(world.resource::<BlackjackTable>().player().is_empty());

    act(&mut world, TableAction::BetUp);
    act(&mut world, TableAction::BetUp);
    act(&mut world, TableAction::BetDown);
    assert_eq!(world.resource::<BlackjackTable>().bet(), 20);
}

#[test]
fn losing_the_last_chip_requests_game_over() {
    let rules = TableRules {
        starting_bankroll: 10,
        ..fair_rules()
    };
    // player 10 + 7, dealer 10 + 9
    let mut world = make_world(
        rules,
        &[Rank::Number(10), Rank::Number(10), Rank::Number(7), Rank::Number(9)],
    );

    act(&mut world, TableAction::Deal);
    tick_until(&mut world, RoundPhase::PlayerTurn);
    act(&mut world, TableAction::Stand);
    tick_until(&mut world, RoundPhase::Done);

    assert_eq!(world.resource::<BlackjackTable>().bankroll(), 0);
    assert_eq!(
        *world.resource::<NextGameState>().get(),
        NextGameStates::Pending(GameStates::GameOver)
    );
}

#[test]
fn clicking_deal_starts_the_hand() {
    let mut world = make_world(
        fair_rules(),
        &[Rank::Number(10), Rank::Number(6), Rank::Number(9), Rank::Number(10)],
    );
    {
        let mut input = world.resource_mut::<InputState>();
        input.pointer.position = Vector2::new(500.0, 150.0);
        input.pointer.primary_pressed = true;
    }
    let mut schedule = Schedule::default();
    schedule.add_systems(table_input_system);
    schedule.run(&mut world);
    world.flush();

    assert_eq!(phase(&world), RoundPhase::Dealing);
}

#[test]
fn hit_key_draws_during_player_turn() {
    let mut world = make_world(
        fair_rules(),
        &[
            Rank::Number(2),
            Rank::Number(10),
            Rank::Number(3),
            Rank::Number(8),
            Rank::Number(4),
        ],
    );
    act(&mut world, TableAction::Deal);
    tick_until(&mut world, RoundPhase::PlayerTurn);

    world.resource_mut::<InputState>().hit.just_pressed = true;
    let mut schedule = Schedule::default();
    schedule.add_systems(table_input_system);
    schedule.run(&mut world);
    world.flush();

    let table = world.resource::<BlackjackTable>();
    assert_eq!(table.player().len(), 3);
    assert_eq!(table.player().total(), 9);
    assert_eq!(table.phase(), RoundPhase::PlayerTurn);
}
