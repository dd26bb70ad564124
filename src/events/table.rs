//! Blackjack table actions.
//!
//! Keyboard and mouse input at the table is translated into
//! [`TableActionEvent`]s; [`table_action_observer`] applies them to the
//! [`BlackjackTable`]. Rejected actions leave the round untouched and are
//! only logged, except an invalid bet, which the round reports on its own
//! status line.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::blackjack::round::RoundError;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::table::BlackjackTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableAction {
    BetDown,
    BetUp,
    Deal,
    Hit,
    Stand,
    NextHand,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct TableActionEvent {
    pub action: TableAction,
}

impl TableActionEvent {
    pub fn new(action: TableAction) -> Self {
        Self { action }
    }
}

/// Apply a table action to the current round.
///
/// A bankrupt player asking for another hand ends the session.
pub fn table_action_observer(
    trigger: On<TableActionEvent>,
    table: Option<ResMut<BlackjackTable>>,
    mut next_state: ResMut<NextGameState>,
) {
    let Some(mut table) = table else {
        warn!("TableActionEvent without a BlackjackTable resource");
        return;
    };
    let action = trigger.event().action;
    let result = match action {
        TableAction::BetDown => table.adjust_bet(-1).map(|_| ()),
        TableAction::BetUp => table.adjust_bet(1).map(|_| ()),
        TableAction::Deal => table.place_bet(),
        TableAction::Hit => table.hit(),
        TableAction::Stand => table.stand(),
        TableAction::NextHand => table.next_hand(),
    };
    match result {
        Ok(()) => debug!("{:?} -> {:?}", action, table.phase()),
        Err(RoundError::Bankrupt) => {
            info!("Bankroll exhausted, game over");
            next_state.set(GameStates::GameOver);
        }
        Err(e) => debug!("{:?} rejected: {}", action, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blackjack::round::{Round, RoundPhase, TableRules};
    use crate::resources::gamestate::NextGameStates;

    fn world_with_table() -> World {
        let mut world = World::new();
        world.insert_resource(BlackjackTable(Round::with_seed(TableRules::default(), 3)));
        world.insert_resource(NextGameState::new());
        world.add_observer(table_action_observer);
        world.flush();
        world
    }

    fn send(world: &mut World, action: TableAction) {
        world.trigger(TableActionEvent::new(action));
        world.flush();
    }

    #[test]
    fn test_bet_buttons_step_the_bet() {
        let mut world = world_with_table();
        send(&mut world, TableAction::BetUp);
        send(&mut world, TableAction::BetUp);
        assert_eq!(world.resource::<BlackjackTable>().bet(), 30);
        send(&mut world, TableAction::BetDown);
        assert_eq!(world.resource::<BlackjackTable>().bet(), 20);
    }

    #[test]
    fn test_deal_starts_dealing_and_wrong_phase_is_ignored() {
        let mut world = world_with_table();
        send(&mut world, TableAction::Deal);
        assert_eq!(world.resource::<BlackjackTable>().phase(), RoundPhase::Dealing);
        send(&mut world, TableAction::Hit);
        send(&mut world, TableAction::BetUp);
        let table = world.resource::<BlackjackTable>();
        assert_eq!(table.phase(), RoundPhase::Dealing);
        assert_eq!(table.bet(), 10);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Unchanged
        );
    }
}
