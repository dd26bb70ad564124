//! Blackjack table systems.
//!
//! [`table_buttons`] lays out the clickable buttons for the current round
//! phase; the renderer draws the same list the input system hit-tests, so
//! what is shown is what can be clicked.
use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::{Rectangle, Vector2};

use crate::blackjack::dealing::TableLayout;
use crate::blackjack::round::RoundPhase;
use crate::events::table::{TableAction, TableActionEvent};
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::screensize::ScreenSize;
use crate::resources::table::BlackjackTable;
use crate::resources::worldtime::WorldTime;

#[derive(Debug, Clone, Copy)]
pub struct TableButton {
    pub action: TableAction,
    pub label: &'static str,
    pub rect: Rectangle,
    pub enabled: bool,
}

impl TableButton {
    fn new(action: TableAction, label: &'static str, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            action,
            label,
            rect: Rectangle::new(x, y, w, h),
            enabled: true,
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vector2) -> bool {
        let r = &self.rect;
        point.x >= r.x && point.x < r.x + r.width && point.y >= r.y && point.y < r.y + r.height
    }
}

/// Buttons shown in `phase` on a `width` x `height` screen.
pub fn table_buttons(
    phase: RoundPhase,
    bet: u32,
    bankroll: i64,
    width: f32,
    height: f32,
) -> ArrayVec<TableButton, 3> {
    let mut buttons = ArrayVec::new();
    match phase {
        RoundPhase::Betting => {
            buttons.push(TableButton::new(TableAction::BetDown, "-", 350.0, 120.0, 44.0, 36.0));
            buttons.push(TableButton::new(TableAction::BetUp, "+", 402.0, 120.0, 44.0, 36.0));
            let mut deal = TableButton::new(TableAction::Deal, "Deal", 456.0, 116.0, 120.0, 44.0);
            deal.enabled = bet > 0 && i64::from(bet) <= bankroll;
            buttons.push(deal);
        }
        RoundPhase::PlayerTurn => {
            let y = height - 120.0;
            buttons.push(TableButton::new(TableAction::Hit, "Hit", width - 250.0, y, 90.0, 44.0));
            buttons.push(TableButton::new(TableAction::Stand, "Stand", width - 150.0, y, 90.0, 44.0));
        }
        RoundPhase::Done => {
            let mut next = TableButton::new(
                TableAction::NextHand,
                "Next Hand",
                width - 190.0,
                height - 120.0,
                140.0,
                44.0,
            );
            next.enabled = bankroll > 0;
            buttons.push(next);
        }
        RoundPhase::Dealing | RoundPhase::DealerTurn | RoundPhase::Settling => {}
    }
    buttons
}

/// Action of the first enabled button under `point`.
pub fn button_at(buttons: &[TableButton], point: Vector2) -> Option<TableAction> {
    buttons
        .iter()
        .find(|b| b.enabled && b.contains(point))
        .map(|b| b.action)
}

/// Translate keys and clicks at the table into [`TableActionEvent`]s.
pub fn table_input_system(
    mut commands: Commands,
    input: Res<InputState>,
    table: Res<BlackjackTable>,
    screen: Res<ScreenSize>,
) {
    let keyed = [
        (input.bet_down.just_pressed, TableAction::BetDown),
        (input.bet_up.just_pressed, TableAction::BetUp),
        (input.action_1.just_pressed, TableAction::Deal),
        (input.hit.just_pressed, TableAction::Hit),
        (input.stand.just_pressed, TableAction::Stand),
        (input.next_hand.just_pressed, TableAction::NextHand),
    ];
    for (pressed, action) in keyed {
        if pressed {
            commands.trigger(TableActionEvent::new(action));
        }
    }

    if input.pointer.primary_pressed {
        let (w, h) = screen.as_f32();
        let buttons = table_buttons(table.phase(), table.bet(), table.bankroll(), w, h);
        if let Some(action) = button_at(&buttons, input.pointer.position) {
            commands.trigger(TableActionEvent::new(action));
        }
    }
}

/// Advance the round clock; a settlement that empties the bankroll ends the
/// session.
pub fn table_tick_system(
    time: Res<WorldTime>,
    screen: Res<ScreenSize>,
    mut table: ResMut<BlackjackTable>,
    mut next_state: ResMut<NextGameState>,
) {
    let (w, h) = screen.as_f32();
    let layout = TableLayout::for_screen(w, h);
    if *table.layout() != layout {
        table.set_layout(layout);
    }
    if table.tick(time.delta).is_some() && table.is_bankrupt() {
        info!("Went broke with bankroll ${}", table.bankroll());
        next_state.set(GameStates::GameOver);
    }
}
