//! Drawing.
//!
//! Everything is drawn from ECS state with raylib primitives: the world
//! through the shared camera, then screen-space HUD and overlays. The table
//! screen replaces the world while seated.
use std::ffi::CString;

use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;

use crate::blackjack::card::Card;
use crate::blackjack::dealing::{CARD_HEIGHT, CARD_WIDTH, Recipient};
use crate::blackjack::round::{Round, RoundPhase};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::npc::{Npc, TALK_RANGE};
use crate::components::player::Player;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::hudmessage::HudMessage;
use crate::resources::scene::CurrentScene;
use crate::resources::screensize::ScreenSize;
use crate::resources::table::BlackjackTable;
use crate::resources::tilemap::{TileGrid, TileKind};
use crate::systems::table::table_buttons;

const BG_COLOR: Color = Color::new(18, 18, 22, 255);
const TABLE_COLOR: Color = Color::new(7, 105, 57, 255);
const TABLE_EDGE: Color = Color::new(14, 70, 50, 255);
const GOLD: Color = Color::new(240, 200, 60, 255);
const TEXT: Color = Color::new(245, 245, 245, 255);
const RED: Color = Color::new(220, 60, 60, 255);
const ACCENT: Color = Color::new(160, 90, 255, 255);
const PLAYER_COLOR: Color = Color::new(60, 170, 255, 255);
const CARD_BACK: Color = Color::new(30, 60, 130, 255);
const CARD_BACK_EMBLEM: Color = Color::new(200, 220, 255, 255);

fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Grass => Color::new(34, 72, 44, 255),
        TileKind::Road | TileKind::Exit => Color::new(60, 60, 60, 255),
        TileKind::Wall => Color::new(24, 28, 34, 255),
        TileKind::Door => Color::new(120, 40, 140, 255),
        TileKind::Floor | TileKind::Plant => Color::new(40, 48, 58, 255),
        TileKind::Carpet => Color::new(90, 20, 40, 255),
        TileKind::BlackjackTable => TABLE_COLOR,
        TileKind::CardTable => Color::new(7, 80, 45, 255),
        TileKind::SlotMachine => Color::new(200, 160, 40, 255),
    }
}

/// Pixel width of `text` in the default font.
fn text_width(text: &str, size: i32) -> i32 {
    match CString::new(text) {
        Ok(c_text) => unsafe { ffi::MeasureText(c_text.as_ptr(), size) },
        Err(_) => 0,
    }
}

fn draw_text_centered(d: &mut impl RaylibDraw, text: &str, cx: i32, cy: i32, size: i32, color: Color) {
    let w = text_width(text, size);
    d.draw_text(text, cx - w / 2, cy - size / 2, size, color);
}

fn draw_card(d: &mut impl RaylibDraw, pos: Vector2, card: Option<Card>) {
    let rect = Rectangle::new(pos.x, pos.y, CARD_WIDTH, CARD_HEIGHT);
    match card {
        Some(card) => {
            d.draw_rectangle_rec(rect, TEXT);
            d.draw_rectangle_lines_ex(rect, 2.0, Color::BLACK);
            let color = if card.suit.is_red() { RED } else { Color::BLACK };
            let label = format!("{}{}", card.rank.label(), card.suit.letter());
            d.draw_text(&label, pos.x as i32 + 8, pos.y as i32 + 6, 20, color);
            draw_text_centered(
                d,
                &card.suit.letter().to_string(),
                (pos.x + CARD_WIDTH / 2.0) as i32,
                (pos.y + CARD_HEIGHT / 2.0) as i32,
                40,
                color,
            );
        }
        None => {
            d.draw_rectangle_rec(rect, CARD_BACK);
            d.draw_rectangle_lines_ex(rect, 3.0, TEXT);
            d.draw_circle(
                (pos.x + CARD_WIDTH / 2.0) as i32,
                (pos.y + CARD_HEIGHT / 2.0) as i32,
                18.0,
                CARD_BACK_EMBLEM,
            );
        }
    }
}

fn draw_button(d: &mut impl RaylibDraw, rect: Rectangle, label: &str, enabled: bool) {
    let fill = if enabled {
        Color::new(40, 120, 200, 255)
    } else {
        Color::new(80, 80, 80, 255)
    };
    d.draw_rectangle_rec(rect, fill);
    d.draw_rectangle_lines_ex(rect, 2.0, Color::WHITE);
    draw_text_centered(
        d,
        label,
        (rect.x + rect.width / 2.0) as i32,
        (rect.y + rect.height / 2.0) as i32,
        20,
        TEXT,
    );
}

fn draw_table_screen(d: &mut impl RaylibDraw, round: &Round, w: i32, h: i32) {
    d.clear_background(TABLE_EDGE);
    let felt = Rectangle::new(40.0, 40.0, (w - 80) as f32, (h - 80) as f32);
    d.draw_rectangle_rec(felt, TABLE_COLOR);
    d.draw_rectangle_lines_ex(felt, 4.0, GOLD);
    draw_text_centered(d, "Blackjack", w / 2, 70, 30, TEXT);

    let layout = round.layout();
    let dealer_y = layout.dealer_row_y as i32;
    let player_y = layout.player_row_y as i32;

    d.draw_text("Dealer", 60, dealer_y, 20, TEXT);
    let dealer_total = if round.hole_revealed() {
        round.dealer().total().to_string()
    } else {
        "?".to_string()
    };
    if !round.dealer().is_empty() {
        d.draw_text(&dealer_total, 60, dealer_y + 28, 20, GOLD);
    }
    for (i, card) in round.dealer().cards().iter().enumerate() {
        let hidden = i == 0 && !round.hole_revealed();
        draw_card(d, layout.slot(Recipient::Dealer, i), (!hidden).then_some(*card));
    }

    d.draw_text("You", 60, player_y, 20, TEXT);
    if !round.player().is_empty() {
        let total = round.player().total();
        let soft = if round.player().is_soft() { " soft" } else { "" };
        d.draw_text(&format!("{}{}", total, soft), 60, player_y + 28, 20, GOLD);
    }
    for (i, card) in round.player().cards().iter().enumerate() {
        draw_card(d, layout.slot(Recipient::Player, i), Some(*card));
    }

    for (_, pos) in round.sequencer().in_flight() {
        draw_card(d, pos, None);
    }

    d.draw_text(&format!("Bankroll: ${}", round.bankroll()), 60, h - 110, 20, TEXT);
    d.draw_text(&format!("Bet: ${}", round.bet()), 60, h - 84, 20, TEXT);

    for button in table_buttons(round.phase(), round.bet(), round.bankroll(), w as f32, h as f32) {
        draw_button(d, button.rect, button.label, button.enabled);
    }

    match round.phase() {
        RoundPhase::Betting => draw_text_centered(
            d,
            "Adjust your bet then press Deal. [Esc to stand up]",
            w / 2,
            180,
            20,
            TEXT,
        ),
        RoundPhase::PlayerTurn => draw_text_centered(d, "[H] Hit   [S] Stand", w / 2, h - 60, 20, TEXT),
        RoundPhase::Done => draw_text_centered(d, "[Esc to stand up]", w / 2, h - 60, 20, TEXT),
        RoundPhase::Dealing | RoundPhase::DealerTurn | RoundPhase::Settling => {}
    }

    let message = round.message();
    if !message.is_empty() {
        let color = if message.to_lowercase().contains("win") {
            GOLD
        } else {
            TEXT
        };
        let mid = (dealer_y + CARD_HEIGHT as i32 + player_y) / 2;
        draw_text_centered(d, message, w / 2, mid, 24, color);
    }
}

fn draw_tiles(d: &mut impl RaylibDraw, grid: &TileGrid, view_min: Vector2, view_max: Vector2) {
    let ts = grid.tile_size();
    for (x, y, kind) in grid.cells() {
        let px = x as f32 * ts;
        let py = y as f32 * ts;
        if px + ts < view_min.x || px > view_max.x || py + ts < view_min.y || py > view_max.y {
            continue;
        }
        let rect = Rectangle::new(px, py, ts, ts);
        d.draw_rectangle_rec(rect, tile_color(kind));
        match kind {
            TileKind::Door => d.draw_rectangle_lines_ex(rect, 2.0, ACCENT),
            TileKind::Exit | TileKind::BlackjackTable => d.draw_rectangle_lines_ex(rect, 1.0, GOLD),
            TileKind::Plant => d.draw_circle(
                (px + ts / 2.0) as i32,
                (py + ts / 2.0) as i32,
                ts * 0.4,
                Color::new(30, 120, 40, 255),
            ),
            _ => {}
        }
    }
}

fn draw_npc(d: &mut impl RaylibDraw, npc: &Npc, min: Vector2, size: Vector2) {
    let (r, g, b) = npc.kind.rgb();
    d.draw_rectangle_rec(Rectangle::new(min.x, min.y, size.x, size.y), Color::new(r, g, b, 255));
    let eye_y = (min.y + size.y / 2.0 - 2.0) as i32;
    let cx = min.x + size.x / 2.0;
    d.draw_circle((cx - 4.0) as i32, eye_y, 2.0, Color::WHITE);
    d.draw_circle((cx + 4.0) as i32, eye_y, 2.0, Color::WHITE);
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    state: Res<GameState>,
    camera: Option<Res<Camera2DRes>>,
    screen: Res<ScreenSize>,
    grid: Option<Res<TileGrid>>,
    scene: Option<Res<CurrentScene>>,
    hud: Option<Res<HudMessage>>,
    table: Option<Res<BlackjackTable>>,
    debug: Option<Res<DebugMode>>,
    player: Query<(&MapPosition, &BoxCollider), With<Player>>,
    npcs: Query<(&Npc, &MapPosition, &BoxCollider)>,
) {
    let (w, h) = (screen.w, screen.h);
    let fps = rl.get_fps();
    let mut d = rl.begin_drawing(&th);
    d.clear_background(BG_COLOR);

    match state.get() {
        GameStates::AtTable => {
            if let Some(table) = table.as_deref() {
                draw_table_screen(&mut d, table, w, h);
            }
        }
        GameStates::GameOver => {
            if let Some(settlement) = table.as_deref().and_then(|t| t.last_settlement()) {
                draw_text_centered(&mut d, &settlement.message(), w / 2, h / 2 - 60, 20, TEXT);
            }
            draw_text_centered(&mut d, "You went broke. GAME OVER", w / 2, h / 2 - 16, 30, RED);
            draw_text_centered(&mut d, "Press R to respawn outside", w / 2, h / 2 + 18, 20, TEXT);
        }
        GameStates::Exploring | GameStates::Paused => {
            if let (Some(camera), Some(grid)) = (camera.as_deref(), grid.as_deref()) {
                let cam = camera.0;
                let half = Vector2::new(
                    cam.offset.x / cam.zoom.max(f32::EPSILON),
                    cam.offset.y / cam.zoom.max(f32::EPSILON),
                );
                let view_min = cam.target - half;
                let view_max = cam.target + half;

                let mut d2 = d.begin_mode2D(cam);
                draw_tiles(&mut d2, grid, view_min, view_max);
                for (npc, pos, collider) in npcs.iter() {
                    let (min, max) = collider.aabb(pos.pos);
                    draw_npc(&mut d2, npc, min, max - min);
                }
                for (pos, collider) in player.iter() {
                    let (min, max) = collider.aabb(pos.pos);
                    let size = max - min;
                    d2.draw_rectangle_rec(
                        Rectangle::new(min.x - 2.0, min.y - 2.0, size.x + 4.0, size.y + 4.0),
                        Color::BLACK,
                    );
                    d2.draw_rectangle_rec(Rectangle::new(min.x, min.y, size.x, size.y), PLAYER_COLOR);
                }

                if debug.is_some() {
                    let ts = grid.tile_size();
                    for (x, y, kind) in grid.cells() {
                        if kind.is_solid() {
                            let rect = Rectangle::new(x as f32 * ts, y as f32 * ts, ts, ts);
                            d2.draw_rectangle_lines_ex(rect, 1.0, Color::RED);
                        }
                    }
                    for (_, pos, collider) in npcs.iter() {
                        let (min, max) = collider.aabb(pos.pos);
                        let size = max - min;
                        d2.draw_rectangle_lines_ex(
                            Rectangle::new(min.x, min.y, size.x, size.y),
                            1.0,
                            Color::GREEN,
                        );
                    }
                    for (pos, collider) in player.iter() {
                        let c = collider.center(pos.pos);
                        d2.draw_circle_lines(c.x as i32, c.y as i32, TALK_RANGE, Color::YELLOW);
                    }
                }
            }

            if let Some(scene) = scene.as_deref() {
                d.draw_rectangle(0, 0, w, 44, Color::new(0, 0, 0, 170));
                draw_text_centered(&mut d, scene.id.hint(), w / 2, 22, 20, TEXT);
            }
            if let Some(table) = table.as_deref() {
                let text = format!("Bankroll: ${}", table.bankroll());
                d.draw_text(&text, w - text_width(&text, 20) - 12, 56, 20, GOLD);
            }
            if let Some(line) = hud.as_deref().and_then(|hud| hud.text()) {
                let bw = text_width(line, 20) + 32;
                d.draw_rectangle(w / 2 - bw / 2, h - 70, bw, 40, Color::new(0, 0, 0, 200));
                draw_text_centered(&mut d, line, w / 2, h - 50, 20, TEXT);
            }
            if state.is(GameStates::Paused) {
                d.draw_rectangle(0, 0, w, h, Color::new(0, 0, 0, 150));
                draw_text_centered(&mut d, "PAUSED", w / 2, h / 2 - 20, 40, TEXT);
                draw_text_centered(&mut d, "[Esc] resume   [Q] quit", w / 2, h / 2 + 24, 20, TEXT);
            }
        }
        GameStates::None | GameStates::Setup | GameStates::Quitting => {}
    }

    if debug.is_some() {
        d.draw_text(
            &format!("DEBUG (F1) | FPS: {} | {:?}", fps, state.get()),
            10,
            h - 48,
            10,
            Color::LIME,
        );
        if let (Some(grid), Some((pos, collider))) = (grid.as_deref(), player.iter().next()) {
            let (cx, cy) = grid.cell_at(collider.center(pos.pos));
            let text = format!(
                "Player ({:.1}, {:.1}) cell ({}, {}) {:?}",
                pos.pos.x,
                pos.pos.y,
                cx,
                cy,
                grid.kind_at_cell(cx, cy)
            );
            d.draw_text(&text, 10, h - 32, 10, Color::LIME);
        }
        if let Some(camera) = camera.as_deref() {
            let cam = camera.0;
            let text = format!(
                "Camera ({:.1}, {:.1}) zoom {:.2}",
                cam.target.x, cam.target.y, cam.zoom
            );
            d.draw_text(&text, 10, h - 16, 10, Color::LIME);
        }
    }
}
