mod click;
mod logger;
mod time;
mod tycoon;

use std::{cell::RefCell, io, rc::Rc};

use click::{pixel_y_to_row, TapMap};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::FrameClock;
use tycoon::TycoonGame;

/// Map a click to a terminal row using the grid container's bounding rect.
fn dom_pixel_to_row(mouse_x: u32, mouse_y: u32, taps: &TapMap) -> Option<u16> {
    let document = web_sys::window()?.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    if (mouse_x as f64) < rect.left() {
        return None;
    }
    pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), taps.terminal_rows)
}

fn performance_now() -> Option<f64> {
    web_sys::window()?.performance().map(|p| p.now())
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    let seed = js_sys::Date::now() as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64;
    let game = Rc::new(RefCell::new(TycoonGame::new(seed)));
    let max_delta = game
        .borrow()
        .engine()
        .map(|e| e.config().max_frame_delta_ms)
        .unwrap_or(500.0);
    let clock = Rc::new(RefCell::new(FrameClock::new(max_delta)));
    let taps = Rc::new(RefCell::new(TapMap::new()));
    log::info!("session started with seed {}", seed);

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let taps = taps.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let key = {
                let taps = taps.borrow();
                dom_pixel_to_row(mouse_event.x, mouse_event.y, &taps).and_then(|row| taps.key_at(row))
            };
            if let Some(key) = key {
                game.borrow_mut().handle_key(key);
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_key(c.to_ascii_lowercase());
            }
        }
    });

    terminal.draw_web(move |f| {
        if let Some(now) = performance_now() {
            let now_ms = clock.borrow_mut().update(now);
            game.borrow_mut().advance_to(now_ms);
        }
        let area = f.area();
        tycoon::render::render(&game.borrow(), f, area, &mut taps.borrow_mut());
    });

    Ok(())
}
