//! Neon Snake entry point
//!
//! The native binary runs a scripted headless round: it drives the screen
//! flow from intro to gameplay at 60 Hz, steers the snake in a loop for a
//! few seconds, and prints the resulting snapshot. A renderer front-end
//! embeds the library the same way and feeds real input instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use neon_snake::consts::NOMINAL_TICK_RATE;
    use neon_snake::screens::{Input, MenuChoice, Screen};
    use neon_snake::sim::{Direction, GameSession};
    use neon_snake::{HighScores, ScreenFlow, Tuning};

    env_logger::init();
    log::info!("Neon Snake (headless) starting...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let tuning = Tuning::load(Path::new("tuning.json"));
    let mut session = GameSession::new(seed, tuning);
    let scores_path = Path::new("high_scores.json");
    let mut high_scores = HighScores::load(scores_path);
    let mut flow = ScreenFlow::new();

    let dt = 1.0 / NOMINAL_TICK_RATE as f32;

    // Sit through the intro, then start a round
    while flow.screen() == Screen::Intro {
        flow.update(&mut session, dt);
    }
    flow.handle_input(&mut session, &mut high_scores, Input::Menu(MenuChoice::Start));
    flow.handle_input(&mut session, &mut high_scores, Input::Confirm);

    // Ten simulated seconds of a clockwise patrol
    let script = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];
    let frames = 10 * NOMINAL_TICK_RATE;
    for frame in 0..frames {
        if flow.screen() != Screen::Playing {
            break;
        }
        if frame % NOMINAL_TICK_RATE == 0 {
            let dir = script[(frame / NOMINAL_TICK_RATE) as usize % script.len()];
            flow.handle_input(&mut session, &mut high_scores, Input::Dir(dir));
        }
        flow.update(&mut session, dt);
        for event in session.take_events() {
            log::info!("event: {event:?}");
        }
    }

    let snap = session.snapshot();
    println!(
        "round over: score {}, length {}, coins {}, screen {:?}",
        snap.score,
        snap.body.len(),
        snap.coins,
        flow.screen()
    );

    if flow.screen() == Screen::GameOver {
        flow.handle_input(&mut session, &mut high_scores, Input::Confirm);
    } else if snap.score > 0 {
        high_scores.add("HEADLESS", snap.score);
    }
    high_scores.save(scores_path);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm front-end links the library crate directly
}
