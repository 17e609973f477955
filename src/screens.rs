//! Screen state machine
//!
//! The single authority over which phase of the game is active and which
//! component receives each input event. Gameplay ticks are driven by a time
//! accumulator so render frame rate stays decoupled from the cell tick rate:
//! one tick fires each time `1/speed` seconds have accumulated, and speed
//! changes from power-ups take effect on the very next tick boundary.

use serde::Serialize;

use crate::consts::{INTRO_DURATION_SECS, NAME_MAX_LEN, PAYMENT_PROCESSING_SECS};
use crate::highscores::HighScores;
use crate::shop::{self, CoinPackage, PurchaseOutcome, CATALOG, COIN_PACKAGES};
use crate::sim::{Direction, GameSession, InventoryItem};

/// Game phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Intro,
    Menu,
    Lore,
    Playing,
    GameOver,
    HighScores,
    Shop,
    PaymentForm,
}

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Archives,
    Shop,
    Exit,
}

/// Input events routed by the state machine
///
/// Translated from raw key/pointer events by the platform layer; the flow
/// only sees intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Dir(Direction),
    Confirm,
    Cancel,
    Menu(MenuChoice),
    UseItem(InventoryItem),
    /// Index into [`shop::CATALOG`]; opens a purchase confirmation
    BuyItem(usize),
    /// Index into [`shop::COIN_PACKAGES`]
    BuyCoins(usize),
    Deny,
    SubmitPayment,
    Text(char),
    Backspace,
}

/// Payment form sub-state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentState {
    Editing,
    Processing { remaining: f32 },
    Success,
}

/// Drives screen transitions and owns all phase-local state
pub struct ScreenFlow {
    screen: Screen,
    intro_elapsed: f32,
    /// Seconds banked toward the next cell tick while Playing
    tick_accumulator: f32,
    /// Player name edited on the game-over screen
    pub name: String,
    /// Card number field; opaque to the simulation
    pub card_field: String,
    /// Item awaiting purchase confirmation
    pub pending_item: Option<shop::ShopItem>,
    pending_package: Option<CoinPackage>,
    payment: PaymentState,
    /// Last purchase result, for the shop screen to display
    pub shop_message: Option<String>,
    exit_requested: bool,
}

impl Default for ScreenFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenFlow {
    pub fn new() -> Self {
        Self {
            screen: Screen::Intro,
            intro_elapsed: 0.0,
            tick_accumulator: 0.0,
            name: String::from("PLAYER"),
            card_field: String::new(),
            pending_item: None,
            pending_package: None,
            payment: PaymentState::Editing,
            shop_message: None,
            exit_requested: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn payment_state(&self) -> PaymentState {
        self.payment
    }

    /// Set once the Exit menu entry is chosen; the host loop shuts down
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn enter(&mut self, next: Screen) {
        log::debug!("screen {:?} -> {:?}", self.screen, next);
        self.screen = next;
    }

    /// Route one input event to the active phase
    ///
    /// Inputs meant for another phase are dropped. Invalid inputs within a
    /// phase (out-of-range indices, reversal steering) are silently ignored.
    pub fn handle_input(
        &mut self,
        session: &mut GameSession,
        high_scores: &mut HighScores,
        input: Input,
    ) {
        match self.screen {
            // Only the timer leaves the intro
            Screen::Intro => {}
            Screen::Menu => {
                if let Input::Menu(choice) = input {
                    match choice {
                        MenuChoice::Start => self.enter(Screen::Lore),
                        MenuChoice::Archives => self.enter(Screen::HighScores),
                        MenuChoice::Shop => {
                            self.shop_message = None;
                            self.pending_item = None;
                            self.enter(Screen::Shop);
                        }
                        MenuChoice::Exit => self.exit_requested = true,
                    }
                }
            }
            Screen::Lore => {
                if input == Input::Confirm {
                    session.reset();
                    self.tick_accumulator = 0.0;
                    self.enter(Screen::Playing);
                }
            }
            Screen::Playing => match input {
                Input::Dir(dir) => session.snake.steer(dir),
                Input::UseItem(item) => session.use_item(item),
                _ => {}
            },
            Screen::GameOver => match input {
                Input::Text(c) => {
                    if self.name.len() < NAME_MAX_LEN && !c.is_control() {
                        self.name.push(c);
                    }
                }
                Input::Backspace => {
                    self.name.pop();
                }
                Input::Confirm => {
                    if session.snake.score > 0 {
                        high_scores.add(&self.name, session.snake.score);
                        self.name.clear();
                    }
                    self.enter(Screen::Menu);
                }
                _ => {}
            },
            Screen::HighScores => {
                if input == Input::Cancel {
                    self.enter(Screen::Menu);
                }
            }
            Screen::Shop => match input {
                Input::Cancel => {
                    self.pending_item = None;
                    self.enter(Screen::Menu);
                }
                Input::BuyItem(i) => {
                    let Some(item) = CATALOG.get(i) else { return };
                    self.pending_item = Some(*item);
                    self.shop_message = None;
                }
                Input::Confirm => {
                    let Some(item) = self.pending_item.take() else { return };
                    self.shop_message = Some(match shop::purchase(session, item) {
                        PurchaseOutcome::Success => {
                            format!("{} purchased", item.item.as_str())
                        }
                        PurchaseOutcome::InsufficientFunds => String::from("Insufficient funds"),
                    });
                }
                Input::Deny => self.pending_item = None,
                Input::BuyCoins(i) => {
                    let Some(package) = COIN_PACKAGES.get(i) else { return };
                    self.pending_package = Some(*package);
                    self.payment = PaymentState::Editing;
                    self.card_field.clear();
                    self.enter(Screen::PaymentForm);
                }
                _ => {}
            },
            Screen::PaymentForm => match self.payment {
                PaymentState::Editing => match input {
                    Input::Cancel => {
                        self.pending_package = None;
                        self.enter(Screen::Shop);
                    }
                    Input::SubmitPayment => {
                        self.payment = PaymentState::Processing {
                            remaining: PAYMENT_PROCESSING_SECS,
                        };
                    }
                    Input::Text(c) => {
                        if c.is_ascii_digit() && self.card_field.len() < 19 {
                            self.card_field.push(c);
                        }
                    }
                    Input::Backspace => {
                        self.card_field.pop();
                    }
                    _ => {}
                },
                // Cancel aborts mid-processing with no coins credited;
                // everything else is dead while the spinner runs
                PaymentState::Processing { .. } => {
                    if input == Input::Cancel {
                        self.pending_package = None;
                        self.payment = PaymentState::Editing;
                        self.enter(Screen::Shop);
                    }
                }
                PaymentState::Success => {
                    self.payment = PaymentState::Editing;
                    self.enter(Screen::Shop);
                }
            },
        }
    }

    /// Advance timers and, while Playing, run accumulated cell ticks
    pub fn update(&mut self, session: &mut GameSession, dt: f32) {
        match self.screen {
            Screen::Intro => {
                self.intro_elapsed += dt;
                if self.intro_elapsed >= INTRO_DURATION_SECS {
                    self.enter(Screen::Menu);
                }
            }
            Screen::Playing => {
                self.tick_accumulator += dt;
                loop {
                    let threshold = 1.0 / session.snake.speed;
                    if self.tick_accumulator < threshold {
                        break;
                    }
                    self.tick_accumulator -= threshold;
                    if session.tick() {
                        self.tick_accumulator = 0.0;
                        self.enter(Screen::GameOver);
                        break;
                    }
                }
            }
            Screen::PaymentForm => {
                if let PaymentState::Processing { remaining } = self.payment {
                    let remaining = remaining - dt;
                    if remaining <= 0.0 {
                        if let Some(package) = self.pending_package.take() {
                            session.coins += package.coins;
                            log::info!(
                                "payment cleared, +{} coins ({} total)",
                                package.coins,
                                session.coins
                            );
                        }
                        self.payment = PaymentState::Success;
                    } else {
                        self.payment = PaymentState::Processing { remaining };
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::IVec2;

    fn setup() -> (ScreenFlow, GameSession, HighScores) {
        (
            ScreenFlow::new(),
            GameSession::new(7, Tuning::default()),
            HighScores::new(),
        )
    }

    #[test]
    fn intro_advances_to_menu_after_three_seconds() {
        let (mut flow, mut session, _) = setup();
        flow.update(&mut session, 2.9);
        assert_eq!(flow.screen(), Screen::Intro);
        flow.update(&mut session, 0.2);
        assert_eq!(flow.screen(), Screen::Menu);
    }

    #[test]
    fn intro_ignores_input() {
        let (mut flow, mut session, mut hs) = setup();
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(flow.screen(), Screen::Intro);
    }

    #[test]
    fn menu_routes_to_each_destination() {
        let (mut flow, mut session, mut hs) = setup();
        flow.update(&mut session, 3.0);

        flow.handle_input(&mut session, &mut hs, Input::Menu(MenuChoice::Archives));
        assert_eq!(flow.screen(), Screen::HighScores);
        flow.handle_input(&mut session, &mut hs, Input::Cancel);
        assert_eq!(flow.screen(), Screen::Menu);

        flow.handle_input(&mut session, &mut hs, Input::Menu(MenuChoice::Shop));
        assert_eq!(flow.screen(), Screen::Shop);
        flow.handle_input(&mut session, &mut hs, Input::Cancel);

        flow.handle_input(&mut session, &mut hs, Input::Menu(MenuChoice::Start));
        assert_eq!(flow.screen(), Screen::Lore);

        assert!(!flow.exit_requested());
    }

    #[test]
    fn exit_sets_flag_without_leaving_menu() {
        let (mut flow, mut session, mut hs) = setup();
        flow.update(&mut session, 3.0);
        flow.handle_input(&mut session, &mut hs, Input::Menu(MenuChoice::Exit));
        assert!(flow.exit_requested());
        assert_eq!(flow.screen(), Screen::Menu);
    }

    #[test]
    fn lore_confirm_resets_session_and_starts_round() {
        let (mut flow, mut session, mut hs) = setup();
        flow.update(&mut session, 3.0);
        session.snake.score = 99;
        flow.handle_input(&mut session, &mut hs, Input::Menu(MenuChoice::Start));
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(flow.screen(), Screen::Playing);
        assert_eq!(session.snake.score, 0);
    }

    fn start_round(flow: &mut ScreenFlow, session: &mut GameSession, hs: &mut HighScores) {
        flow.update(session, 3.0);
        flow.handle_input(session, hs, Input::Menu(MenuChoice::Start));
        flow.handle_input(session, hs, Input::Confirm);
    }

    #[test]
    fn accumulator_fires_one_tick_per_threshold() {
        let (mut flow, mut session, mut hs) = setup();
        start_round(&mut flow, &mut session, &mut hs);
        flow.handle_input(&mut session, &mut hs, Input::Dir(Direction::Right));

        // base speed 5 cells/sec, threshold 0.2s
        let start = session.snake.body[0];
        flow.update(&mut session, 0.19);
        assert_eq!(session.snake.body[0], start);
        flow.update(&mut session, 0.02);
        assert_eq!(session.snake.body[0], start + IVec2::new(24, 0));
    }

    #[test]
    fn large_dt_runs_multiple_ticks() {
        let (mut flow, mut session, mut hs) = setup();
        start_round(&mut flow, &mut session, &mut hs);
        flow.handle_input(&mut session, &mut hs, Input::Dir(Direction::Right));
        let start = session.snake.body[0];
        flow.update(&mut session, 0.61);
        assert_eq!(session.snake.body[0], start + IVec2::new(72, 0));
    }

    #[test]
    fn collision_moves_to_game_over_and_confirm_commits_score() {
        let (mut flow, mut session, mut hs) = setup();
        start_round(&mut flow, &mut session, &mut hs);
        // Forged collision: enough body to double back onto itself
        session.snake.body = vec![
            IVec2::new(480, 360),
            IVec2::new(456, 360),
            IVec2::new(432, 360),
            IVec2::new(408, 360),
            IVec2::new(384, 360),
        ];
        session.snake.length = 5;
        session.snake.direction = IVec2::new(1, 0);
        session.snake.next_direction = IVec2::new(1, 0);
        session.snake.score = 40;
        flow.handle_input(&mut session, &mut hs, Input::Dir(Direction::Down));
        flow.update(&mut session, 0.2);
        flow.handle_input(&mut session, &mut hs, Input::Dir(Direction::Left));
        flow.update(&mut session, 0.2);
        flow.handle_input(&mut session, &mut hs, Input::Dir(Direction::Up));
        flow.update(&mut session, 0.2);
        assert_eq!(flow.screen(), Screen::GameOver);

        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(flow.screen(), Screen::Menu);
        assert_eq!(hs.top_score(), Some(40));
        // Name buffer is spent with the commit
        assert!(flow.name.is_empty());
    }

    #[test]
    fn zero_score_round_is_not_committed() {
        let (mut flow, mut session, mut hs) = setup();
        flow.update(&mut session, 3.0);
        flow.handle_input(&mut session, &mut hs, Input::Menu(MenuChoice::Start));
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        flow.enter(Screen::GameOver);
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert!(hs.is_empty());
    }

    #[test]
    fn name_editing_respects_max_length() {
        let (mut flow, mut session, mut hs) = setup();
        flow.enter(Screen::GameOver);
        flow.name.clear();
        for c in "ABCDEFGHIJKLMNOP".chars() {
            flow.handle_input(&mut session, &mut hs, Input::Text(c));
        }
        assert_eq!(flow.name.len(), NAME_MAX_LEN);
        flow.handle_input(&mut session, &mut hs, Input::Backspace);
        assert_eq!(flow.name.len(), NAME_MAX_LEN - 1);
    }

    #[test]
    fn shop_purchase_confirms_then_reports_outcome() {
        let (mut flow, mut session, mut hs) = setup();
        flow.update(&mut session, 3.0);
        flow.handle_input(&mut session, &mut hs, Input::Menu(MenuChoice::Shop));

        // Selecting opens the confirmation; nothing is charged yet
        flow.handle_input(&mut session, &mut hs, Input::BuyItem(0));
        assert!(flow.pending_item.is_some());
        assert_eq!(session.coins, 300);

        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(flow.screen(), Screen::Shop);
        assert_eq!(session.coins, 200);
        assert_eq!(flow.shop_message.as_deref(), Some("Shield purchased"));
        assert!(flow.pending_item.is_none());

        session.coins = 10;
        flow.handle_input(&mut session, &mut hs, Input::BuyItem(1));
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(session.coins, 10);
        assert_eq!(flow.shop_message.as_deref(), Some("Insufficient funds"));
    }

    #[test]
    fn denied_purchase_charges_nothing() {
        let (mut flow, mut session, mut hs) = setup();
        flow.enter(Screen::Shop);
        flow.handle_input(&mut session, &mut hs, Input::BuyItem(2));
        flow.handle_input(&mut session, &mut hs, Input::Deny);
        assert!(flow.pending_item.is_none());
        assert_eq!(session.coins, 300);
        // A stray confirm with nothing pending buys nothing
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(session.coins, 300);
    }

    #[test]
    fn out_of_range_shop_index_is_ignored() {
        let (mut flow, mut session, mut hs) = setup();
        flow.enter(Screen::Shop);
        flow.handle_input(&mut session, &mut hs, Input::BuyItem(99));
        flow.handle_input(&mut session, &mut hs, Input::BuyCoins(99));
        assert_eq!(flow.screen(), Screen::Shop);
        assert_eq!(session.coins, 300);
    }

    #[test]
    fn payment_flow_credits_coins_after_processing() {
        let (mut flow, mut session, mut hs) = setup();
        flow.enter(Screen::Shop);
        flow.handle_input(&mut session, &mut hs, Input::BuyCoins(0));
        assert_eq!(flow.screen(), Screen::PaymentForm);

        for c in "4242".chars() {
            flow.handle_input(&mut session, &mut hs, Input::Text(c));
        }
        flow.handle_input(&mut session, &mut hs, Input::SubmitPayment);
        assert!(matches!(flow.payment_state(), PaymentState::Processing { .. }));

        // Non-cancel input is dead while processing
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(flow.screen(), Screen::PaymentForm);
        assert!(matches!(flow.payment_state(), PaymentState::Processing { .. }));

        flow.update(&mut session, 1.0);
        assert_eq!(session.coins, 300);
        flow.update(&mut session, 1.1);
        assert_eq!(session.coins, 600);
        assert_eq!(flow.payment_state(), PaymentState::Success);

        // Any key after success returns to the shop
        flow.handle_input(&mut session, &mut hs, Input::Confirm);
        assert_eq!(flow.screen(), Screen::Shop);
    }

    #[test]
    fn cancel_during_processing_aborts_without_credit() {
        let (mut flow, mut session, mut hs) = setup();
        flow.enter(Screen::Shop);
        flow.handle_input(&mut session, &mut hs, Input::BuyCoins(0));
        flow.handle_input(&mut session, &mut hs, Input::SubmitPayment);
        assert!(matches!(flow.payment_state(), PaymentState::Processing { .. }));

        flow.handle_input(&mut session, &mut hs, Input::Cancel);
        assert_eq!(flow.screen(), Screen::Shop);
        assert_eq!(flow.payment_state(), PaymentState::Editing);
        // The abandoned package never lands
        flow.update(&mut session, 5.0);
        assert_eq!(session.coins, 300);
    }

    #[test]
    fn payment_cancel_returns_to_shop_without_credit() {
        let (mut flow, mut session, mut hs) = setup();
        flow.enter(Screen::Shop);
        flow.handle_input(&mut session, &mut hs, Input::BuyCoins(2));
        flow.handle_input(&mut session, &mut hs, Input::Cancel);
        assert_eq!(flow.screen(), Screen::Shop);
        flow.update(&mut session, 5.0);
        assert_eq!(session.coins, 300);
    }

    #[test]
    fn playing_routes_steering_and_item_use() {
        let (mut flow, mut session, mut hs) = setup();
        start_round(&mut flow, &mut session, &mut hs);
        session.inventory.add(InventoryItem::Shield);
        flow.handle_input(&mut session, &mut hs, Input::Dir(Direction::Up));
        flow.handle_input(&mut session, &mut hs, Input::UseItem(InventoryItem::Shield));
        assert_eq!(session.snake.next_direction, IVec2::new(0, -1));
        assert!(session.snake.shield);
    }

    #[test]
    fn inputs_for_other_phases_are_dropped() {
        let (mut flow, mut session, mut hs) = setup();
        flow.update(&mut session, 3.0);
        // Shop and gameplay inputs fall through the menu unanswered
        flow.handle_input(&mut session, &mut hs, Input::BuyItem(0));
        flow.handle_input(&mut session, &mut hs, Input::Dir(Direction::Left));
        assert_eq!(flow.screen(), Screen::Menu);
        assert_eq!(session.coins, 300);
        assert_eq!(session.snake.next_direction, IVec2::ZERO);
    }
}
