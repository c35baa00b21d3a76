use crossterm::event::KeyCode;

use term_pong::config::ControlScheme;
use term_pong::input::*;

// ── ControlScheme ─────────────────────────────────────────────────────────────

#[test]
fn wasd_maps_w_and_s_in_either_case() {
    let scheme = ControlScheme::Wasd;
    assert_eq!(scheme.action_for(KeyCode::Char('w')), Some(Action::Up));
    assert_eq!(scheme.action_for(KeyCode::Char('W')), Some(Action::Up));
    assert_eq!(scheme.action_for(KeyCode::Char('s')), Some(Action::Down));
    assert_eq!(scheme.action_for(KeyCode::Char('S')), Some(Action::Down));
    assert_eq!(scheme.action_for(KeyCode::Up), None);
}

#[test]
fn arrows_ignore_letters() {
    let scheme = ControlScheme::Arrows;
    assert_eq!(scheme.action_for(KeyCode::Up), Some(Action::Up));
    assert_eq!(scheme.action_for(KeyCode::Down), Some(Action::Down));
    assert_eq!(scheme.action_for(KeyCode::Char('w')), None);
}

// ── InputLatch ────────────────────────────────────────────────────────────────

#[test]
fn latch_starts_released() {
    let latch = InputLatch::default();
    assert!(!latch.up_held);
    assert!(!latch.down_held);
}

#[test]
fn latch_press_and_release_are_independent() {
    let mut latch = InputLatch::default();
    latch.key_down(Action::Up);
    latch.key_down(Action::Down);
    assert!(latch.up_held && latch.down_held);

    latch.key_up(Action::Up);
    assert!(!latch.up_held);
    assert!(latch.down_held);
}

#[test]
fn latch_last_event_wins() {
    let mut latch = InputLatch::default();
    latch.key_down(Action::Up);
    latch.key_up(Action::Up);
    latch.key_down(Action::Up);
    assert!(latch.up_held);
    latch.key_down(Action::Up); // repeats change nothing
    assert!(latch.up_held);
}

// ── HoldWindow ────────────────────────────────────────────────────────────────

fn hold() -> HoldWindow {
    HoldWindow::new(40, 8) // first-press window, repeat window
}

#[test]
fn single_press_survives_os_repeat_delay() {
    let mut latch = InputLatch::default();
    let mut hold = hold();
    latch.key_down(Action::Up);
    hold.touch(Action::Up, 1);

    // No repeat yet: the OS is still in its initial delay.
    for frame in 2..=21 {
        hold.expire(&mut latch, frame);
        assert!(latch.up_held, "released at frame {frame}");
    }
}

#[test]
fn single_press_released_after_first_press_window() {
    let mut latch = InputLatch::default();
    let mut hold = hold();
    latch.key_down(Action::Down);
    hold.touch(Action::Down, 10);

    hold.expire(&mut latch, 50);
    assert!(latch.down_held);
    hold.expire(&mut latch, 51);
    assert!(!latch.down_held);
}

#[test]
fn repeats_keep_key_alive() {
    let mut latch = InputLatch::default();
    let mut hold = hold();
    latch.key_down(Action::Up);
    hold.touch(Action::Up, 1);
    for frame in (30..90).step_by(3) {
        hold.touch(Action::Up, frame);
        hold.expire(&mut latch, frame + 2);
        assert!(latch.up_held, "released at frame {frame}");
    }
}

#[test]
fn repeating_key_released_after_short_window() {
    let mut latch = InputLatch::default();
    let mut hold = hold();
    latch.key_down(Action::Up);
    hold.touch(Action::Up, 1);
    hold.touch(Action::Up, 30); // first repeat

    hold.expire(&mut latch, 38);
    assert!(latch.up_held);
    hold.expire(&mut latch, 39);
    assert!(!latch.up_held);
}

#[test]
fn press_after_release_waits_for_repeat_again() {
    let mut latch = InputLatch::default();
    let mut hold = hold();
    latch.key_down(Action::Up);
    hold.touch(Action::Up, 1);
    hold.touch(Action::Up, 30);
    hold.expire(&mut latch, 50); // released

    latch.key_down(Action::Up);
    hold.touch(Action::Up, 60);
    hold.expire(&mut latch, 80);
    assert!(latch.up_held);
}

#[test]
fn forgotten_key_is_released_on_next_expire() {
    let mut latch = InputLatch::default();
    let mut hold = hold();
    latch.key_down(Action::Up);
    hold.touch(Action::Up, 1);
    hold.forget(Action::Up);
    hold.expire(&mut latch, 1);
    assert!(!latch.up_held);
}
