use fieldrunner::events::{GameCommand, GameEvent};
use fieldrunner::systems::input::{process_simple_key_events, Binding, Bindings, MovementKeys};
use fieldrunner::systems::{MovementKey, MovementState, SimpleKeyEvent};
use glam::Vec2;
use pretty_assertions::assert_eq;
use sdl2::keyboard::Keycode;
use speculoos::prelude::*;

mod keyboard_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_down_sets_movement_flag() {
        let bindings = Bindings::default();
        let mut state = MovementState::default();
        let events = process_simple_key_events(&bindings, &mut state, &[SimpleKeyEvent::KeyDown(Keycode::D)]);

        assert_that(&events).is_empty();
        assert_that(&state.right()).is_true();
        assert_eq!(state.held(), MovementKeys::RIGHT);
    }

    #[test]
    fn key_up_clears_only_its_flag() {
        let bindings = Bindings::default();
        let mut state = MovementState::default();
        process_simple_key_events(
            &bindings,
            &mut state,
            &[
                SimpleKeyEvent::KeyDown(Keycode::W),
                SimpleKeyEvent::KeyDown(Keycode::A),
                SimpleKeyEvent::KeyDown(Keycode::LShift),
            ],
        );
        process_simple_key_events(&bindings, &mut state, &[SimpleKeyEvent::KeyUp(Keycode::A)]);

        assert_that(&state.left()).is_false();
        assert_that(&state.up()).is_true();
        assert_that(&state.sprint()).is_true();
    }

    #[test]
    fn repeated_key_down_is_idempotent() {
        let bindings = Bindings::default();
        let mut state = MovementState::default();
        let down = [SimpleKeyEvent::KeyDown(Keycode::S); 3];
        process_simple_key_events(&bindings, &mut state, &down);
        let once = state;
        process_simple_key_events(&bindings, &mut state, &down);

        assert_eq!(state, once);
        process_simple_key_events(&bindings, &mut state, &[SimpleKeyEvent::KeyUp(Keycode::S)]);
        assert_that(&state.down()).is_false();
    }

    #[test]
    fn either_shift_sprints() {
        let bindings = Bindings::default();
        assert_eq!(bindings.get(Keycode::LShift), Some(Binding::Movement(MovementKey::Sprint)));
        assert_eq!(bindings.get(Keycode::RShift), Some(Binding::Movement(MovementKey::Sprint)));
    }

    #[test]
    fn unbound_key_is_ignored() {
        let bindings = Bindings::default();
        let mut state = MovementState::default();
        let events = process_simple_key_events(&bindings, &mut state, &[SimpleKeyEvent::KeyDown(Keycode::Z)]);

        assert_that(&events).is_empty();
        assert_eq!(state, MovementState::default());
    }

    #[test]
    fn command_keys_fire_on_key_down_only() {
        let bindings = Bindings::default();
        let mut state = MovementState::default();

        let events = process_simple_key_events(&bindings, &mut state, &[SimpleKeyEvent::KeyDown(Keycode::Backquote)]);
        assert_that(&events).contains(GameEvent::Command(GameCommand::ToggleDebug));

        let events = process_simple_key_events(&bindings, &mut state, &[SimpleKeyEvent::KeyUp(Keycode::Backquote)]);
        assert_that(&events).is_empty();
    }

    #[test]
    fn application_commands_are_bound() {
        let bindings = Bindings::default();
        let mut state = MovementState::default();
        let events = process_simple_key_events(
            &bindings,
            &mut state,
            &[
                SimpleKeyEvent::KeyDown(Keycode::P),
                SimpleKeyEvent::KeyDown(Keycode::Escape),
                SimpleKeyEvent::KeyDown(Keycode::Q),
            ],
        );

        assert_eq!(
            events,
            vec![
                GameEvent::Command(GameCommand::TogglePause),
                GameEvent::Command(GameCommand::Exit),
                GameEvent::Command(GameCommand::Exit),
            ]
        );
    }
}

mod movement_state_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn press_by_name_ignores_case() {
        let mut state = MovementState::default();

        assert_that(&state.press("W")).is_true();
        assert_that(&state.press("d")).is_true();
        assert_that(&state.press("Shift")).is_true();
        assert_that(&state.press("ArrowUp")).is_false();

        assert_eq!(state.held(), MovementKeys::UP | MovementKeys::RIGHT | MovementKeys::SPRINT);
    }

    #[test]
    fn release_by_name() {
        let mut state = MovementState::default();
        state.press("a");
        state.press("s");

        assert_that(&state.release("A")).is_true();
        assert_that(&state.release("x")).is_false();
        assert_eq!(state.held(), MovementKeys::DOWN);
    }

    #[test]
    fn release_all_clears_everything() {
        let mut state = MovementState::default();
        for name in ["w", "a", "s", "d", "shift"] {
            state.press(name);
        }
        state.release_all();

        assert_eq!(state, MovementState::default());
    }

    #[test]
    fn axes_follow_screen_coordinates() {
        let mut state = MovementState::default();
        state.on_key_down(MovementKey::Up);
        state.on_key_down(MovementKey::Right);

        assert_eq!(state.axes(), Vec2::new(1.0, -1.0));

        state.on_key_down(MovementKey::Down);
        assert_eq!(state.axes(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn key_names_resolve() {
        assert_eq!(MovementKey::from_name("w"), Some(MovementKey::Up));
        assert_eq!(MovementKey::from_name("S"), Some(MovementKey::Down));
        assert_eq!(MovementKey::from_name("a"), Some(MovementKey::Left));
        assert_eq!(MovementKey::from_name("D"), Some(MovementKey::Right));
        assert_eq!(MovementKey::from_name("SHIFT"), Some(MovementKey::Sprint));
        assert_eq!(MovementKey::from_name("space"), None);
    }
}
