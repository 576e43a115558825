//! Property tests for key edge detection and queue consumption.

use canvas_input_core::{InputEvent, InputListener, Key, KeyAction, KeyEvent};
use proptest::prelude::*;

fn any_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        prop::sample::select(Key::LETTERS.to_vec()),
        prop::sample::select(Key::DIGITS.to_vec()),
        prop::sample::select(vec![
            Key::Space,
            Key::Enter,
            Key::Escape,
            Key::ShiftLeft,
            Key::ArrowUp,
            Key::F5,
            Key::NumpadEnter,
        ]),
        any::<u32>().prop_map(Key::Unknown),
    ]
}

proptest! {
    #[test]
    fn double_press_yields_one_press(key in any_key()) {
        let mut listener = InputListener::new();
        listener.key_pressed(key);
        listener.key_pressed(key);

        let expected = vec![InputEvent::from(KeyEvent::press(key))];
        prop_assert_eq!(listener.unprocessed_events(), expected);
        prop_assert!(listener.is_key_pressed(key));
    }

    #[test]
    fn release_without_press_yields_nothing(key in any_key()) {
        let mut listener = InputListener::new();
        listener.key_released(key);

        prop_assert!(listener.unprocessed_events().is_empty());
        prop_assert!(!listener.is_key_pressed(key));
    }

    #[test]
    fn queued_key_events_alternate(
        presses in prop::collection::vec((any_key(), any::<bool>()), 0..64)
    ) {
        let mut listener = InputListener::new();
        for (key, down) in &presses {
            if *down {
                listener.key_pressed(*key);
            } else {
                listener.key_released(*key);
            }
        }

        // Per key, queued events strictly alternate press, release, press...
        let mut keys: Vec<Key> = presses.iter().map(|(k, _)| *k).collect();
        keys.dedup();
        for key in keys {
            let actions: Vec<KeyAction> = listener
                .iter_unprocessed()
                .filter_map(|e| e.as_key())
                .filter(|e| e.key == key)
                .map(|e| e.action)
                .collect();
            for (i, action) in actions.iter().enumerate() {
                let expected = if i % 2 == 0 { KeyAction::Press } else { KeyAction::Release };
                prop_assert_eq!(*action, expected);
            }
            prop_assert_eq!(listener.is_key_pressed(key), actions.len() % 2 == 1);
        }
    }

    #[test]
    fn matching_is_idempotent(keys in prop::collection::vec(any_key(), 1..16)) {
        let mut listener = InputListener::new();
        for key in &keys {
            listener.key_typed(*key);
        }
        let target = keys[0];
        let occurrences = keys.iter().filter(|k| **k == target).count();

        let mut calls = 0;
        listener.check_for_key_stroke(target, KeyAction::Type, || calls += 1);
        listener.check_for_key_stroke(target, KeyAction::Type, || calls += 1);

        prop_assert_eq!(calls, occurrences);
        prop_assert_eq!(listener.unprocessed_len(), keys.len() - occurrences);
    }
}
