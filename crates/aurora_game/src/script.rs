//! Scripted keyboard input
//!
//! A script is a list of key holds over time. Applying it at time `t`
//! leaves exactly the keys whose hold covers `t` pressed.

use aurora_engine::prelude::*;

/// One key held over `[start, end)` seconds
#[derive(Debug, Clone, Copy)]
struct Hold {
    key: Key,
    start: f32,
    end: f32,
}

/// Timeline of key holds
#[derive(Debug, Clone, Default)]
pub struct Script {
    holds: Vec<Hold>,
}

impl Script {
    /// Hold `key` from `start` to `end` seconds
    #[must_use]
    pub fn hold(mut self, key: Key, start: f32, end: f32) -> Self {
        debug_assert!(start <= end, "hold must not end before it starts");
        self.holds.push(Hold { key, start, end });
        self
    }

    /// A short walk around the map with a few casts
    pub fn demo() -> Self {
        Self::default()
            .hold(Key::Right, 0.5, 2.0)
            .hold(Key::Cast, 1.0, 1.6)
            .hold(Key::Up, 2.5, 4.0)
            .hold(Key::Cast, 3.0, 3.2)
            .hold(Key::Left, 4.5, 7.0)
            .hold(Key::Down, 6.0, 7.0)
            .hold(Key::Cast, 7.5, 9.0)
            .hold(Key::Right, 9.5, 10.0)
    }

    /// Time at which the last hold ends, plus a second to settle
    pub fn duration(&self) -> f32 {
        self.holds.iter().map(|hold| hold.end).fold(0.0, f32::max) + 1.0
    }

    /// Update `input` to the keys held at time `t`
    pub fn apply(&self, t: f32, input: &mut KeyboardState) {
        input.release_all();
        for hold in &self.holds {
            if (hold.start..hold.end).contains(&t) {
                input.handle_key_input(hold.key, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_presses_covering_holds() {
        let script = Script::default().hold(Key::Left, 0.0, 1.0).hold(Key::Cast, 0.5, 0.6);
        let mut input = KeyboardState::new();

        script.apply(0.55, &mut input);
        assert!(input.is_key_down(Key::Left));
        assert!(input.is_key_down(Key::Cast));

        script.apply(1.0, &mut input);
        assert!(!input.is_key_down(Key::Left));
        assert!(!input.is_key_down(Key::Cast));
    }

    #[test]
    fn test_duration_covers_last_hold() {
        assert!((Script::demo().duration() - 11.0).abs() < 1e-6);
        assert!((Script::default().duration() - 1.0).abs() < 1e-6);
    }
}
