use libretro_plugin::JoypadState;

use crate::config::{HEIGHT, SQUARE_SIZE, WIDTH};

/// Top-left corner of the movable square.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    x: i32,
    y: i32,
}

impl Cursor {
    pub const MAX_X: i32 = (WIDTH - SQUARE_SIZE) as i32;
    pub const MAX_Y: i32 = (HEIGHT - SQUARE_SIZE) as i32;

    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x: x.clamp(0, Self::MAX_X),
            y: y.clamp(0, Self::MAX_Y),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Moves one unit per pressed direction, clamping after each of right,
    /// left, down and up in that order.
    pub fn step(&mut self, input: JoypadState) {
        if input.contains(JoypadState::RIGHT) {
            self.x = (self.x + 1).min(Self::MAX_X);
        }
        if input.contains(JoypadState::LEFT) {
            self.x = (self.x - 1).max(0);
        }
        if input.contains(JoypadState::DOWN) {
            self.y = (self.y + 1).min(Self::MAX_Y);
        }
        if input.contains(JoypadState::UP) {
            self.y = (self.y - 1).max(0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_bounds(cursor: &Cursor) -> bool {
        (0..=Cursor::MAX_X).contains(&cursor.x()) && (0..=Cursor::MAX_Y).contains(&cursor.y())
    }

    #[test]
    fn bounds_match_the_square() {
        assert_eq!(Cursor::MAX_X, 300);
        assert_eq!(Cursor::MAX_Y, 220);
    }

    #[test]
    fn clamps_instead_of_wrapping() {
        let mut cursor = Cursor::default();
        cursor.step(JoypadState::LEFT | JoypadState::UP);
        assert_eq!(cursor, Cursor::new(0, 0));

        let mut cursor = Cursor::new(Cursor::MAX_X, Cursor::MAX_Y);
        cursor.step(JoypadState::RIGHT | JoypadState::DOWN);
        assert_eq!((cursor.x(), cursor.y()), (300, 220));
    }

    #[test]
    fn opposite_directions_apply_in_order() {
        let mut cursor = Cursor::new(10, 10);
        cursor.step(JoypadState::DIRECTIONS);
        assert_eq!((cursor.x(), cursor.y()), (10, 10));

        // At the right edge the right step is clamped away, the left one is not.
        let mut cursor = Cursor::new(Cursor::MAX_X, 0);
        cursor.step(JoypadState::RIGHT | JoypadState::LEFT);
        assert_eq!(cursor.x(), Cursor::MAX_X - 1);

        // At the top the up step is clamped after down already moved.
        let mut cursor = Cursor::new(0, 0);
        cursor.step(JoypadState::DOWN | JoypadState::UP);
        assert_eq!(cursor.y(), 0);
    }

    #[test]
    fn any_input_sequence_stays_in_bounds() {
        let starts = [
            Cursor::new(0, 0),
            Cursor::new(Cursor::MAX_X, 0),
            Cursor::new(0, Cursor::MAX_Y),
            Cursor::new(Cursor::MAX_X, Cursor::MAX_Y),
            Cursor::new(150, 110),
        ];
        let combos: Vec<JoypadState> = (0u16..16)
            .map(|bits| JoypadState::from_bits_truncate(bits << 4))
            .collect();

        for start in starts {
            let mut cursor = start;
            let mut seed: u32 = 0x2545_F491;
            for _ in 0..2_000 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                cursor.step(combos[(seed % 16) as usize]);
                assert!(in_bounds(&cursor), "{cursor:?} escaped from {start:?}");
            }
            for _ in 0..400 {
                cursor.step(JoypadState::RIGHT | JoypadState::DOWN);
            }
            assert_eq!((cursor.x(), cursor.y()), (Cursor::MAX_X, Cursor::MAX_Y));
        }
    }

    #[test]
    fn new_clamps_out_of_range_positions() {
        assert_eq!(Cursor::new(-4, 999), Cursor::new(0, Cursor::MAX_Y));
    }
}
