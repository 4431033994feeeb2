use std::ffi::c_uint;

use bitflags::bitflags;

use crate::sys;

bitflags! {
    /// Pressed state of a RetroPad, one bit per button.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct JoypadState: u16 {
        const B = 1 << 0;
        const Y = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const UP = 1 << 4;
        const DOWN = 1 << 5;
        const LEFT = 1 << 6;
        const RIGHT = 1 << 7;
        const A = 1 << 8;
        const X = 1 << 9;
        const L = 1 << 10;
        const R = 1 << 11;

        const DIRECTIONS = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// A single RetroPad button, as queried through `retro_input_state_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoypadButton {
    B,
    Y,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    A,
    X,
    L,
    R,
}

impl JoypadButton {
    pub const ALL: [JoypadButton; 12] = [
        JoypadButton::B,
        JoypadButton::Y,
        JoypadButton::Select,
        JoypadButton::Start,
        JoypadButton::Up,
        JoypadButton::Down,
        JoypadButton::Left,
        JoypadButton::Right,
        JoypadButton::A,
        JoypadButton::X,
        JoypadButton::L,
        JoypadButton::R,
    ];

    /// D-pad buttons in the order their state is queried.
    pub const DPAD: [JoypadButton; 4] = [
        JoypadButton::Right,
        JoypadButton::Left,
        JoypadButton::Down,
        JoypadButton::Up,
    ];

    pub fn is_direction(self) -> bool {
        JoypadState::DIRECTIONS.contains(self.flag())
    }

    /// `RETRO_DEVICE_ID_JOYPAD_*` value of this button.
    pub fn id(self) -> c_uint {
        match self {
            JoypadButton::B => sys::RETRO_DEVICE_ID_JOYPAD_B,
            JoypadButton::Y => sys::RETRO_DEVICE_ID_JOYPAD_Y,
            JoypadButton::Select => sys::RETRO_DEVICE_ID_JOYPAD_SELECT,
            JoypadButton::Start => sys::RETRO_DEVICE_ID_JOYPAD_START,
            JoypadButton::Up => sys::RETRO_DEVICE_ID_JOYPAD_UP,
            JoypadButton::Down => sys::RETRO_DEVICE_ID_JOYPAD_DOWN,
            JoypadButton::Left => sys::RETRO_DEVICE_ID_JOYPAD_LEFT,
            JoypadButton::Right => sys::RETRO_DEVICE_ID_JOYPAD_RIGHT,
            JoypadButton::A => sys::RETRO_DEVICE_ID_JOYPAD_A,
            JoypadButton::X => sys::RETRO_DEVICE_ID_JOYPAD_X,
            JoypadButton::L => sys::RETRO_DEVICE_ID_JOYPAD_L,
            JoypadButton::R => sys::RETRO_DEVICE_ID_JOYPAD_R,
        }
    }

    pub fn flag(self) -> JoypadState {
        JoypadState::from_bits_truncate(1 << self.id())
    }
}
