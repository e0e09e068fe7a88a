//! Control-surface index mappings.
//!
//! The hardware panel exposes a fixed set of buttons and four encoders.
//! The raw index space is host-defined and may grow in future hardware
//! revisions, so out-of-range indices are not an error: `from_index`
//! returns `None` and callers drop the event.

/// Number of panel buttons.
pub const BUTTON_COUNT: usize = 14;

/// Number of panel encoders.
pub const ENCODER_COUNT: usize = 4;

/// Panel buttons, with the fixed index mapping used on the wire.
///
/// | Index | Button     |
/// |-------|------------|
/// | 0-7   | Soft key 1-8 |
/// | 8     | Left       |
/// | 9     | Right      |
/// | 10    | Up         |
/// | 11    | Down       |
/// | 12    | Shift L    |
/// | 13    | Shift R    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Button {
    SoftKey1 = 0,
    SoftKey2 = 1,
    SoftKey3 = 2,
    SoftKey4 = 3,
    SoftKey5 = 4,
    SoftKey6 = 5,
    SoftKey7 = 6,
    SoftKey8 = 7,
    Left = 8,
    Right = 9,
    Up = 10,
    Down = 11,
    ShiftL = 12,
    ShiftR = 13,
}

impl Button {
    /// Map a raw wire index to a button. Out-of-range indices map to `None`.
    pub const fn from_index(index: i32) -> Option<Self> {
        Some(match index {
            0 => Self::SoftKey1,
            1 => Self::SoftKey2,
            2 => Self::SoftKey3,
            3 => Self::SoftKey4,
            4 => Self::SoftKey5,
            5 => Self::SoftKey6,
            6 => Self::SoftKey7,
            7 => Self::SoftKey8,
            8 => Self::Left,
            9 => Self::Right,
            10 => Self::Up,
            11 => Self::Down,
            12 => Self::ShiftL,
            13 => Self::ShiftR,
            _ => return None,
        })
    }

    /// The raw wire index of this button.
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Whether this is one of the eight soft keys, and which (0-based).
    pub const fn soft_key(self) -> Option<usize> {
        let i = self as i32;
        if i < 8 {
            Some(i as usize)
        } else {
            None
        }
    }
}

/// Panel encoders, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Encoder {
    E1 = 0,
    E2 = 1,
    E3 = 2,
    E4 = 3,
}

impl Encoder {
    /// Map a raw wire index to an encoder. Out-of-range indices map to `None`.
    pub const fn from_index(index: i32) -> Option<Self> {
        Some(match index {
            0 => Self::E1,
            1 => Self::E2,
            2 => Self::E3,
            3 => Self::E4,
            _ => return None,
        })
    }

    /// The raw wire index of this encoder.
    pub const fn index(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_button_mapping_round_trips() {
        for i in 0..BUTTON_COUNT as i32 {
            let button = Button::from_index(i).unwrap();
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn shift_r_is_index_13() {
        assert_eq!(Button::from_index(13), Some(Button::ShiftR));
        assert_eq!(Button::ShiftR.index(), 13);
    }

    #[test]
    fn out_of_range_buttons_are_ignored() {
        assert_eq!(Button::from_index(14), None);
        assert_eq!(Button::from_index(100), None);
        assert_eq!(Button::from_index(-1), None);
    }

    #[test]
    fn soft_keys_are_first_eight() {
        assert_eq!(Button::SoftKey1.soft_key(), Some(0));
        assert_eq!(Button::SoftKey8.soft_key(), Some(7));
        assert_eq!(Button::Left.soft_key(), None);
    }

    #[test]
    fn encoder_range_is_four() {
        assert_eq!(Encoder::from_index(0), Some(Encoder::E1));
        assert_eq!(Encoder::from_index(3), Some(Encoder::E4));
        assert_eq!(Encoder::from_index(4), None);
        assert_eq!(Encoder::from_index(-1), None);
    }
}
