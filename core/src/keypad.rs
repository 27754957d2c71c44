/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// Each key is a latch: the input collaborator sets it when a key goes down and is
/// responsible for clearing it again, either on release or after some fixed time.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; 16],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latches or releases a key; only the low nibble of `key` is used
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.pressed[(key & 0xF) as usize] = pressed;
    }

    /// Whether a key is down; only the low nibble of `key` is used
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0xF) as usize]
    }

    /// The lowest numbered key that's currently down
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|p| *p).map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; 16];
    }
}
