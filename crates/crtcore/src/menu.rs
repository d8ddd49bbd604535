/// Frames a held key waits before its first repeat fires.
const FIRST_REPEAT_DELAY: u32 = 30;
/// Frames between repeats once the first one has fired.
const REPEAT_INTERVAL: u32 = 10;

/// The four directional inputs eligible for key repeat. Declaration order is
/// the priority order when several are held on the same repeat tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    CursorDown,
    CursorUp,
    ValueDown,
    ValueUp,
}

const MENU_KEYS: [MenuKey; 4] = [
    MenuKey::CursorDown,
    MenuKey::CursorUp,
    MenuKey::ValueDown,
    MenuKey::ValueUp,
];

/// Discrete actions consumed by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    CursorDown,
    CursorUp,
    ValueDown,
    ValueUp,
    PrevImage,
    NextImage,
    ResetParams,
}

impl From<MenuKey> for InputAction {
    fn from(key: MenuKey) -> Self {
        match key {
            MenuKey::CursorDown => InputAction::CursorDown,
            MenuKey::CursorUp => InputAction::CursorUp,
            MenuKey::ValueDown => InputAction::ValueDown,
            MenuKey::ValueUp => InputAction::ValueUp,
        }
    }
}

/// Key-repeat state machine, advanced once per rendered frame.
///
/// A fresh press fires immediately (handled by the caller) and arms the
/// first-move flag; while any directional key stays held the frame counter
/// climbs and fires at 30 frames for the first repeat, then every 10.
#[derive(Debug, Default)]
pub struct KeyRepeat {
    held: [bool; MENU_KEYS.len()],
    accum: u32,
    first_move: bool,
}

impl KeyRepeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh press. The caller fires the action for `key` right
    /// away; repeats follow via `tick`.
    pub fn press(&mut self, key: MenuKey) {
        self.held[key as usize] = true;
        self.first_move = true;
        self.accum = 0;
    }

    /// Records a release; the counter drops to zero immediately rather than
    /// waiting for the next press.
    pub fn release(&mut self, key: MenuKey) {
        self.held[key as usize] = false;
        self.accum = 0;
    }

    pub fn is_held(&self, key: MenuKey) -> bool {
        self.held[key as usize]
    }

    /// Advances one frame. Returns the key whose action should fire this
    /// frame, if the repeat threshold was reached; at most one key fires per
    /// tick, picked in priority order.
    pub fn tick(&mut self) -> Option<MenuKey> {
        if !self.held.iter().any(|&held| held) {
            return None;
        }

        self.accum += 1;
        let delay = if self.first_move {
            FIRST_REPEAT_DELAY
        } else {
            REPEAT_INTERVAL
        };
        if self.accum < delay {
            return None;
        }

        self.first_move = false;
        self.accum = 0;
        MENU_KEYS.into_iter().find(|&key| self.is_held(key))
    }
}

/// Cursor over the ordered parameter list, with wraparound navigation.
#[derive(Debug, Default)]
pub struct Menu {
    cursor: usize,
    repeat: KeyRepeat,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn repeat_mut(&mut self) -> &mut KeyRepeat {
        &mut self.repeat
    }

    pub fn cursor_down(&mut self, param_count: usize) {
        self.cursor += 1;
        if self.cursor >= param_count {
            self.cursor = 0;
        }
    }

    pub fn cursor_up(&mut self, param_count: usize) {
        if self.cursor == 0 {
            self.cursor = param_count - 1;
        } else {
            self.cursor -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_hold_fires_at_thirty_then_every_ten() {
        let mut repeat = KeyRepeat::new();
        repeat.press(MenuKey::ValueUp);
        // The press itself fires immediately (caller side); count repeats.
        let mut fires = 0;
        for frame in 1..=30 {
            if let Some(key) = repeat.tick() {
                assert_eq!(key, MenuKey::ValueUp);
                assert_eq!(frame, 30);
                fires += 1;
            }
        }
        assert_eq!(fires, 1);

        for frame in 31..=40 {
            if repeat.tick().is_some() {
                assert_eq!(frame, 40);
                fires += 1;
            }
        }
        assert_eq!(fires, 2, "second repeat arrives 10 frames after the first");
    }

    #[test]
    fn release_resets_counter_immediately() {
        let mut repeat = KeyRepeat::new();
        repeat.press(MenuKey::CursorDown);
        for _ in 0..29 {
            assert!(repeat.tick().is_none());
        }
        repeat.release(MenuKey::CursorDown);
        assert!(repeat.tick().is_none());

        // A new press starts over with the long delay.
        repeat.press(MenuKey::CursorDown);
        for _ in 0..29 {
            assert!(repeat.tick().is_none());
        }
        assert_eq!(repeat.tick(), Some(MenuKey::CursorDown));
    }

    #[test]
    fn concurrent_holds_resolve_in_priority_order() {
        let mut repeat = KeyRepeat::new();
        repeat.press(MenuKey::ValueUp);
        repeat.press(MenuKey::CursorDown);
        for _ in 0..29 {
            assert!(repeat.tick().is_none());
        }
        // Down outranks Right; only one action per tick.
        assert_eq!(repeat.tick(), Some(MenuKey::CursorDown));
        assert!(repeat.tick().is_none());

        repeat.release(MenuKey::CursorDown);
        for _ in 0..9 {
            assert!(repeat.tick().is_none());
        }
        assert_eq!(repeat.tick(), Some(MenuKey::ValueUp));
    }

    #[test]
    fn cursor_wraps_both_directions() {
        let mut menu = Menu::new();
        let count = 5;
        for _ in 0..count {
            menu.cursor_down(count);
        }
        assert_eq!(menu.cursor(), 0, "N downs return to the start");

        menu.cursor_up(count);
        assert_eq!(menu.cursor(), count - 1);
        menu.cursor_down(count);
        assert_eq!(menu.cursor(), 0);
    }
}
