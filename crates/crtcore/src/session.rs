use crate::gallery::Gallery;
use crate::menu::{InputAction, Menu, MenuKey};
use crate::params::{Direction, ParamSet};

/// Notification for the rendering host after an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The active gallery image changed; the host should swap textures and
    /// refresh the content dimensions it feeds the letterbox.
    ImageChanged { index: usize },
}

/// Owns the whole interactive state: parameter set, gallery selection, menu
/// cursor, and key-repeat timers. Driven synchronously by the host's frame
/// loop; never shared across threads.
pub struct Session {
    params: ParamSet,
    gallery: Gallery,
    menu: Menu,
}

impl Session {
    pub fn new(params: ParamSet, gallery: Gallery) -> Self {
        assert!(!params.is_empty(), "session requires at least one parameter");
        Self {
            params,
            gallery,
            menu: Menu::new(),
        }
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamSet {
        &mut self.params
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn cursor(&self) -> usize {
        self.menu.cursor()
    }

    /// Feeds a fresh directional press: fires its action immediately and arms
    /// the repeat timer.
    pub fn key_pressed(&mut self, key: MenuKey) -> Option<SessionEvent> {
        self.menu.repeat_mut().press(key);
        self.apply(key.into())
    }

    pub fn key_released(&mut self, key: MenuKey) {
        self.menu.repeat_mut().release(key);
    }

    /// Advances the repeat timers one frame, applying the repeated action if
    /// one fires. Call exactly once per rendered frame.
    pub fn tick(&mut self) -> Option<SessionEvent> {
        let key = self.menu.repeat_mut().tick()?;
        self.apply(key.into())
    }

    /// Applies one discrete action. Total over all valid states.
    pub fn apply(&mut self, action: InputAction) -> Option<SessionEvent> {
        match action {
            InputAction::CursorDown => {
                let count = self.params.len();
                self.menu.cursor_down(count);
                None
            }
            InputAction::CursorUp => {
                let count = self.params.len();
                self.menu.cursor_up(count);
                None
            }
            InputAction::ValueDown => {
                self.params.adjust(self.menu.cursor(), Direction::Down);
                None
            }
            InputAction::ValueUp => {
                self.params.adjust(self.menu.cursor(), Direction::Up);
                None
            }
            InputAction::PrevImage => {
                self.gallery.prev();
                Some(SessionEvent::ImageChanged {
                    index: self.gallery.current_index(),
                })
            }
            InputAction::NextImage => {
                self.gallery.next();
                Some(SessionEvent::ImageChanged {
                    index: self.gallery.current_index(),
                })
            }
            InputAction::ResetParams => {
                self.params.reset();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryEntry;
    use crate::letterbox::Vec2;
    use crate::params::ShaderParam;

    fn session() -> Session {
        let params = ParamSet::new(vec![
            ShaderParam::new("A", 0.5, 0.0, 1.0, 0.25),
            ShaderParam::new("B", 0.0, -1.0, 1.0, 0.5),
            ShaderParam::new("C", 2.0, 0.0, 4.0, 1.0),
        ]);
        let gallery = Gallery::new(vec![
            GalleryEntry::new("first", Vec2::new(256.0, 240.0)),
            GalleryEntry::new("second", Vec2::new(320.0, 200.0)),
        ]);
        Session::new(params, gallery)
    }

    #[test]
    fn value_edits_follow_the_cursor() {
        let mut s = session();
        s.apply(InputAction::CursorDown);
        s.apply(InputAction::ValueUp);
        assert_eq!(s.params().get(1).value, 0.5);
        assert_eq!(s.params().get(0).value, 0.5, "other params untouched");
    }

    #[test]
    fn image_switch_reports_new_index() {
        let mut s = session();
        assert_eq!(
            s.apply(InputAction::NextImage),
            Some(SessionEvent::ImageChanged { index: 1 })
        );
        assert_eq!(s.gallery().current().size, Vec2::new(320.0, 200.0));
        assert_eq!(
            s.apply(InputAction::NextImage),
            Some(SessionEvent::ImageChanged { index: 0 })
        );
        assert_eq!(
            s.apply(InputAction::PrevImage),
            Some(SessionEvent::ImageChanged { index: 1 })
        );
    }

    #[test]
    fn reset_is_order_preserving() {
        let mut s = session();
        s.apply(InputAction::ValueUp);
        s.apply(InputAction::CursorDown);
        s.apply(InputAction::ValueDown);
        s.apply(InputAction::ResetParams);
        let values: Vec<f32> = s.params().values().map(|(_, v)| v).collect();
        assert_eq!(values, vec![0.5, 0.0, 2.0]);
    }

    #[test]
    fn held_key_repeats_through_tick() {
        let mut s = session();
        s.key_pressed(MenuKey::ValueUp);
        assert_eq!(s.params().get(0).value, 0.75, "press fires immediately");

        let mut fired = 0;
        for _ in 0..30 {
            if s.tick().is_some() {
                fired += 1;
            }
        }
        // ValueUp repeats return no event but do edit the value.
        assert_eq!(fired, 0);
        assert_eq!(s.params().get(0).value, 1.0, "repeat fired at frame 30");

        s.key_released(MenuKey::ValueUp);
        for _ in 0..40 {
            s.tick();
        }
        assert_eq!(s.params().get(0).value, 1.0, "released key stops repeating");
    }

    #[test]
    fn cursor_navigation_is_cyclic_from_any_start() {
        let mut s = session();
        s.apply(InputAction::CursorDown);
        let start = s.cursor();
        for _ in 0..s.params().len() {
            s.apply(InputAction::CursorDown);
        }
        assert_eq!(s.cursor(), start);
    }
}
