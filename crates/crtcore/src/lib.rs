//! Pure viewer logic: letterbox placement, the tunable shader parameter
//! set, the parameter-menu state machine with its key-repeat timing, and the
//! gallery selection. No GPU, window, or clock types appear here; the host
//! drives everything through explicit per-frame calls.

mod gallery;
mod letterbox;
mod menu;
mod params;
mod session;

pub use gallery::{Gallery, GalleryEntry};
pub use letterbox::{compute_letterbox, LetterBox, Vec2};
pub use menu::{InputAction, KeyRepeat, Menu, MenuKey};
pub use params::{Direction, ParamError, ParamSet, ShaderParam};
pub use session::{Session, SessionEvent};
