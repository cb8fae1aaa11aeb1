//! Radial (pie) menu core: polar hit-testing, a step-driven open/close
//! animation and a memoizing cairo renderer, tied together by
//! [`menu::RadialMenu`].
//!
//! Nothing here knows about windows or event loops. A host feeds pointer
//! positions, clicks, ticks and the surface size in, and presents the image
//! surface that comes out.

pub mod anim;
pub mod error;
pub mod events;
pub mod geometry;
pub mod menu;
pub mod style;

pub use error::{MenuError, RenderError};
pub use events::{MenuActivated, MenuUpdate};
pub use geometry::{Point, Size};
pub use menu::{Focus, MenuModel, MenuState, RadialMenu};
pub use style::{HexColor, MenuStyle};
