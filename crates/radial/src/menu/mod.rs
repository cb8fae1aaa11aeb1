pub mod model;
pub mod state;
pub mod view;

pub use model::{Focus, ItemLabel, MenuModel};
pub use state::{MenuState, RadialMenu};
pub use view::{RenderOutcome, RenderStats, Renderer};

pub const DEFAULT_ITEMS: &[&str] = &["One", "Two", "Three", "Four", "Five", "Six"];
pub const DEFAULT_FONT_FAMILY: &str = "Sans";
pub const DEFAULT_FONT_SIZE: f64 = 18.0; // ~14pt
pub const DEFAULT_FOCUS_BORDER: f64 = 5.0; // wedge outline width
pub const DEFAULT_CENTER_SIZE: f64 = 60.0; // inner disc diameter
pub const DEFAULT_CENTER_BORDER: f64 = 5.0; // ring around the inner disc
pub const DEFAULT_STEP: u32 = 4;
