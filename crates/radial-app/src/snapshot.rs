//! Headless rendering of the settled menu, for checking a style without
//! opening a window.

use anyhow::{Context, anyhow, bail};
use radial::geometry;
use radial::{Point, RadialMenu, Size};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// What the snapshot should show as hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Center,
    Wedge(usize),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Expected \"center\" or a wedge index, got {0:?}")]
pub struct ParseFocusError(String);

impl FromStr for FocusTarget {
    type Err = ParseFocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("center") {
            return Ok(Self::Center);
        }
        s.parse()
            .map(Self::Wedge)
            .map_err(|_| ParseFocusError(s.to_string()))
    }
}

impl FocusTarget {
    /// A pointer position that lands on this target.
    pub fn pointer(&self, menu: &RadialMenu) -> Point {
        match self {
            Self::Center => menu.size().center(),
            Self::Wedge(i) => geometry::label_anchor(*i, menu.model().item_count(), menu.size()),
        }
    }
}

pub fn write_png(
    mut menu: RadialMenu,
    size: Size,
    focus: Option<FocusTarget>,
    path: &Path,
) -> anyhow::Result<()> {
    let count = menu.model().item_count().get();
    if let Some(FocusTarget::Wedge(i)) = focus
        && i >= count
    {
        bail!("Wedge {} does not exist, the menu has {} items", i, count);
    }

    let _ = menu.resize(size);
    menu.finish_animation();
    if let Some(target) = focus {
        let _ = menu.pointer_moved(target.pointer(&menu));
    }

    let surface = menu
        .paint()?
        .ok_or_else(|| anyhow!("Nothing to draw on a {}x{} surface", size.width, size.height))?;

    let mut file = fs_err::File::create(path)?;
    surface
        .write_to_png(&mut file)
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radial::{Focus, MenuModel, MenuStyle};

    fn menu() -> RadialMenu {
        RadialMenu::new(MenuModel::default(), MenuStyle::default()).unwrap()
    }

    #[test]
    fn test_focus_target_parsing() {
        assert_eq!("center".parse(), Ok(FocusTarget::Center));
        assert_eq!(" CENTER ".parse(), Ok(FocusTarget::Center));
        assert_eq!("3".parse(), Ok(FocusTarget::Wedge(3)));
        assert_eq!(
            "north".parse::<FocusTarget>(),
            Err(ParseFocusError("north".to_string()))
        );
        assert!("-1".parse::<FocusTarget>().is_err());
    }

    #[test]
    fn test_pointer_hovers_target() {
        let mut menu = menu();
        let _ = menu.resize(Size::new(400, 400));
        menu.finish_animation();
        for target in [FocusTarget::Center, FocusTarget::Wedge(0), FocusTarget::Wedge(5)] {
            let _ = menu.pointer_moved(target.pointer(&menu));
            let expected = match target {
                FocusTarget::Center => Focus::Center,
                FocusTarget::Wedge(i) => Focus::Wedge(i),
            };
            assert_eq!(menu.focus(), expected);
        }
    }

    #[test]
    fn test_write_png() {
        let path = std::env::temp_dir().join(format!("radial-snapshot-{}.png", std::process::id()));
        write_png(menu(), Size::new(120, 120), Some(FocusTarget::Wedge(2)), &path).unwrap();

        let bytes = fs_err::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        fs_err::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_png_rejects_missing_wedge() {
        let path = std::env::temp_dir().join("radial-never-written.png");
        let err = write_png(menu(), Size::new(120, 120), Some(FocusTarget::Wedge(6)), &path);
        assert!(err.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_png_rejects_empty_surface() {
        let path = std::env::temp_dir().join("radial-empty.png");
        assert!(write_png(menu(), Size::new(0, 0), None, &path).is_err());
    }
}
