use crate::error::MenuError;
use crate::menu::DEFAULT_ITEMS;
use derive_more::{AsRef, Deref, Display, From, Into};
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ItemLabel(String);

impl ItemLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Focus {
    #[default]
    None,
    Center,
    Wedge(usize),
}

impl Focus {
    pub fn is_center(&self) -> bool {
        matches!(self, Self::Center)
    }

    pub fn wedge_index(&self) -> Option<usize> {
        match self {
            Self::Wedge(i) => Some(*i),
            _ => None,
        }
    }
}

/// The ordered item labels. Wedge `i` shows `items[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    items: Vec<ItemLabel>,
    count: NonZeroUsize,
}

impl MenuModel {
    pub fn new<I, S>(items: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<ItemLabel> = items.into_iter().map(ItemLabel::new).collect();
        let count = NonZeroUsize::new(items.len()).ok_or(MenuError::NoItems)?;
        Ok(Self { items, count })
    }

    pub fn items(&self) -> &[ItemLabel] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ItemLabel> {
        self.items.get(index)
    }

    pub fn item_count(&self) -> NonZeroUsize {
        self.count
    }

    /// Label of the focused wedge, if any.
    pub fn label_for(&self, focus: Focus) -> Option<&ItemLabel> {
        focus.wedge_index().and_then(|i| self.get(i))
    }
}

impl Default for MenuModel {
    fn default() -> Self {
        let items: Vec<ItemLabel> = DEFAULT_ITEMS.iter().copied().map(ItemLabel::new).collect();
        let count = NonZeroUsize::MIN.saturating_add(items.len() - 1);
        Self { items, count }
    }
}
