use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    #[error("A radial menu needs at least one item")]
    NoItems,
    #[error("Animation step must be greater than zero")]
    ZeroStep,
    #[error("Invalid {name}: {value} (expected a finite, non-negative number)")]
    InvalidDimension { name: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Surface borrow error: {0}")]
    Borrow(#[from] cairo::BorrowError),
}
