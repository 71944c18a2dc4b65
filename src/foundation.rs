pub(crate) mod error;
pub(crate) mod grid;
pub(crate) mod threading;
