//! The four pure pixel stages. Each allocates and returns a fresh grid.

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod extract;
pub(crate) mod mask;
