//! Research pipeline and delivery conversation handling.

pub mod deliver;
pub mod research;
