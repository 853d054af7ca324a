pub(crate) mod aggregate;

pub use aggregate::{MemeFeed, RefineTicket};
