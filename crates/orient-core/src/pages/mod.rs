//! Screen pages. The instrument has exactly one.

pub mod instrument;
pub mod page;

pub use instrument::InstrumentPage;
pub use page::Page;
