//! Form and listing state for the HR maintenance screens. Everything here is
//! pure; the CLI handlers perform the backend calls.

pub mod campaigns;
pub mod factors;
pub mod grades;
pub mod listing;
pub mod targets;

pub use listing::{paginate, Page};
