// Application layer - the ledger state object and its use cases.
// Clients (the interactive menu, tests) go through `LedgerService`
// rather than touching the repository directly.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
