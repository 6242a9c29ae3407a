pub mod client;
pub mod sequence;
pub mod session;
pub mod traits;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, Credentials};
pub use sequence::{RequestSequence, Ticket};
pub use session::{FileSessionStore, MemorySessionStore};
pub use traits::{SessionStore, Transport};
pub use transport::ReqwestTransport;
pub use types::{ApiRequest, ApiResponse, InvestmentRequest, Method};
