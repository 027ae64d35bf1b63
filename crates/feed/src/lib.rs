//! Client-side pagination for the `/books` feed.
//!
//! [`Coordinator`] is a synchronous state machine that decides which page may be fetched
//! next and whether a finished fetch still belongs to the current session.
//! [`FeedSession`] shares one coordinator between concurrent event handlers.

pub mod coordinator;
pub mod error;
pub mod export;
pub mod params;
pub mod session;
pub mod transport;
pub mod viewport;

pub use coordinator::{Completion, Coordinator, PageTicket, Phase};
pub use error::FeedError;
pub use export::{export_csv, write_csv, EXPORT_FILE_NAME};
pub use params::FeedParams;
pub use session::FeedSession;
pub use transport::{HttpTransport, LocalTransport, PageTransport};
pub use viewport::{ScrollViewport, SCROLL_THRESHOLD};
