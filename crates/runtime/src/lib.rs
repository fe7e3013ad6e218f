//! Talent runtime: message dispatch, progression hooks and persistence glue.
//!
//! The runtime owns per-player [`talent_core::CharacterState`], routes UI
//! topics through a flat command table, and bridges the pure engine to the
//! host game through the [`session::PlayerLink`] seam. All computation is
//! synchronous and in-memory; durable storage sits behind
//! [`repository::SpecRepository`].
pub mod error;
pub mod handlers;
pub mod messages;
pub mod oracle;
pub mod progression;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

pub use error::{Result, RuntimeError};
pub use oracle::OracleManager;
pub use repository::{MemoryRepository, RepositoryError, SpecRepository};
pub use router::{HandlerFn, RequestContext, Topic, TopicRouter};
pub use service::TalentService;
pub use session::{PlayerLink, RecordingLink};
