//! Application layer - orchestration over domain and ports.

mod chat_service;

pub use chat_service::ConciergeService;
