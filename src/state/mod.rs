//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: Tracks the state of individual page URLs (queued, processed, failed, ...)
//! - `RequestThrottle`: Spaces consecutive network requests by the configured delay

mod page_state;
mod throttle;

// Re-export main types
pub use page_state::PageState;
pub use throttle::RequestThrottle;
