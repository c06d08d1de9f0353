//! Request middleware.
//!
//! Both middlewares install task-local request context: the trace
//! identifier and the error disclosure mode.

pub mod disclosure;
pub mod trace;

pub use disclosure::{Disclosure, ErrorDisclosure};
pub use trace::Trace;
