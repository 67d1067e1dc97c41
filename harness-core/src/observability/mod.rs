pub mod logging;

pub use logging::{init_tracing, REQUEST_ID_HEADER};
