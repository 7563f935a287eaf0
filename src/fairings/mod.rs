mod request_logger;
mod shutdown;

pub(crate) use request_logger::request_span_for;
pub(crate) use request_logger::REQUEST_ID_HEADER;
pub use request_logger::RequestLogger;
pub use request_logger::TracingSpan;
pub use shutdown::ShutdownNotice;
