//! Integration layer available on std targets.

mod clock;
#[cfg(feature = "tokio-transport")]
mod remoting_driver;
mod tracing_dead_letter_sink;
#[cfg(feature = "tokio-transport")]
mod transport;

pub use clock::MonotonicClock;
#[cfg(feature = "tokio-transport")]
pub use remoting_driver::RemotingDriver;
pub use tracing_dead_letter_sink::TracingDeadLetterSink;
#[cfg(feature = "tokio-transport")]
pub use transport::TcpChannel;
