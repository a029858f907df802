pub mod http_client;
pub mod log_sink;

pub use http_client::{HttpClientOptions, HttpGatewayClient, HttpGatewayConnector};
pub use log_sink::TracingLogSink;
