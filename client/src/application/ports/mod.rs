// Application ports - driven ports (implemented by infrastructure or the embedding application)

pub mod gateway_port;
pub mod media_ports;

pub use gateway_port::{GatewayConnector, GatewayPort, HttpResponse};
pub use media_ports::{
    AudioOutput, DisplaySurface, LogLevel, LogSink, MediaEngine, MediaEngineFactory, MediaEvents,
    StreamConfig,
};

#[cfg(test)]
pub use gateway_port::MockGatewayPort;
