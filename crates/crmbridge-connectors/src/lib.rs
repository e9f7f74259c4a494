pub mod error;
pub mod http;

// Re-export commonly used types
pub use error::{ConnectorError, ConnectorResult};
pub use http::{
    build_request, AuthStyle, ClientConfig, Confirmation, EndpointDescriptor, HttpDispatcher,
    HttpMethod, HttpTransport, PreparedRequest, RawResponse, ReqwestTransport, TransportError,
};
