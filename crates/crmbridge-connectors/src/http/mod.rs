pub mod auth;
pub mod body_builder;
pub mod endpoint;
pub mod executor;
pub mod request;
pub mod transport;
pub mod url_builder;

pub use auth::AuthStyle;
pub use endpoint::{Confirmation, EndpointDescriptor, HttpMethod, IdSource};
pub use executor::{normalize_response, HttpDispatcher};
pub use request::{build_request, PreparedRequest};
pub use transport::{ClientConfig, HttpTransport, RawResponse, ReqwestTransport, TransportError};
