//! # Módulo HTTP
//!
//! Este módulo implementa lo mínimo del protocolo HTTP/1.0 que necesita un
//! servidor de desarrollo, sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests HTTP/1.0 (GET y HEAD)
//! - Construcción de responses HTTP
//! - Manejo de status codes
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 13\r\n
//! \r\n
//! {"ok": true}
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::Request;
pub use response::Response;
pub use status::StatusCode;
