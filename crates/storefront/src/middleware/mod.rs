//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (record in span, echo in response)
//! 4. CSP nonce (per-request nonce for the pixel bootstrap script)
//! 5. Security headers (CSP built from the nonce, framing, sniffing)

pub mod csp;
pub mod request_id;
pub mod security_headers;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::{RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
