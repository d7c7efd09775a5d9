//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request span)
//! 3. Request ID
//! 4. Session layer (tower-sessions, `PostgreSQL` store in production)
//! 5. Auth gate (`/admin/*` except `/admin/login*`)

pub mod auth_gate;
pub mod request_id;
pub mod session;

pub use auth_gate::{CurrentUser, GateDecision, LOGIN_PATH, auth_gate_middleware, check, is_gated};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{RequestStores, create_session_layer, session_layer, session_token};
