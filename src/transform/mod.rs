//! Response body transformation.
//!
//! # Data Flow
//! ```text
//! raw response body + content-type
//!     → dispatch.rs (built-in content-type table)
//!     → custom.rs (caller transforms, in order, best effort)
//!     → final Body
//! ```

pub mod custom;
pub mod dispatch;

pub use custom::{ResponseTransform, TransformChain, TransformError};
pub use dispatch::{classify, dispatch_body, BodyKind};
