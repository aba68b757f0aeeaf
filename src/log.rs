//! Logging shim.
//!
//! Builders and sessions log through `debug!` and `warn!` from here. With the
//! `tracing` feature these are the `tracing` macros; without it they compile
//! to empty blocks and the crate carries no logging dependency.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
mod quiet {
    #[doc(hidden)]
    #[macro_export]
    macro_rules! __geofig_debug {
        ($($arg:tt)*) => {{}};
    }

    #[doc(hidden)]
    #[macro_export]
    macro_rules! __geofig_warn {
        ($($arg:tt)*) => {{}};
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) use crate::{__geofig_debug as debug, __geofig_warn as warn};
