//! Profiling support via Tracy.
//!
//! Shader processing runs once per shader compilation, usually while a frame
//! is being prepared, so the processor passes are instrumented with Tracy
//! spans. Profiling is enabled via the `profiling` Cargo feature:
//!
//! ```toml
//! [dependencies]
//! redlilium-shader-interface = { version = "0.1", features = ["profiling"] }
//! ```
//!
//! When the feature is disabled (the default), the macros expand to nothing.
//!
//! ```ignore
//! use redlilium_shader_interface::profiling::{profile_function, profile_scope};
//!
//! fn process() {
//!     profile_function!();
//!     {
//!         profile_scope!("extract");
//!         // ...
//!     }
//! }
//! ```

#[cfg(feature = "profiling")]
pub use tracy_client::{self, span};

pub use crate::{profile_function, profile_scope};

/// Create a profiling span for the current scope.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_scope {
    ($name:expr) => {
        let _profile_span = $crate::profiling::span!($name);
    };
}

/// Create a profiling span (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_scope {
    ($name:expr) => {};
}

/// Create a profiling span for the entire function.
#[macro_export]
#[cfg(feature = "profiling")]
macro_rules! profile_function {
    () => {
        let _profile_span = $crate::profiling::span!();
    };
}

/// Create a profiling span for function (no-op when profiling disabled).
#[macro_export]
#[cfg(not(feature = "profiling"))]
macro_rules! profile_function {
    () => {};
}
