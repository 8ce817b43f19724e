//! Alias layer so the rest of the crate can import allocating types
//! without caring whether they come from `std` or `alloc`.

#[cfg(feature = "std")]
pub use std::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec::Vec,
};

#[cfg(not(feature = "std"))]
pub use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
    vec::Vec,
};
