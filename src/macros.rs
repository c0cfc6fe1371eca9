//! Logging shims. Routed to `defmt` or `log` when one of those features is enabled,
//! compiled out otherwise.

#[cfg(not(any(feature = "defmt", feature = "log")))]
macro_rules! discard {
    ($($arg:tt)*) => {};
}

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        pub(crate) use defmt::{debug, trace, warn};
    } else if #[cfg(feature = "log")] {
        pub(crate) use log::{debug, trace, warn};
    } else {
        pub(crate) use discard as debug;
        pub(crate) use discard as trace;
        pub(crate) use discard as warn;
    }
}
