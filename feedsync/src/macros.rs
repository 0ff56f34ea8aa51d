#[cfg(feature = "tracing")]
macro_rules! ftrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "feedsync", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ftrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! fdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "feedsync", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! fwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "feedsync", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! fwarn {
    ($($tt:tt)*) => {};
}
