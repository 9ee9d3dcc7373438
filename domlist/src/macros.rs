#[cfg(feature = "tracing")]
macro_rules! dltrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "domlist", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! dltrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! dldebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "domlist", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! dldebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! dlwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "domlist", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! dlwarn {
    ($($tt:tt)*) => {};
}
