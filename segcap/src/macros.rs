// Thin wrappers so every log line from the crate goes through one place

#[macro_export]
macro_rules! segcap_error {
    ($($arg:tt)+) => ($crate::log::error!($($arg)+));
}

#[macro_export]
macro_rules! segcap_warn {
    ($($arg:tt)+) => ($crate::log::warn!($($arg)+));
}

#[macro_export]
macro_rules! segcap_info {
    ($($arg:tt)+) => ($crate::log::info!($($arg)+));
}

#[macro_export]
macro_rules! segcap_debug {
    ($($arg:tt)+) => ($crate::log::debug!($($arg)+));
}

#[macro_export]
macro_rules! segcap_trace {
    ($($arg:tt)+) => ($crate::log::trace!($($arg)+));
}

#[macro_export]
macro_rules! expect {
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(t) => t,
            Err(why) => {
                panic!("{}: {}", $msg, why);
            }
        }
    };
}
