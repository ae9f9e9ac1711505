/// Integer conversion that is checked in debug builds and with default features.
/// With `unsafe_conversions` the check is skipped.
#[macro_export]
macro_rules! conv {
    ($t:ty, $a:expr) => {
        if cfg!(feature = "unsafe_conversions") {
            unsafe { <$t>::try_from($a).unwrap_unchecked() }
        } else {
            <$t>::try_from($a).unwrap()
        }
    };
}
