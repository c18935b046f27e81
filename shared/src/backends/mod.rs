cfg_if! {
    if #[cfg(feature = "native")] {
        mod native;
        pub use native::{FileStore, SystemClock};
    }
}
