mod traits;

pub use traits::{NativePath, Platform};

cfg_if::cfg_if! {
    if #[cfg(windows)]{
        pub(crate) mod windows;
        pub use windows::*;
    }else if #[cfg(unix)]{
        pub(crate) mod unix;
        pub use unix::*;
    }else {
        compile_error!("modlog supports windows and unix targets only");
    }
}
