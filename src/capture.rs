//! Output capture for test bodies.
//!
//! Test bodies that print through [`print!`](crate::print) and [`println!`](crate::println)
//! write into a thread-local buffer instead of stdout. The harness takes the buffer after each
//! test and hands it to the listener, which keeps the listener's own stream (for example TAP
//! on stdout) free of interleaved test output.

use std::{
    cell::RefCell,
    mem,
    panic::{self, PanicHookInfo},
};

#[derive(Debug, Default)]
pub struct TestOutputCapture {
    pub output: Vec<u8>,
}

impl TestOutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.output.clear();
    }

    /// Take the captured output, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        let output = mem::take(&mut self.output);
        String::from_utf8(output)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
    }
}

thread_local! {
    pub static TEST_OUTPUT_CAPTURE: RefCell<TestOutputCapture> = RefCell::new(TestOutputCapture::new());
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Silences the default panic hook while alive.
///
/// Panics inside tests are expected and reported as failures, so the default hook printing
/// them to stderr would only add noise. The previous hook is restored on drop.
///
/// The panic hook is process-wide. Guards of runs that overlap on different threads, like
/// parallel `cargo test` threads, may drop out of order and leave the silent hook installed
/// after both runs finished. Run harnesses one after another if the default hook matters.
pub struct CapturePanicHookGuard(Option<PanicHook>);

impl CapturePanicHookGuard {
    pub fn install() -> Self {
        let old_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        Self(Some(old_hook))
    }
}

impl Drop for CapturePanicHookGuard {
    fn drop(&mut self) {
        if let Some(old_hook) = self.0.take() {
            panic::set_hook(old_hook);
        }
    }
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {{
        use ::std::io::Write;
        $crate::capture::TEST_OUTPUT_CAPTURE.with_borrow_mut(|capture| {
            capture.output.write_fmt(::std::format_args!($($arg)*)).expect("infallible for Vec<u8>");
        });
    }};
}

#[macro_export]
macro_rules! println {
    ($($arg:tt)*) => {{
        use ::std::io::Write;
        $crate::capture::TEST_OUTPUT_CAPTURE.with_borrow_mut(|capture| {
            capture.output.write_fmt(::std::format_args!($($arg)*)).expect("infallible for Vec<u8>");
            capture.output.write_all(b"\n").expect("infallible for Vec<u8>");
        });
    }};
}
