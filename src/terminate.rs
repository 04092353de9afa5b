//! The capability used by [`Backend::close`](crate::Backend::close) to end the host
//! process. Injecting it keeps the backend usable inside a test runner.

/// Ends the hosting process with the given exit status.
pub trait Terminator {
    fn terminate(&mut self, code: i32);
}

/// Exits the current process immediately. No destructors run and nothing is flushed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&mut self, code: i32) {
        std::process::exit(code)
    }
}

impl<F> Terminator for F
where
    F: FnMut(i32),
{
    fn terminate(&mut self, code: i32) {
        self(code)
    }
}
