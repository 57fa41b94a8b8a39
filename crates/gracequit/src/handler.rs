//! Shutdown handler trait and function adapter.

/// A shutdown callback, invoked once during drain.
///
/// Implement this on types that own termination work (flush a writer, close
/// a connection pool), or wrap a plain closure with [`handler_fn`].
pub trait QuitHandler {
    fn on_quit(&mut self);
}

struct FnHandler<F: FnMut()>(F);

impl<F: FnMut()> QuitHandler for FnHandler<F> {
    fn on_quit(&mut self) {
        (self.0)()
    }
}

/// Wrap a closure as a boxed [`QuitHandler`].
pub fn handler_fn<F>(f: F) -> Box<dyn QuitHandler + Send>
where
    F: FnMut() + Send + 'static,
{
    Box::new(FnHandler(f))
}
