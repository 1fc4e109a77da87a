use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

/// Something that can run a callback later. Dropping the returned handle must
/// cancel the callback if it has not fired yet.
pub trait Timer {
    type Handle: 'static;

    fn schedule(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout`-backed timer. `Timeout` clears itself on drop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    type Handle = Timeout;

    fn schedule(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis, callback)
    }
}

/// Runs the wrapped callback once `wait` ms have passed without another
/// [`Debounced::call`]. Each call replaces the pending invocation.
pub struct Debounced<T: Timer> {
    timer: T,
    wait: u32,
    callback: Rc<dyn Fn()>,
    pending: Rc<RefCell<Option<T::Handle>>>,
}

impl<T: Timer> Debounced<T> {
    pub fn new(timer: T, wait: u32, callback: impl Fn() + 'static) -> Self {
        Self {
            timer,
            wait,
            callback: Rc::new(callback),
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn call(&self) {
        // Drop the old handle first so its timer is cleared before rescheduling.
        self.pending.borrow_mut().take();

        let callback = Rc::clone(&self.callback);
        let pending = Rc::clone(&self.pending);
        let handle = self.timer.schedule(
            self.wait,
            Box::new(move || {
                // Fired: empty the slot. Dropping a spent handle is a no-op.
                if let Ok(mut slot) = pending.try_borrow_mut() {
                    slot.take();
                }
                callback();
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Drops any pending invocation without running it.
    #[cfg(test)]
    fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}

/// Browser convenience: a closure suitable for an event listener.
pub fn debounce(wait: u32, callback: impl Fn() + 'static) -> impl FnMut() {
    let debounced = Debounced::new(BrowserTimer, wait, callback);
    move || debounced.call()
}
