//! Trailing-edge debounce for search inputs

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Runs only the last call made within the delay
///
/// Each call replaces the pending timeout; dropping a `Timeout` cancels it.
#[derive(Clone, Copy)]
pub struct Debounce {
    delay_ms: u32,
    pending: StoredValue<Option<Timeout>, LocalStorage>,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: StoredValue::new_local(None),
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        if self.delay_ms == 0 {
            self.cancel();
            f();
            return;
        }
        let timeout = Timeout::new(self.delay_ms, f);
        self.pending.set_value(Some(timeout));
    }

    pub fn cancel(&self) {
        self.pending.set_value(None);
    }
}

/// Input handler writing the debounced value into `query`
pub fn debounced_query(delay_ms: u32, query: RwSignal<String>) -> impl Fn(leptos::ev::Event) + Copy {
    let debounce = Debounce::new(delay_ms);
    move |ev| {
        let value = event_target_value(&ev);
        debounce.call(move || query.set(value));
    }
}
