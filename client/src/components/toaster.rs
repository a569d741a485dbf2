//! Toast viewport and the signal-backed [`Notifier`] that feeds it.

#[cfg(test)]
#[path = "toaster_test.rs"]
mod toaster_test;

use leptos::prelude::*;

use crate::state::toast::{Notifier, Toast};

/// How long a toast stays up before it dismisses itself.
pub const TOAST_LIFETIME_MS: u64 = 5000;

/// Queue of visible toasts, shared through context.
#[derive(Clone, Copy)]
pub struct ToastQueue {
    entries: RwSignal<Vec<(u64, Toast)>>,
    next_id: StoredValue<u64>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: RwSignal::new(Vec::new()), next_id: StoredValue::new(0) }
    }

    /// Append a toast and return its id.
    pub fn push(&self, toast: Toast) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.entries.update(|entries| entries.push((id, toast)));
        id
    }

    pub fn dismiss(&self, id: u64) {
        self.entries.update(|entries| entries.retain(|(entry_id, _)| *entry_id != id));
    }

    #[must_use]
    pub fn visible(&self) -> Vec<(u64, Toast)> {
        self.entries.get()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        let id = self.push(toast);
        #[cfg(feature = "hydrate")]
        {
            let queue = *self;
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_LIFETIME_MS)).await;
                queue.dismiss(id);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}

fn toast_class(toast: &Toast) -> &'static str {
    if toast.is_error() { "toast toast--destructive" } else { "toast" }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let queue = expect_context::<ToastQueue>();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || queue.visible()
                key=|(id, _)| *id
                children=move |(id, toast)| {
                    view! {
                        <div class=toast_class(&toast) on:click=move |_| queue.dismiss(id)>
                            <div class="toast__title">{toast.title.clone()}</div>
                            <div>{toast.description.clone()}</div>
                        </div>
                    }
                }
            />
        </div>
    }
}
