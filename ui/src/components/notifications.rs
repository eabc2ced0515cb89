//! Toast notifications and the browser side of ETL submission

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use crate::etl::SubmitEffects;

const TOAST_MILLIS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: u64,
    level: ToastLevel,
    message: String,
}

/// App-wide notification queue, provided as context by the root component
#[derive(Clone, Copy)]
pub struct Notifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|toasts| toasts.push(Toast { id, level, message }));

        let notifier = *self;
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(TOAST_MILLIS).await;
            notifier.dismiss(id);
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn Toasts() -> impl IntoView {
    let notifier = expect_context::<Notifier>();

    view! {
        <div class="fixed top-4 right-4 z-[60] space-y-2 w-96">
            <For
                each=move || notifier.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.level {
                        ToastLevel::Info => "bg-blue-50 border-blue-200 text-blue-800",
                        ToastLevel::Error => "bg-red-50 border-red-200 text-red-700",
                    };
                    view! {
                        <div class=format!("flex justify-between items-start gap-3 p-3 border rounded shadow text-sm {}", class)>
                            <span>{toast.message}</span>
                            <button
                                class="text-gray-400 hover:text-gray-600"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Submission effects backed by the toast queue and `window.open`
pub struct BrowserEffects {
    notifier: Notifier,
}

impl BrowserEffects {
    pub fn new(notifier: Notifier) -> Self {
        Self { notifier }
    }
}

impl SubmitEffects for BrowserEffects {
    fn notify_info(&self, message: &str) {
        self.notifier.info(message);
    }

    fn notify_error(&self, message: &str) {
        self.notifier.error(message);
    }

    fn open_tab(&self, url: &str) {
        let opened = web_sys::window()
            .and_then(|w| w.open_with_url_and_target(url, "_blank").ok())
            .flatten();
        if opened.is_none() {
            log::warn!("Could not open a new tab at {}", url);
        }
    }
}
