use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn classes(&self) -> &'static str {
        match self {
            ToastKind::Success => {
                "bg-status-success-bg border-status-success-border text-status-success-text"
            }
            ToastKind::Error => "bg-status-error-bg border-status-error-border text-status-error-text",
            ToastKind::Info => "bg-status-info-bg border-status-info-border text-status-info-text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Clone, Copy)]
pub struct ToastStore {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
            next_id: store_value(1),
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        self.toasts.into()
    }

    /// Adds a toast without scheduling its removal.
    pub fn push(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        let toast = Toast {
            id,
            message: message.into(),
            kind,
        };
        self.toasts.update(|toasts| toasts.push(toast));
        id
    }

    /// Adds a toast that removes itself after the toast lifetime.
    pub fn add(&self, message: impl Into<String>, kind: ToastKind) {
        let id = self.push(message, kind);
        #[cfg(target_arch = "wasm32")]
        {
            let store = *self;
            spawn_local(async move {
                crate::utils::poll::browser_sleep(crate::config::TOAST_LIFETIME).await;
                store.dismiss(id);
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = id;
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(message, ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(message, ToastKind::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.add(message, ToastKind::Info);
    }

    pub fn dismiss(&self, id: u64) {
        // The store may outlive its owner when a timer fires late.
        let _ = self.toasts.try_update(|toasts| toasts.retain(|toast| toast.id != id));
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_toasts() -> ToastStore {
    let store = ToastStore::new();
    provide_context(store);
    store
}

pub fn use_toasts() -> ToastStore {
    use_context::<ToastStore>().unwrap_or_else(provide_toasts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn push_and_dismiss_keep_order() {
        with_runtime(|| {
            let store = ToastStore::new();
            let first = store.push("Saved", ToastKind::Success);
            let second = store.push("Failed", ToastKind::Error);
            assert_ne!(first, second);
            assert_eq!(store.toasts().get_untracked().len(), 2);

            store.dismiss(first);
            let remaining = store.toasts().get_untracked();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].message, "Failed");
            assert_eq!(remaining[0].kind, ToastKind::Error);
        });
    }

    #[test]
    fn use_toasts_shares_the_provided_store() {
        with_runtime(|| {
            let provided = provide_toasts();
            provided.push("hello", ToastKind::Info);
            assert_eq!(use_toasts().toasts().get_untracked().len(), 1);
        });
    }
}
