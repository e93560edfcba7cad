use leptos::*;

use crate::manager::{Notice, NoticeKind};

const fn toast_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "toast fade show toast-success",
        NoticeKind::Error => "toast fade show toast-error",
    }
}

/// Dismissible toast showing the latest [Notice], if any
#[component]
pub fn Toast(cx: Scope, notice: RwSignal<Option<Notice>>) -> impl IntoView {
    view! { cx,
        <div id="toasts" class="toast-container">
            {move || {
                notice
                    .get()
                    .map(|current| {
                        view! { cx,
                            <div class=toast_class(current.kind) role="alert" aria-live="assertive" aria-atomic="true">
                                <div class="toast-header">
                                    <strong class="me-auto">"Student Management"</strong>
                                    <button
                                        type="button"
                                        class="btn-close"
                                        aria-label="Close"
                                        on:click=move |_| notice.set(None)
                                    ></button>
                                </div>
                                <div class="toast-body">{current.message}</div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
