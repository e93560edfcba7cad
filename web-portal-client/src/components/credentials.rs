use leptos::*;

use crate::session::{ClientState, FormField};

/// Labelled input bound to one field of the shared auth form
#[component]
pub fn FormInput(
    cx: Scope,
    state: RwSignal<ClientState>,
    field: FormField,
    label: &'static str,
    input_type: &'static str,
    #[prop(optional)] min_length: Option<usize>,
) -> impl IntoView {
    let name = field.name();
    view! { cx,
        <div class="form-group">
            <label for=name>{label}</label>
            <input
                class="form-control"
                type=input_type
                id=name
                name=name
                required
                minlength=min_length.map(|length| length.to_string())
                prop:value=move || state.with(|s| s.form().value(field).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.edit_form(name, value));
                }
            />
        </div>
    }
}

/// Auth form wrapper that submits through `submit` unless a request is already in flight
#[component]
pub fn CredentialsForm(
    cx: Scope,
    title: &'static str,
    submit_label: &'static str,
    submit: Action<(), ()>,
    #[prop(into)] busy: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! { cx,
        <div class="auth-container">
            <div class="auth-card">
                <h2>{title}</h2>
                <form on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    if !busy.get() {
                        submit.dispatch(());
                    }
                }>
                    {children(cx)}
                    <button type="submit" class="auth-btn" prop:disabled=move || busy.get()>
                        {submit_label}
                    </button>
                </form>
            </div>
        </div>
    }
}
