use leptos::*;

use crate::{
    components::{CredentialsForm, FormInput},
    session::{AuthView, ClientState, FormField},
};

#[component]
pub fn LoginPage<F>(
    cx: Scope,
    state: RwSignal<ClientState>,
    submit: Action<(), ()>,
    #[prop(into)] busy: Signal<bool>,
    on_switch: F,
) -> impl IntoView
where
    F: Fn(AuthView) + 'static + Clone + Copy,
{
    view! { cx,
        <CredentialsForm
            title="Login to Student Management"
            submit_label="Login"
            submit=submit
            busy=busy
        >
            <FormInput state=state field=FormField::Email label="Email:" input_type="email"/>
            <FormInput state=state field=FormField::Password label="Password:" input_type="password"/>
        </CredentialsForm>
        <p class="auth-switch">
            "Don't have an account? "
            <button type="button" class="link-btn" on:click=move |_| on_switch(AuthView::Register)>
                "Register here"
            </button>
        </p>
    }
}
