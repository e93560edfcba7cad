use leptos::*;
use web_portal_common::PASSWORD_MIN_LENGTH;

use crate::{
    components::{CredentialsForm, FormInput},
    session::{AuthView, ClientState, FormField},
};

#[component]
pub fn RegisterPage<F>(
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
            title="Register for Student Management"
            submit_label="Register"
            submit=submit
            busy=busy
        >
            <FormInput state=state field=FormField::FullName label="Full Name:" input_type="text"/>
            <FormInput state=state field=FormField::Username label="Username:" input_type="text"/>
            <FormInput state=state field=FormField::Email label="Email:" input_type="email"/>
            <FormInput
                state=state
                field=FormField::Password
                label="Password:"
                input_type="password"
                min_length=PASSWORD_MIN_LENGTH
            />
        </CredentialsForm>
        <p class="auth-switch">
            "Already have an account? "
            <button type="button" class="link-btn" on:click=move |_| on_switch(AuthView::Login)>
                "Login here"
            </button>
        </p>
    }
}
