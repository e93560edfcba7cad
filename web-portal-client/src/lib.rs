pub mod api;
mod components;
pub mod config;
pub mod manager;
mod pages;
pub mod session;
pub mod storage;

use leptos::*;

use crate::{
    api::HttpAuthApi,
    components::Toast,
    config::ClientConfig,
    manager::{Notice, SessionError, SessionManager},
    pages::{dashboard::DashboardPage, login::LoginPage, register::RegisterPage},
    session::{AuthView, ClientState, ViewState},
    storage::LocalTokenStore,
};

/// Publish `after` unless the operation left the state as it found it. Skipping the write keeps
/// input typed while a failed request was in flight.
fn publish(state: RwSignal<ClientState>, before: &ClientState, after: ClientState) {
    if &after != before {
        state.set(after);
    }
}

fn into_notice(result: Result<Notice, SessionError>) -> Notice {
    match result {
        Ok(notice) => notice,
        Err(error) => Notice::from(&error),
    }
}

#[component]
pub fn App(cx: Scope) -> impl IntoView {
    let config = ClientConfig::from_env();
    let manager = SessionManager::new(
        HttpAuthApi::new(config.clone()),
        LocalTokenStore::new(config.token_key),
    );

    let mut initial = ClientState::default();
    let restored = manager.restore(&mut initial);
    let state = create_rw_signal(cx, initial);
    let notice = create_rw_signal(cx, None::<Notice>);
    let verifying = create_rw_signal(cx, restored.is_some());

    if let Some(token) = restored {
        let manager = manager.clone();
        spawn_local(async move {
            let mut next = state.get_untracked();
            manager.verify_profile(&mut next, &token).await;
            state.set(next);
            verifying.set(false);
        });
    }

    let login = {
        let manager = manager.clone();
        create_action(cx, move |_: &()| {
            let manager = manager.clone();
            async move {
                let mut next = state.get_untracked();
                let before = next.clone();
                let credentials = next.form().credentials();
                let result = manager.login(&mut next, credentials).await;
                notice.set(Some(into_notice(result)));
                publish(state, &before, next);
            }
        })
    };

    let register = {
        let manager = manager.clone();
        create_action(cx, move |_: &()| {
            let manager = manager.clone();
            async move {
                let mut next = state.get_untracked();
                let before = next.clone();
                let request = next.form().register_request();
                let result = manager.register(&mut next, request).await;
                notice.set(Some(into_notice(result)));
                publish(state, &before, next);
            }
        })
    };

    let manager = store_value(cx, manager);
    let on_logout = move || {
        let mut next = state.get_untracked();
        notice.set(Some(manager.with_value(|manager| manager.logout(&mut next))));
        state.set(next);
    };

    let busy = Signal::derive(cx, move || {
        verifying.get() || login.pending().get() || register.pending().get()
    });
    let on_switch = move |target: AuthView| {
        state.update(|s| {
            s.switch_view(target);
        });
    };
    let view_state = create_memo(cx, move |_| state.with(ClientState::view));

    view! { cx,
        <div class="App">
            <Toast notice=notice/>
            {move || match view_state.get() {
                ViewState::Login => view! { cx,
                    <LoginPage state=state submit=login busy=busy on_switch=on_switch/>
                }
                .into_view(cx),
                ViewState::Register => view! { cx,
                    <RegisterPage state=state submit=register busy=busy on_switch=on_switch/>
                }
                .into_view(cx),
                ViewState::Dashboard => view! { cx,
                    <DashboardPage state=state busy=busy on_logout=on_logout/>
                }
                .into_view(cx),
            }}
        </div>
    }
}

#[cfg(test)]
mod test {
    use super::into_notice;
    use crate::manager::{Notice, NoticeKind, SessionError};

    #[test]
    fn into_notice_should_report_validation_reason() {
        let error = SessionError::Invalid(common::error::PortalError::InvalidRequest {
            request: "RegisterRequest".to_owned(),
            reason: "Password must be at least 6 characters".to_owned(),
        });

        let notice = into_notice(Err(error));

        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Password must be at least 6 characters");
    }

    #[test]
    fn into_notice_should_pass_success_through() {
        let notice = into_notice(Ok(Notice::success("Login successful!")));

        assert_eq!(notice, Notice::success("Login successful!"));
    }
}
