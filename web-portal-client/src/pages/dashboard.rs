use leptos::*;
use web_portal_common::UserProfile;

use crate::session::ClientState;

pub fn greeting(user: &UserProfile) -> String {
    format!("Hello, {}!", user.display_name())
}

/// Label and value of each line of the profile panel, in display order
pub fn profile_details(user: &UserProfile) -> [(&'static str, String); 4] {
    let created = user
        .created_at
        .map_or_else(|| "-".to_owned(), |created| created.display_date());
    [
        ("Full Name", user.full_name.clone()),
        ("Username", user.username.clone()),
        ("Email", user.email.clone()),
        ("Account Created", created),
    ]
}

#[component]
pub fn DashboardPage<F>(
    cx: Scope,
    state: RwSignal<ClientState>,
    #[prop(into)] busy: Signal<bool>,
    on_logout: F,
) -> impl IntoView
where
    F: Fn() + 'static + Clone + Copy,
{
    let user = create_memo(cx, move |_| state.with(|s| s.session().user().cloned()));
    view! { cx,
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Welcome to Our Platform"</h1>
                <div class="user-info">
                    <span>{move || user.get().map(|u| greeting(&u))}</span>
                    <button
                        class="logout-btn"
                        prop:disabled=move || busy.get()
                        on:click=move |_| on_logout()
                    >
                        "Logout"
                    </button>
                </div>
            </header>
            <div class="container">
                {move || match user.get() {
                    Some(user) => view! { cx, <ProfileDetails user=user/> }.into_view(cx),
                    None => view! { cx, <p class="loading">"Loading your profile..."</p> }.into_view(cx),
                }}
            </div>
        </div>
    }
}

#[component]
fn ProfileDetails(cx: Scope, user: UserProfile) -> impl IntoView {
    let rows = profile_details(&user)
        .into_iter()
        .map(|(label, value)| {
            view! { cx, <p><strong>{format!("{label}:")}</strong>" "{value}</p> }
        })
        .collect::<Vec<_>>();
    view! { cx,
        <div class="welcome-section">
            <h2>"Authentication Successful!"</h2>
            <div class="user-details">
                <h3>"Your Profile Information:"</h3>
                {rows}
            </div>
            <div class="dashboard-features">
                <h3>"You have successfully:"</h3>
                <ul>
                    <li>"Registered your account securely"</li>
                    <li>"Logged in with token authentication"</li>
                    <li>"Accessed your protected dashboard"</li>
                </ul>
            </div>
        </div>
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use web_portal_common::{AuthSession, UserProfile};

    use super::{greeting, profile_details};

    fn user(full_name: &str, created_at: Option<&str>) -> UserProfile {
        UserProfile {
            full_name: full_name.to_owned(),
            username: "a".to_owned(),
            email: "a@b.com".to_owned(),
            created_at: created_at.and_then(web_portal_common::Timestamp::parse),
        }
    }

    #[test]
    fn login_response_should_render_expected_dashboard() -> Result<(), serde_json::Error> {
        let body = r#"{"token":"t1","user":{"username":"a","fullName":"A B","email":"a@b.com","createdAt":"2024-01-01"}}"#;
        let session: AuthSession = serde_json::from_str(body)?;

        assert_eq!(greeting(&session.user), "Hello, A B!");
        assert_eq!(
            profile_details(&session.user),
            [
                ("Full Name", "A B".to_owned()),
                ("Username", "a".to_owned()),
                ("Email", "a@b.com".to_owned()),
                ("Account Created", "2024-01-01".to_owned()),
            ]
        );
        Ok(())
    }

    #[rstest]
    #[case::full_name("A B", "Hello, A B!")]
    #[case::username_fallback("", "Hello, a!")]
    fn greeting_should_use_display_name(#[case] full_name: &str, #[case] expected: &str) {
        assert_eq!(greeting(&user(full_name, None)), expected);
    }

    #[test]
    fn profile_details_should_show_dash_when_created_unknown() {
        let [.., (label, value)] = profile_details(&user("A B", None));

        assert_eq!(label, "Account Created");
        assert_eq!(value, "-");
    }
}
