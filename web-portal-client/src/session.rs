//! Client side session state.
//!
//! [ClientState] is the single record the views render from. The session itself is a small state
//! machine so a dashboard without a token cannot be expressed, and every transition that touches
//! it is a named method. Only [SessionManager][crate::manager::SessionManager] drives the
//! transitions that follow an API call.

use web_portal_common::{AuthSession, Credentials, RegisterRequest, UserProfile};

/// Authentication state of the client
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    /// No token is held
    #[default]
    SignedOut,
    /// A restored token is held but its profile has not been confirmed by the API yet
    Verifying { token: String },
    /// Token confirmed and profile loaded
    SignedIn { token: String, user: UserProfile },
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::SignedOut => None,
            Self::Verifying { token } | Self::SignedIn { token, .. } => Some(token),
        }
    }

    pub const fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::SignedIn { user, .. } => Some(user),
            _ => None,
        }
    }

    pub const fn is_signed_out(&self) -> bool {
        matches!(self, Self::SignedOut)
    }
}

/// Screen offered while signed out
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthView {
    #[default]
    Login,
    Register,
}

/// Screen currently shown. Derived from [ClientState], never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    Login,
    Register,
    Dashboard,
}

/// Field of the [AuthForm] an input is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    FullName,
    Username,
    Email,
    Password,
}

impl FormField {
    /// Field matching an input's `name` attribute
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fullName" => Some(Self::FullName),
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            "password" => Some(Self::Password),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// Input buffer shared by the login and register forms
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl AuthForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        };
        *slot = value;
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        }
    }

    pub fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_owned(),
        }
    }
}

/// Everything the views need: the session, the chosen signed out screen and the form buffer
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientState {
    session: Session,
    auth_view: AuthView,
    form: AuthForm,
}

impl ClientState {
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn view(&self) -> ViewState {
        match (&self.session, self.auth_view) {
            (Session::SignedOut, AuthView::Login) => ViewState::Login,
            (Session::SignedOut, AuthView::Register) => ViewState::Register,
            _ => ViewState::Dashboard,
        }
    }

    /// Update one form field from its input. Unknown field names are ignored.
    pub fn edit_form(&mut self, name: &str, value: String) {
        match FormField::from_name(name) {
            Some(field) => self.form.set(field, value),
            None => log::warn!("Ignoring edit of unknown form field `{name}`"),
        }
    }

    /// Move between the login and register screens. Refused while a token is held since the
    /// dashboard is the only screen for an authenticated client.
    pub fn switch_view(&mut self, target: AuthView) -> bool {
        if !self.session.is_signed_out() {
            log::warn!("Ignoring switch to {target:?} while a session is active");
            return false;
        }
        self.auth_view = target;
        true
    }

    pub(crate) fn begin_verification(&mut self, token: String) {
        log::debug!("Session restored, verifying profile");
        self.session = Session::Verifying { token };
    }

    pub(crate) fn sign_in(&mut self, session: AuthSession) {
        log::debug!("Session started for {}", session.user.username);
        self.session = Session::SignedIn {
            token: session.token,
            user: session.user,
        };
        self.form = AuthForm::default();
    }

    /// Attach a freshly fetched profile to the held token. Returns false, leaving state untouched,
    /// when `token` is not the token currently held.
    pub(crate) fn confirm_profile(&mut self, token: &str, user: UserProfile) -> bool {
        if self.session.token() != Some(token) {
            return false;
        }
        self.session = Session::SignedIn {
            token: token.to_owned(),
            user,
        };
        true
    }

    pub(crate) fn sign_out(&mut self) {
        log::debug!("Session cleared");
        self.session = Session::SignedOut;
        self.auth_view = AuthView::Login;
    }
}

#[cfg(test)]
mod test {
    use rstest::{fixture, rstest};
    use web_portal_common::{AuthSession, UserProfile};

    use super::{AuthForm, AuthView, ClientState, FormField, Session, ViewState};

    #[fixture]
    fn user() -> UserProfile {
        UserProfile {
            full_name: "A B".to_owned(),
            username: "a".to_owned(),
            email: "a@b.com".to_owned(),
            created_at: None,
        }
    }

    fn signed_in(user: UserProfile) -> ClientState {
        let mut state = ClientState::default();
        state.sign_in(AuthSession {
            token: "t1".to_owned(),
            user,
        });
        state
    }

    #[test]
    fn default_state_should_show_login() {
        let state = ClientState::default();

        assert_eq!(state.view(), ViewState::Login);
        assert_eq!(state.session(), &Session::SignedOut);
    }

    #[test]
    fn switch_view_should_move_between_auth_screens_when_signed_out() {
        let mut state = ClientState::default();

        assert!(state.switch_view(AuthView::Register));
        assert_eq!(state.view(), ViewState::Register);
        assert!(state.switch_view(AuthView::Login));
        assert_eq!(state.view(), ViewState::Login);
    }

    #[rstest]
    fn switch_view_should_be_refused_when_signed_in(user: UserProfile) {
        let mut state = signed_in(user);

        assert!(!state.switch_view(AuthView::Register));
        assert_eq!(state.view(), ViewState::Dashboard);
    }

    #[test]
    fn switch_view_should_be_refused_while_verifying() {
        let mut state = ClientState::default();
        state.begin_verification("t1".to_owned());

        assert!(!state.switch_view(AuthView::Register));
        assert_eq!(state.view(), ViewState::Dashboard);
        assert_eq!(state.session().user(), None);
    }

    #[rstest]
    fn sign_in_should_clear_form(user: UserProfile) {
        let mut state = ClientState::default();
        state.edit_form("email", "a@b.com".to_owned());
        state.edit_form("password", "secret1".to_owned());
        state.sign_in(AuthSession {
            token: "t1".to_owned(),
            user: user.clone(),
        });

        assert_eq!(state.form(), &AuthForm::default());
        assert_eq!(state.session().token(), Some("t1"));
        assert_eq!(state.session().user(), Some(&user));
    }

    #[rstest]
    fn confirm_profile_should_ignore_other_token(user: UserProfile) {
        let mut state = ClientState::default();
        state.begin_verification("t1".to_owned());

        assert!(!state.confirm_profile("t0", user.clone()));
        assert_eq!(state.session().user(), None);
        assert!(state.confirm_profile("t1", user.clone()));
        assert_eq!(state.session().user(), Some(&user));
    }

    #[rstest]
    fn sign_out_should_return_to_login_from_register(user: UserProfile) {
        let mut state = ClientState::default();
        state.switch_view(AuthView::Register);
        state.sign_in(AuthSession {
            token: "t1".to_owned(),
            user,
        });

        state.sign_out();

        assert_eq!(state.session(), &Session::SignedOut);
        assert_eq!(state.view(), ViewState::Login);
    }

    #[rstest]
    #[case(FormField::FullName)]
    #[case(FormField::Username)]
    #[case(FormField::Email)]
    #[case(FormField::Password)]
    fn edit_form_should_update_named_field(#[case] field: FormField) {
        let mut state = ClientState::default();

        state.edit_form(field.name(), "value".to_owned());

        assert_eq!(state.form().value(field), "value");
    }

    #[test]
    fn edit_form_should_ignore_unknown_field() {
        let mut state = ClientState::default();

        state.edit_form("nickname", "value".to_owned());

        assert_eq!(state.form(), &AuthForm::default());
    }

    #[test]
    fn form_requests_should_trim_text_fields_but_not_password() {
        let form = AuthForm {
            username: " a ".to_owned(),
            email: " a@b.com ".to_owned(),
            password: " secret1 ".to_owned(),
            full_name: " A B ".to_owned(),
        };

        let credentials = form.credentials();
        let request = form.register_request();

        assert_eq!(credentials.email, "a@b.com");
        assert_eq!(credentials.password, " secret1 ");
        assert_eq!(request.username, "a");
        assert_eq!(request.full_name, "A B");
        assert_eq!(request.password, " secret1 ");
    }
}
