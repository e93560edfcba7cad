mod credentials;
mod toast;

pub use credentials::{CredentialsForm, FormInput};
pub use toast::Toast;
