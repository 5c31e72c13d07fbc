use secrecy::SecretString;

use crate::{
    datasource::account::{Account, AccountIdentifier, AddRequest, SetPasswordRequest},
    recipe::{any::AnyRecipe, unsupported::UnsupportedRecipe},
};

/// The five operations a command-line credential tool provides
///
/// Each field is a bound recipe, usually a
/// [`CommandRecipe`](crate::recipe::command::CommandRecipe) wrapping one tool
/// invocation. Operations the tool lacks can be filled with an
/// [`UnsupportedRecipe`].
///
/// # Examples
///
/// ```rust
/// use secretcmd::{
///     datasource::{account::Account, configuration::Configuration},
///     recipe::any::AnyRecipe,
/// };
///
/// let configuration = Configuration::unsupported("read-only demo").with_list(
///     AnyRecipe::from_fn(|()| async { Ok(vec![Account::new("1", "example.com", "alice")]) }),
/// );
/// # let _ = configuration;
/// ```
#[derive(Debug, Clone)]
pub struct Configuration {
    pub list_accounts: AnyRecipe<(), Vec<Account>>,
    pub get_password: AnyRecipe<AccountIdentifier, SecretString>,
    pub set_password: AnyRecipe<SetPasswordRequest, ()>,
    pub delete: AnyRecipe<AccountIdentifier, ()>,
    pub add_account: AnyRecipe<AddRequest, AccountIdentifier>,
}

impl Configuration {
    /// A configuration where every operation fails with `reason`.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            list_accounts: AnyRecipe::new(UnsupportedRecipe::new(reason.clone())),
            get_password: AnyRecipe::new(UnsupportedRecipe::new(reason.clone())),
            set_password: AnyRecipe::new(UnsupportedRecipe::new(reason.clone())),
            delete: AnyRecipe::new(UnsupportedRecipe::new(reason.clone())),
            add_account: AnyRecipe::new(UnsupportedRecipe::new(reason)),
        }
    }

    pub fn with_list(mut self, recipe: AnyRecipe<(), Vec<Account>>) -> Self {
        self.list_accounts = recipe;
        self
    }

    pub fn with_get_password(mut self, recipe: AnyRecipe<AccountIdentifier, SecretString>) -> Self {
        self.get_password = recipe;
        self
    }

    pub fn with_set_password(mut self, recipe: AnyRecipe<SetPasswordRequest, ()>) -> Self {
        self.set_password = recipe;
        self
    }

    pub fn with_delete(mut self, recipe: AnyRecipe<AccountIdentifier, ()>) -> Self {
        self.delete = recipe;
        self
    }

    pub fn with_add_account(mut self, recipe: AnyRecipe<AddRequest, AccountIdentifier>) -> Self {
        self.add_account = recipe;
        self
    }
}
