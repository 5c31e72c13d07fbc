use std::sync::Arc;

use secrecy::SecretString;

use crate::{
    command::error::CommandError,
    datasource::{
        account::{AccountIdentifier, AddRequest, SetPasswordRequest},
        configuration::Configuration,
    },
    recipe::Recipe,
};

/// An account handle bound to the configuration that listed it
#[derive(Debug, Clone)]
pub struct ProvidedAccount {
    configuration: Arc<Configuration>,
    identifier: AccountIdentifier,
    account_name: String,
    user_name: String,
}

impl ProvidedAccount {
    pub fn identifier(&self) -> &AccountIdentifier {
        &self.identifier
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Account and user name separated by an en-space padded em dash.
    pub fn display_string(&self) -> String {
        format!(
            "{}\u{2002}\u{2014}\u{2002}{}",
            self.account_name, self.user_name
        )
    }

    /// Case-insensitive match on the account or user name.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.to_lowercase();
        self.account_name.to_lowercase().contains(&filter)
            || self.user_name.to_lowercase().contains(&filter)
    }

    pub async fn password(&self) -> Result<SecretString, CommandError> {
        self.configuration
            .get_password
            .transform(self.identifier.clone())
            .await
    }

    pub async fn set_password(&self, password: impl Into<String>) -> Result<(), CommandError> {
        let request = SetPasswordRequest::new(self.identifier.clone(), password);
        self.configuration.set_password.transform(request).await
    }

    pub async fn delete(&self) -> Result<(), CommandError> {
        self.configuration
            .delete
            .transform(self.identifier.clone())
            .await
    }
}

/// Credential source backed by a command-line tool
///
/// # Examples
///
/// ```rust
/// use secretcmd::datasource::{configuration::Configuration, source::CommandLineDataSource};
///
/// #[tokio::main]
/// async fn main() {
///     let source = CommandLineDataSource::new(Configuration::unsupported("not installed"));
///     assert!(source.accounts().await.is_empty());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CommandLineDataSource {
    configuration: Arc<Configuration>,
}

impl CommandLineDataSource {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration: Arc::new(configuration),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn bind(
        &self,
        identifier: AccountIdentifier,
        account_name: String,
        user_name: String,
    ) -> ProvidedAccount {
        ProvidedAccount {
            configuration: Arc::clone(&self.configuration),
            identifier,
            account_name,
            user_name,
        }
    }

    /// Lists every account. A failing list operation yields an empty list.
    pub async fn accounts(&self) -> Vec<ProvidedAccount> {
        match self.configuration.list_accounts.transform(()).await {
            Ok(accounts) => accounts
                .into_iter()
                .map(|account| {
                    self.bind(account.identifier, account.account_name, account.user_name)
                })
                .collect(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "Failed to list accounts");
                Vec::new()
            }
        }
    }

    /// Accounts whose account or user name contains `filter`, ignoring case.
    pub async fn matching_accounts(&self, filter: &str) -> Vec<ProvidedAccount> {
        let mut accounts = self.accounts().await;
        accounts.retain(|account| account.matches(filter));
        accounts
    }

    /// Adds an account and returns a handle to it.
    ///
    /// # Errors
    ///
    /// Returns whatever error the add-account recipe reports.
    pub async fn add_account(
        &self,
        user_name: impl Into<String>,
        account_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<ProvidedAccount, CommandError> {
        let request = AddRequest::new(user_name, account_name, password);
        let user_name = request.user_name.clone();
        let account_name = request.account_name.clone();
        let identifier = self.configuration.add_account.transform(request).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(identifier = %identifier, "Account added");

        Ok(self.bind(identifier, account_name, user_name))
    }
}
