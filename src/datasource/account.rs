use std::fmt;

use secrecy::SecretString;

/// Opaque key the backing tool uses to address one stored secret
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountIdentifier(String);

impl AccountIdentifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountIdentifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountIdentifier {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// One entry as reported by the tool's list operation
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub identifier: AccountIdentifier,
    pub user_name: String,
    pub account_name: String,
}

impl Account {
    pub fn new(
        identifier: impl Into<AccountIdentifier>,
        account_name: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            user_name: user_name.into(),
            account_name: account_name.into(),
        }
    }
}

/// Input of the set-password operation
#[derive(Debug)]
pub struct SetPasswordRequest {
    pub account_identifier: AccountIdentifier,
    pub new_password: SecretString,
}

impl SetPasswordRequest {
    pub fn new(account_identifier: AccountIdentifier, new_password: impl Into<String>) -> Self {
        Self {
            account_identifier,
            new_password: SecretString::new(new_password.into().into_boxed_str()),
        }
    }
}

/// Input of the add-account operation
#[derive(Debug)]
pub struct AddRequest {
    pub user_name: String,
    pub account_name: String,
    pub password: SecretString,
}

impl AddRequest {
    pub fn new(
        user_name: impl Into<String>,
        account_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            account_name: account_name.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }
}
