//! Navigation flow - Login, then business type selection, then billing.
//!
//! The flow is linear. Each transition checks that it is taken from the screen that offers
//! it and returns [`Error::Navigation`] otherwise, so a front-end cannot skip the sign-in.

use crate::{
    core::auth::{CredentialChecker, Operator, validate_login_fields},
    errors::{Error, Result},
};
use std::{fmt, str::FromStr};
use tracing::info;

/// The screen the operator is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Username and password entry
    Login,
    /// Choosing what kind of business is being run
    BusinessTypeSelection,
    /// Building and printing bills
    Billing,
}

impl Screen {
    /// Lowercase screen name used in prompts and errors.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::BusinessTypeSelection => "business type",
            Self::Billing => "billing",
        }
    }
}

/// Kinds of business the counter can be set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessType {
    /// Cafes, restaurants and food service
    Restaurant,
    /// Large stores with departments
    Supermarket,
    /// Local grocery stores
    Grocery,
    /// Convenience and general merchandise
    GeneralStore,
    /// Specialty and boutique shops
    Retail,
}

impl BusinessType {
    /// Every business type in display order.
    pub const ALL: [Self; 5] = [
        Self::Restaurant,
        Self::Supermarket,
        Self::Grocery,
        Self::GeneralStore,
        Self::Retail,
    ];

    /// Name shown in the business type list.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Restaurant => "Restaurant",
            Self::Supermarket => "Supermarket",
            Self::Grocery => "Grocery",
            Self::GeneralStore => "General Store",
            Self::Retail => "Retail",
        }
    }

    /// One-line description shown under the label.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Restaurant => "For cafes, restaurants, and food service businesses",
            Self::Supermarket => "For large retail stores with multiple departments",
            Self::Grocery => "For local grocery stores and food markets",
            Self::GeneralStore => "For convenience stores and general merchandise",
            Self::Retail => "For specialty retail and boutique shops",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BusinessType {
    type Err = Error;

    /// Accepts the label in any case, with a space, dash or underscore between words.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|kind| kind.label().replace(' ', "").to_lowercase() == normalized)
            .ok_or_else(|| Error::validation(format!("Unknown business type '{}'", s.trim())))
    }
}

/// Where the operator is and what they chose so far.
#[derive(Debug, Clone)]
pub struct Flow {
    screen: Screen,
    operator: Option<Operator>,
    selected: Option<BusinessType>,
    business_type: Option<BusinessType>,
}

impl Default for Flow {
    fn default() -> Self {
        Self::new()
    }
}

impl Flow {
    /// A flow waiting on the login screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            screen: Screen::Login,
            operator: None,
            selected: None,
            business_type: None,
        }
    }

    /// The screen the operator is on.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// The signed-in operator, if any.
    #[must_use]
    pub const fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    /// The business type highlighted but not yet confirmed.
    #[must_use]
    pub const fn selected_business_type(&self) -> Option<BusinessType> {
        self.selected
    }

    /// The business type confirmed with [`Flow::proceed`].
    #[must_use]
    pub const fn business_type(&self) -> Option<BusinessType> {
        self.business_type
    }

    /// Signs in through `checker` and moves on to business type selection.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for empty fields, whatever the checker rejects with,
    /// or [`Error::Navigation`] when not on the login screen.
    pub async fn login(
        &mut self,
        checker: &dyn CredentialChecker,
        username: &str,
        password: &str,
    ) -> Result<&Operator> {
        self.expect_screen(Screen::Login, "login")?;
        validate_login_fields(username, password)?;

        let operator = checker.verify(username, password).await?;
        self.screen = Screen::BusinessTypeSelection;
        Ok(&*self.operator.insert(operator))
    }

    /// Highlights a business type; nothing changes screen until [`Flow::proceed`].
    ///
    /// # Errors
    /// Returns [`Error::Navigation`] when not on the business type screen.
    pub fn select_business_type(&mut self, kind: BusinessType) -> Result<()> {
        self.expect_screen(Screen::BusinessTypeSelection, "select")?;
        self.selected = Some(kind);
        Ok(())
    }

    /// Confirms the highlighted business type and opens the billing screen.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if nothing was selected, or [`Error::Navigation`]
    /// when not on the business type screen.
    pub fn proceed(&mut self) -> Result<BusinessType> {
        self.expect_screen(Screen::BusinessTypeSelection, "next")?;
        let kind = self
            .selected
            .ok_or_else(|| Error::validation("Please select a business type"))?;

        info!("Selected business type: {}", kind);
        self.business_type = Some(kind);
        self.screen = Screen::Billing;
        Ok(kind)
    }

    /// Returns to the login screen and forgets the operator and their choices.
    pub fn logout(&mut self) {
        if let Some(operator) = self.operator.take() {
            info!("Operator '{}' signed out", operator.username);
        }
        *self = Self::new();
    }

    /// Fails with [`Error::Navigation`] unless the flow is on `screen`.
    ///
    /// # Errors
    /// See above.
    pub fn expect_screen(&self, screen: Screen, action: &'static str) -> Result<()> {
        if self.screen != screen {
            return Err(Error::Navigation {
                action,
                screen: self.screen.title(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_full_flow_reaches_billing() {
        let checker = test_checker();
        let mut flow = Flow::new();

        let operator = flow
            .login(&checker, TEST_USERNAME, TEST_PASSWORD)
            .await
            .unwrap();
        assert_eq!(operator.username, TEST_USERNAME);
        assert_eq!(flow.screen(), Screen::BusinessTypeSelection);

        flow.select_business_type(BusinessType::Restaurant).unwrap();
        assert_eq!(flow.proceed().unwrap(), BusinessType::Restaurant);
        assert_eq!(flow.screen(), Screen::Billing);
        assert_eq!(flow.business_type(), Some(BusinessType::Restaurant));
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let mut flow = Flow::new();
        let result = flow.login(&test_checker(), TEST_USERNAME, "").await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(flow.screen(), Screen::Login);
    }

    #[tokio::test]
    async fn test_wrong_password_stays_on_login() {
        let mut flow = Flow::new();
        let result = flow.login(&test_checker(), TEST_USERNAME, "nope").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
        assert_eq!(flow.screen(), Screen::Login);
        assert!(flow.operator().is_none());
    }

    #[tokio::test]
    async fn test_proceed_requires_selection() {
        let mut flow = Flow::new();
        flow.login(&test_checker(), TEST_USERNAME, TEST_PASSWORD)
            .await
            .unwrap();

        let err = flow.proceed().unwrap_err();
        assert_eq!(err.to_string(), "Please select a business type");
        assert_eq!(flow.screen(), Screen::BusinessTypeSelection);
    }

    #[test]
    fn test_cannot_skip_login() {
        let mut flow = Flow::new();
        assert!(matches!(
            flow.select_business_type(BusinessType::Retail),
            Err(Error::Navigation { .. })
        ));
        assert!(matches!(flow.proceed(), Err(Error::Navigation { .. })));
    }

    #[tokio::test]
    async fn test_logout_resets_everything() {
        let mut flow = Flow::new();
        flow.login(&test_checker(), TEST_USERNAME, TEST_PASSWORD)
            .await
            .unwrap();
        flow.select_business_type(BusinessType::Grocery).unwrap();
        flow.proceed().unwrap();

        flow.logout();
        assert_eq!(flow.screen(), Screen::Login);
        assert!(flow.operator().is_none());
        assert!(flow.business_type().is_none());
    }

    #[test]
    fn test_parse_business_type() {
        assert_eq!(
            "general store".parse::<BusinessType>().unwrap(),
            BusinessType::GeneralStore
        );
        assert_eq!(
            "General-Store".parse::<BusinessType>().unwrap(),
            BusinessType::GeneralStore
        );
        assert_eq!(
            " RESTAURANT ".parse::<BusinessType>().unwrap(),
            BusinessType::Restaurant
        );
        assert!("bakery".parse::<BusinessType>().is_err());
    }
}
