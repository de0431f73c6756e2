use crate::driver::{Driver, find_first, find_optional, is_present};
use crate::site::Site;
use crate::wait::wait_for_element;
use quill_common::protocol::{Endpoint, Locator};
use quill_common::{QuillError, Result};
use tracing::info;

fn logout_link() -> Locator {
    Locator::css("a[href=\"/logout\"]")
}

fn login_link() -> Locator {
    Locator::css("a[href=\"/login\"]")
}

impl<D: Driver + ?Sized> Site<'_, D> {
    /// Authenticated iff the page offers a logout link.
    pub async fn is_logged_in(&mut self) -> Result<bool> {
        is_present(self.driver, &logout_link()).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if self.is_logged_in().await? {
            return Err(QuillError::PreconditionViolation(
                "login while already logged in".into(),
            ));
        }
        self.switch_to(Endpoint::Login).await?;
        info!("logging in as {}", username);

        let user = find_first(self.driver, &Locator::id("username")).await?;
        self.driver.set_text(user, username).await?;
        let value = self.driver.value(user).await?;
        self.log
            .record("login.username", value.as_deref() == Some(username));

        let pass = find_first(self.driver, &Locator::id("password")).await?;
        self.driver.set_text(pass, password).await?;
        let value = self.driver.value(pass).await?;
        self.log
            .record("login.password", value.as_deref() == Some(password));

        let submit = find_first(self.driver, &Locator::css("input[type=\"submit\"]")).await?;
        self.driver.click(submit).await?;

        let timeouts = &self.config.timeouts;
        let link = wait_for_element(
            self.driver,
            &logout_link(),
            timeouts.session(),
            timeouts.poll_interval(),
        )
        .await?;
        self.driver.release(&[link]).await;
        let present = self.is_logged_in().await?;
        Ok(self.log.record("login.logout_link", present))
    }

    pub async fn logout(&mut self) -> Result<bool> {
        let Some(link) = find_optional(self.driver, &logout_link()).await? else {
            return Err(QuillError::PreconditionViolation(
                "logout while not logged in".into(),
            ));
        };
        info!("logging out");
        self.driver.click(link).await?;

        let timeouts = &self.config.timeouts;
        let link = wait_for_element(
            self.driver,
            &login_link(),
            timeouts.session(),
            timeouts.poll_interval(),
        )
        .await?;
        self.driver.release(&[link]).await;
        let present = is_present(self.driver, &login_link()).await?;
        Ok(self.log.record("logout.login_link", present))
    }
}
