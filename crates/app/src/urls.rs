//! Public site URLs handed to the payment provider for redirects.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUrls {
    base: String,
}

impl AppUrls {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();

        while base.ends_with('/') {
            base.pop();
        }

        Self { base }
    }

    /// Where buyers land after paying.
    #[must_use]
    pub fn checkout_success(&self) -> String {
        format!("{}/account/purchases?success=true", self.base)
    }

    /// Where buyers land after abandoning checkout.
    #[must_use]
    pub fn product_page(&self, slug: &str) -> String {
        format!("{}/product/{slug}", self.base)
    }

    /// Refresh and return target for seller onboarding.
    #[must_use]
    pub fn seller_settings(&self) -> String {
        format!("{}/seller/settings", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        let urls = AppUrls::new("https://bazaar.test//");

        assert_eq!(
            urls.checkout_success(),
            "https://bazaar.test/account/purchases?success=true"
        );
        assert_eq!(
            urls.product_page("prompt-kit-a1b2c3"),
            "https://bazaar.test/product/prompt-kit-a1b2c3"
        );
        assert_eq!(urls.seller_settings(), "https://bazaar.test/seller/settings");
    }
}
