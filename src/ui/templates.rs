// Askama template definitions

use askama::Template;

use crate::auth::{AccountRole, Flash, Session, SessionContext};
use crate::db::{Item, Page, Product, RegistrationDetails};
use crate::validation::{ItemForm, ProductForm};

/// Custom filters for Askama templates
mod filters {
    /// Escape HTML, then turn line breaks into `<br>`
    pub fn nl2br<T: std::fmt::Display>(s: T) -> ::askama::Result<String> {
        let text = s.to_string();
        let escaped: Vec<String> = text.lines().map(escape_html).collect();
        Ok(escaped.join("<br>"))
    }

    fn escape_html(line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        for c in line.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#x27;"),
                _ => out.push(c),
            }
        }
        out
    }

    #[cfg(test)]
    mod tests {
        #[test]
        fn test_nl2br_escapes_then_breaks() {
            let out = super::nl2br("a<b>\nsecond & last").unwrap();
            assert_eq!(out, "a&lt;b&gt;<br>second &amp; last");
            assert_eq!(super::nl2br("").unwrap(), "");
        }
    }
}

/// Data every page needs: who is logged in, and flashes to show
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub ctx: SessionContext,
    pub flashes: Vec<Flash>,
}

impl Layout {
    /// Snapshot the caller and drain pending flashes
    pub fn from_session(session: &mut Session) -> Self {
        Self {
            ctx: session.context(),
            flashes: session.take_flashes(),
        }
    }

    /// Add errors raised while handling this request
    pub fn with_errors(mut self, errors: &[String]) -> Self {
        self.flashes.extend(errors.iter().map(Flash::error));
        self
    }
}

// Product listing (home page)
#[derive(Template)]
#[template(path = "index.html")]
pub struct ProductsTemplate {
    pub layout: Layout,
    pub page: Page<Product>,
}

#[derive(Template)]
#[template(path = "product_detail.html")]
pub struct ProductDetailTemplate {
    pub layout: Layout,
    pub product: Product,
    pub is_registered: bool,
    /// Status of the caller's registration, empty when not registered
    pub registration_status: String,
}

// Create and edit share one form
#[derive(Template)]
#[template(path = "product_form.html")]
pub struct ProductFormTemplate {
    pub layout: Layout,
    pub heading: &'static str,
    pub action: String,
    pub cancel_url: String,
    pub form: ProductForm,
}

#[derive(Template)]
#[template(path = "items.html")]
pub struct ItemsTemplate {
    pub layout: Layout,
    pub page: Page<Item>,
}

#[derive(Template)]
#[template(path = "item_detail.html")]
pub struct ItemDetailTemplate {
    pub layout: Layout,
    pub item: Item,
}

#[derive(Template)]
#[template(path = "item_form.html")]
pub struct ItemFormTemplate {
    pub layout: Layout,
    pub heading: &'static str,
    pub action: String,
    pub cancel_url: String,
    pub form: ItemForm,
}

// Login page, shared by both roles. Never echoes the submitted username.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub role: AccountRole,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub role: AccountRole,
    pub username: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub username: String,
    pub registrations: Vec<RegistrationDetails>,
}

#[derive(Template)]
#[template(path = "admin_registrations.html")]
pub struct AdminRegistrationsTemplate {
    pub layout: Layout,
    pub registrations: Vec<RegistrationDetails>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "estimate.html")]
pub struct EstimateTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub status: u16,
    pub message: String,
}
