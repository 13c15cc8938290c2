use axum::response::Response;
use horrorshow::helper::doctype;
use horrorshow::prelude::*;
use horrorshow::{append_html, html};
use tracing::error;

use crate::response;
use crate::widget::modal::{LOGIN_MODAL, SIGNUP_MODAL};

/// The gate page: both dialogs are present in the markup, the signup one
/// starts hidden, and the toggle links flip between them. Every field that
/// can come back with a server-side error has a `<field>-errors` element
/// next to it; the `address` inputs are the hidden honeypots.
pub fn gate(authorized: bool) -> Response {
    match render(authorized) {
        Ok(page) => response::page(page),
        Err(e) => {
            error!("{}", e);
            response::internal_server_error()
        }
    }
}

fn render(authorized: bool) -> Result<String, horrorshow::Error> {
    let page = html! {
        : doctype::HTML;
        html {
            head {
                style { : Raw(include_str!("../assets/style.css")); }
            }
            body {
                @ if authorized {
                    div(class="banner") {
                        p { : Raw("You're authorized for this site.") }
                    }
                } else {
                    div(id=LOGIN_MODAL, class="modal") {
                        form(id="login-form", class="form", method="POST", action="/login") {
                            input(type="email", name="email", placeholder="email");
                            span(id="email-errors", class="field-errors") { }
                            input(type="text", name="address", class="hidden", autocomplete="off");
                            input(type="hidden", name="next", value="/");
                            button { : Raw("Log in") }
                            p(class="message") {
                                : Raw("Not on the list? ");
                                a(href="javascript://", class="toggle-login-signup",
                                  data-parent_modal=LOGIN_MODAL) {
                                    : Raw("Sign up")
                                }
                            }
                        }
                    }
                    div(id=SIGNUP_MODAL, class="modal hidden") {
                        form(id="signup-form", class="form", method="POST", action="/signup") {
                            input(type="email", name="email", placeholder="email");
                            span(id="email-errors", class="field-errors") { }
                            input(type="text", name="first_name", placeholder="first name");
                            span(id="first_name-errors", class="field-errors") { }
                            input(type="text", name="last_name", placeholder="last name");
                            span(id="last_name-errors", class="field-errors") { }
                            input(type="text", name="zip_code", placeholder="zip code");
                            span(id="zip_code-errors", class="field-errors") { }
                            input(type="text", name="address", class="hidden", autocomplete="off");
                            button { : Raw("Sign up") }
                            p(class="message") {
                                : Raw("Already on the list? ");
                                a(href="javascript://", class="toggle-login-signup",
                                  data-parent_modal=SIGNUP_MODAL) {
                                    : Raw("Log in")
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    page.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_satisfies_the_widget_conventions() {
        let page = render(false).unwrap();
        for needle in [
            r#"id="loginModal""#,
            r#"id="signupModal""#,
            r#"id="email-errors""#,
            r#"id="zip_code-errors""#,
            r#"class="toggle-login-signup""#,
            r#"data-parent_modal="loginModal""#,
            r#"data-parent_modal="signupModal""#,
            r#"name="address""#,
        ] {
            assert!(page.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn authorized_visitors_see_no_forms() {
        let page = render(true).unwrap();
        assert!(!page.contains("login-form"));
        assert!(page.contains("authorized"));
    }
}
