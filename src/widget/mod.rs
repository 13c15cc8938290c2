use mockall::automock;

pub mod cookie;
pub mod form;
pub mod modal;

/// Rendering port for the surface that embeds the gate widget. A browser
/// embedding maps these onto DOM mutations; the CLI maps them onto the
/// terminal; tests mock them.
///
/// `set_field_error` replaces the displayed content of the error element
/// belonging to `field` (by convention `<field>-errors`) with `message`.
/// Messages may carry markup and are passed through verbatim. When no such
/// element exists the implementation must treat the call as a no-op.
#[automock]
pub trait Ui {
    fn set_field_error(&mut self, field: &str, message: &str);
    fn show_modal(&mut self, id: &str);
    fn hide_modal(&mut self, id: &str);
    fn navigate(&mut self, url: &str);
}

/// Cookie storage port. Implementations scope cookies however their host
/// environment does; `expires_at` is an HTTP-date string.
#[automock]
pub trait CookieStore {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str, expires_at: &str, path: &str, domain: &str);
}
