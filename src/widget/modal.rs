use super::Ui;

pub const LOGIN_MODAL: &str = "loginModal";
pub const SIGNUP_MODAL: &str = "signupModal";

/// Flips which of the two gate dialogs is visible. `parent_modal` is the
/// `data-parent_modal` value of the clicked toggle element: when it names
/// the login dialog the signup dialog opens, and any other value opens the
/// login dialog. Rapid toggling is not debounced.
pub fn toggle(ui: &mut dyn Ui, parent_modal: &str) {
    if parent_modal == LOGIN_MODAL {
        ui.hide_modal(LOGIN_MODAL);
        ui.show_modal(SIGNUP_MODAL);
    } else {
        ui.hide_modal(SIGNUP_MODAL);
        ui.show_modal(LOGIN_MODAL);
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::widget::MockUi;

    #[test]
    fn login_parent_opens_signup() {
        let mut ui = MockUi::new();
        ui.expect_hide_modal()
            .with(eq(LOGIN_MODAL))
            .times(1)
            .return_const(());
        ui.expect_show_modal()
            .with(eq(SIGNUP_MODAL))
            .times(1)
            .return_const(());
        toggle(&mut ui, LOGIN_MODAL);
    }

    #[test]
    fn any_other_parent_opens_login() {
        for parent in [SIGNUP_MODAL, "somethingElse", ""] {
            let mut ui = MockUi::new();
            ui.expect_hide_modal()
                .with(eq(SIGNUP_MODAL))
                .times(1)
                .return_const(());
            ui.expect_show_modal()
                .with(eq(LOGIN_MODAL))
                .times(1)
                .return_const(());
            toggle(&mut ui, parent);
        }
    }
}
