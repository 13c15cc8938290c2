use axum::extract::{Form, Path, State};
use axum::response::Response;
use axum::TypedHeader;
use headers::Cookie;
use tower_cookies::Cookies;
use tracing::{error, info};
use validator::Validate;

use crate::authentication;
use crate::db::models::NewPendingUser;
use crate::db::SqliteStore;
use crate::error::Error;
use crate::forms::{field_errors, LoginForm, SignupForm};
use crate::membership::{Member, Roster};
use crate::page;
use crate::response::{self, FieldErrors, FormResponse};
use crate::token;
use crate::widget::cookie::{expires_at, MaxAge};
use crate::widget::modal::LOGIN_MODAL;
use crate::AppState;

const AUTHENTICATE: &str = "/authenticate";

const ROSTER_ERROR_MESSAGE: &str =
    "Something went wrong, please try again. If the problem persists, contact the site operator.";

pub async fn gate(State(state): State<AppState>, cookie: Option<TypedHeader<Cookie>>) -> Response {
    let authorized = authentication::is_authorized(
        cookie.as_ref().map(|TypedHeader(cookie)| cookie),
        &state.options.cookie_name,
    );
    page::gate(authorized)
}

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    response::form_response(login_outcome(state.roster.as_ref(), &form).await)
}

pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, Error> {
    let mut store = open_store(&state)?;
    let outcome = signup_outcome(store.as_mut(), state.roster.as_ref(), &form).await?;
    Ok(response::form_response(outcome))
}

pub async fn verify(
    State(state): State<AppState>,
    Path((id, token)): Path<(i64, String)>,
) -> Result<Response, Error> {
    let location = match open_store(&state)? {
        Some(mut store) => verify_outcome(&mut store, state.roster.as_ref(), id, &token).await?,
        None => "/",
    };
    Ok(response::found(location))
}

/// Grants the gate cookie and sends the visitor on. The cookie is the only
/// artifact of the whole flow: value `"true"`, path `/`, the configured
/// domain, and the non-expiring sentinel date.
pub async fn authenticate(State(state): State<AppState>, cookies: Cookies) -> Response {
    let header = format!(
        "{}=true; Expires={}; Domain={}; Path=/",
        state.options.cookie_name,
        expires_at(MaxAge::Never),
        state.options.cookie_domain
    );
    match tower_cookies::Cookie::parse(header) {
        Ok(cookie) => cookies.add(cookie),
        Err(e) => error!("{}", e),
    }
    response::found(&state.options.redirect_location)
}

async fn login_outcome(roster: &dyn Roster, form: &LoginForm) -> FormResponse {
    if let Err(failures) = form.validate() {
        return FormResponse::rejected(field_errors(&failures));
    }
    match roster.find_member(&form.email).await {
        Ok(Some(member)) if member.is_subscribed() => FormResponse::redirect(AUTHENTICATE),
        Ok(_) => FormResponse::rejected(email_error(not_subscribed_message(&form.email))),
        Err(e) => {
            error!("{}", e);
            FormResponse::rejected(email_error(ROSTER_ERROR_MESSAGE.to_owned()))
        }
    }
}

// The store comes in as a mutable borrow so the handler future stays Send;
// the pooled connection is not Sync.
async fn signup_outcome(
    store: Option<&mut SqliteStore>,
    roster: &dyn Roster,
    form: &SignupForm,
) -> Result<FormResponse, Error> {
    if let Err(failures) = form.validate() {
        return Ok(FormResponse::rejected(field_errors(&failures)));
    }
    match roster.find_member(&form.email).await {
        // Already subscribed: no verification round trip needed.
        Ok(Some(member)) if member.is_subscribed() => {
            return Ok(FormResponse::redirect(AUTHENTICATE))
        }
        Ok(_) => {}
        Err(e) => {
            error!("{}", e);
            return Ok(FormResponse::rejected(email_error(
                ROSTER_ERROR_MESSAGE.to_owned(),
            )));
        }
    }
    let store = match store {
        Some(store) => store,
        None => {
            return Ok(FormResponse::rejected(email_error(
                "Signups are currently disabled.".to_owned(),
            )))
        }
    };
    match store.find_pending_user_by_email(&form.email)? {
        Some(pending) => {
            info!(
                "signup for {} already pending verification (id {})",
                form.email, pending.id
            );
        }
        None => {
            let token = token::generate();
            let id = store.create_pending_user(&NewPendingUser {
                email: &form.email,
                first_name: &form.first_name,
                last_name: &form.last_name,
                zip_code: &form.zip_code,
                token: &token,
            })?;
            // Delivery is the operator's concern; surface the link in the log.
            info!("verification link for {}: /verify/{}/{}", form.email, id, token);
        }
    }
    Ok(FormResponse {
        redirect_url: form.next.clone(),
        errors: None,
    })
}

async fn verify_outcome(
    store: &mut SqliteStore,
    roster: &dyn Roster,
    id: i64,
    token: &str,
) -> Result<&'static str, Error> {
    let pending = match store.find_pending_user(id)? {
        Some(pending) if pending.token == token => pending,
        // Unknown id and stale token look the same from outside.
        _ => return Ok("/"),
    };
    let member = Member {
        email: pending.email.clone(),
        first_name: pending.first_name.clone(),
        last_name: pending.last_name.clone(),
        status: "subscribed".to_owned(),
    };
    match roster.put_member(&member).await {
        Ok(()) => {
            store.delete_pending_user(pending.id)?;
            Ok(AUTHENTICATE)
        }
        Err(e) => {
            error!("{}", e);
            Ok("/")
        }
    }
}

fn open_store(state: &AppState) -> Result<Option<SqliteStore>, Error> {
    let store = match &state.pool {
        Some(pool) => Some(SqliteStore::new(pool.get()?)),
        None => None,
    };
    Ok(store)
}

fn email_error(message: String) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert("email".to_owned(), vec![message]);
    errors
}

fn not_subscribed_message(email: &str) -> String {
    format!(
        "<strong>{}</strong> is not on the mailing list. Please \
         <a href=\"javascript://\" class=\"toggle-login-signup\" \
         data-parent_modal=\"{}\">sign up</a> to access this tool.",
        email, LOGIN_MODAL
    )
}
