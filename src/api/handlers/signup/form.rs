use super::{
    csrf,
    messages::Locale,
    password::hash_password,
    state::SignupState,
    templates::{FormValues, render_error_page, render_home_page, render_signup_page},
    validation::{self, weak_password_message},
};
use crate::store::{NewAccount, SaveOutcome, VerificationType};
use axum::{
    Form,
    extract::{Extension, Query},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{LOCATION, SET_COOKIE},
    },
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use utoipa::{IntoParams, ToSchema};

/// `error` query value set by the weak password redirect.
pub const WEAK_PASSWORD_ERROR: &str = "weak-password";
const WEAK_PASSWORD_LOCATION: &str = "/signup?error=weak-password";
const AFTER_SIGNUP_LOCATION: &str = "/";

#[derive(ToSchema, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupForm {
    pub(super) username: String,
    pub(super) email: String,
    pub(super) password: String,
    pub(super) confirm_password: String,
    pub(super) first_name: String,
    pub(super) last_name: String,
    /// Must equal the `XSRF-TOKEN` cookie.
    #[serde(rename = "_csrf")]
    pub(super) csrf: String,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("confirm_password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct SignupQuery {
    /// Error code from a previous submission, currently only `weak-password`.
    error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/signup",
    params(SignupQuery),
    responses (
        (status = 200, description = "Signup form; sets the XSRF-TOKEN cookie", body = String, content_type = "text/html"),
    ),
    tag = "signup"
)]
#[instrument(skip_all)]
pub async fn signup_form(
    Extension(state): Extension<Arc<SignupState>>,
    headers: HeaderMap,
    Query(query): Query<SignupQuery>,
) -> Response {
    let locale = Locale::from_headers(&headers);

    let token = match csrf::generate_csrf_token() {
        Ok(token) => token,
        Err(err) => {
            error!("Error generating csrf token: {err:#}");
            return internal_error(&state, locale);
        }
    };

    let error = match query.error.as_deref() {
        Some(WEAK_PASSWORD_ERROR) => Some(weak_password_message(
            state.messages(),
            locale,
            state.config().password_policy(),
        )),
        _ => None,
    };

    let html = render_signup_page(
        state.messages(),
        locale,
        &token,
        &FormValues::default(),
        error.as_deref(),
    );

    match csrf::csrf_cookie(&token, state.config().secure_cookies()) {
        Ok(cookie) => ([(SET_COOKIE, cookie)], Html(html)).into_response(),
        Err(err) => {
            error!("Error building csrf cookie: {err:#}");
            internal_error(&state, locale)
        }
    }
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses (
        (status = 200, description = "Validation failed; the form is rendered with a localized message", body = String, content_type = "text/html"),
        (status = 302, description = "Account created or email already registered (redirect to `/`); weak password (redirect to `/signup?error=weak-password`)"),
        (status = 403, description = "Missing or mismatched CSRF token"),
        (status = 500, description = "Account store failure", body = String, content_type = "text/html"),
    ),
    tag = "signup"
)]
#[instrument(skip_all)]
pub async fn signup(
    Extension(state): Extension<Arc<SignupState>>,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Response {
    let locale = Locale::from_headers(&headers);

    let Some(csrf_token) =
        csrf::extract_csrf_cookie(&headers).filter(|token| csrf::tokens_match(token, &form.csrf))
    else {
        debug!("Missing or mismatched csrf token");
        return (StatusCode::FORBIDDEN, "Invalid CSRF token").into_response();
    };

    debug!("signup: {:?}", form);

    let signup = match validation::validate(&form, state.config().password_policy()) {
        Ok(signup) => signup,
        Err(rejection) if rejection.redirects() => {
            debug!(?rejection, "Signup rejected");
            return redirect(WEAK_PASSWORD_LOCATION);
        }
        Err(rejection) => {
            debug!(?rejection, "Signup rejected");
            let message =
                rejection.message(state.messages(), locale, state.config().password_policy());
            let values = FormValues {
                username: &form.username,
                email: &form.email,
                first_name: &form.first_name,
                last_name: &form.last_name,
            };
            let html =
                render_signup_page(state.messages(), locale, &csrf_token, &values, Some(&message));
            return Html(html).into_response();
        }
    };

    // existing accounts are left untouched and the response matches a fresh signup
    match state.accounts().find_by_email(&signup.email).await {
        Ok(Some(_)) => {
            info!("Signup ignored, email already registered");
            return redirect(AFTER_SIGNUP_LOCATION);
        }
        Ok(None) => (),
        Err(err) => {
            error!("Error looking up account: {err:#}");
            return internal_error(&state, locale);
        }
    }

    let password_hash = match hash_password(signup.password).await {
        Ok(hash) => hash,
        Err(err) => {
            error!("Error hashing password: {err:#}");
            return internal_error(&state, locale);
        }
    };

    let account = NewAccount {
        username: signup.username,
        email: signup.email,
        password_hash,
        first_name: signup.first_name,
        last_name: signup.last_name,
        verification_type: VerificationType::Email,
    };

    match state.accounts().save(account).await {
        Ok(SaveOutcome::Created(account)) => {
            info!(account_id = %account.id, "Account created");
            redirect(AFTER_SIGNUP_LOCATION)
        }
        Ok(SaveOutcome::Duplicate) => {
            info!("Signup ignored, email registered concurrently");
            redirect(AFTER_SIGNUP_LOCATION)
        }
        Err(err) => {
            error!("Error saving account: {err:#}");
            internal_error(&state, locale)
        }
    }
}

/// Landing page.
pub async fn home(Extension(state): Extension<Arc<SignupState>>, headers: HeaderMap) -> Html<String> {
    let locale = Locale::from_headers(&headers);
    Html(render_home_page(state.messages(), locale))
}

fn redirect(location: &'static str) -> Response {
    (
        StatusCode::FOUND,
        [(LOCATION, HeaderValue::from_static(location))],
    )
        .into_response()
}

fn internal_error(state: &SignupState, locale: Locale) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render_error_page(state.messages(), locale)),
    )
        .into_response()
}
