//! HTML pages. Every interpolated value goes through [`html_escape`].

use super::{
    csrf::CSRF_FORM_FIELD,
    messages::{Locale, MessageSource},
};

/// Values echoed back into the form after a failed submission. Passwords are never echoed.
#[derive(Debug, Default)]
pub(super) struct FormValues<'a> {
    pub(super) username: &'a str,
    pub(super) email: &'a str,
    pub(super) first_name: &'a str,
    pub(super) last_name: &'a str,
}

pub(super) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn layout(locale: Locale, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
</head>
<body>
{body}
</body>
</html>"#,
        lang = locale.as_str(),
        title = html_escape(title),
    )
}

pub(super) fn render_signup_page(
    messages: &MessageSource,
    locale: Locale,
    csrf_token: &str,
    values: &FormValues<'_>,
    error: Option<&str>,
) -> String {
    let t = |key: &str| html_escape(&messages.get_message(key, &[], locale));

    let error_html = error.map_or_else(String::new, |message| {
        format!(
            r#"    <div class="alert alert-danger" role="alert">{}</div>
"#,
            html_escape(message)
        )
    });

    let body = format!(
        r#"<main>
    <h1>{title}</h1>
{error_html}    <form method="post" action="/signup">
        <input type="hidden" name="{csrf_field}" value="{csrf_token}">
        <label>{username_label} <input type="text" name="username" value="{username}" required></label>
        <label>{email_label} <input type="email" name="email" value="{email}" required></label>
        <label>{password_label} <input type="password" name="password" required></label>
        <label>{confirm_label} <input type="password" name="confirmPassword" required></label>
        <label>{first_name_label} <input type="text" name="firstName" value="{first_name}"></label>
        <label>{last_name_label} <input type="text" name="lastName" value="{last_name}"></label>
        <button type="submit">{submit}</button>
    </form>
</main>"#,
        title = t("signup.title"),
        csrf_field = CSRF_FORM_FIELD,
        csrf_token = html_escape(csrf_token),
        username_label = t("signup.username"),
        username = html_escape(values.username),
        email_label = t("signup.email"),
        email = html_escape(values.email),
        password_label = t("signup.password"),
        confirm_label = t("signup.confirm-password"),
        first_name_label = t("signup.first-name"),
        first_name = html_escape(values.first_name),
        last_name_label = t("signup.last-name"),
        last_name = html_escape(values.last_name),
        submit = t("signup.submit"),
    );

    layout(locale, &messages.get_message("signup.title", &[], locale), &body)
}

pub(super) fn render_error_page(messages: &MessageSource, locale: Locale) -> String {
    let title = messages.get_message("home.title", &[], locale);
    let body = format!(
        r#"<main>
    <div class="alert alert-danger" role="alert">{}</div>
</main>"#,
        html_escape(&messages.get_message("alert.internal-error", &[], locale))
    );
    layout(locale, &title, &body)
}

pub(super) fn render_home_page(messages: &MessageSource, locale: Locale) -> String {
    let title = messages.get_message("home.title", &[], locale);
    let body = format!(
        r#"<main>
    <h1>{title}</h1>
    <a href="/signup">{link}</a>
</main>"#,
        title = html_escape(&title),
        link = html_escape(&messages.get_message("home.signup-link", &[], locale)),
    );
    layout(locale, &title, &body)
}
