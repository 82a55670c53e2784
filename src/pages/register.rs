//! New-patient registration page.
//!
//! The form mirrors [`RegisterProfile`]; validation runs in the session
//! crate before anything is sent, and a successful registration signs the
//! user in and lands on the dashboard.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;
use session::{Gender, RegisterProfile, routes};

use crate::state::auth::use_session;

pub(crate) const REGISTER_FALLBACK: &str = "Failed to register. Please try again.";

pub(crate) const GENDER_OPTIONS: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

/// One text input bound to a [`RegisterProfile`] field.
pub(crate) struct TextField {
    pub label: &'static str,
    pub input_type: &'static str,
    pub get: fn(&RegisterProfile) -> &str,
    pub set: fn(&mut RegisterProfile, String),
}

pub(crate) const TEXT_FIELDS: &[TextField] = &[
    TextField { label: "First name", input_type: "text", get: |p| p.first_name.as_str(), set: |p, v| p.first_name = v },
    TextField { label: "Last name", input_type: "text", get: |p| p.last_name.as_str(), set: |p, v| p.last_name = v },
    TextField { label: "Email", input_type: "email", get: |p| p.email.as_str(), set: |p, v| p.email = v },
    TextField { label: "Password", input_type: "password", get: |p| p.password.as_str(), set: |p, v| p.password = v },
    TextField {
        label: "Confirm password",
        input_type: "password",
        get: |p| p.confirm_password.as_str(),
        set: |p, v| p.confirm_password = v,
    },
    TextField { label: "Phone number", input_type: "tel", get: |p| p.phone_number.as_str(), set: |p, v| p.phone_number = v },
    TextField {
        label: "Date of birth",
        input_type: "date",
        get: |p| p.date_of_birth.as_str(),
        set: |p, v| p.date_of_birth = v,
    },
    TextField { label: "Address", input_type: "text", get: |p| p.address.as_str(), set: |p, v| p.address = v },
    TextField { label: "City", input_type: "text", get: |p| p.city.as_str(), set: |p, v| p.city = v },
    TextField { label: "State", input_type: "text", get: |p| p.state.as_str(), set: |p, v| p.state = v },
    TextField { label: "ZIP code", input_type: "text", get: |p| p.zip_code.as_str(), set: |p, v| p.zip_code = v },
];

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let navigate = leptos_router::hooks::use_navigate();

    let profile = RwSignal::new(RegisterProfile::default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let submitted = profile.get();
        if let Err(e) = submitted.validate() {
            error.set(e.to_string());
            return;
        }
        busy.set(true);
        error.set(String::new());

        let session = session.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match session.register(&submitted).await {
                Ok(_) => navigate(routes::DASHBOARD, leptos_router::NavigateOptions::default()),
                Err(e) => {
                    leptos::logging::warn!("registration failed: {e}");
                    error.set(e.display_message(REGISTER_FALLBACK));
                }
            }
            busy.set(false);
        });
    };

    let inputs = TEXT_FIELDS
        .iter()
        .map(|field| {
            let (get, set) = (field.get, field.set);
            view! {
                <label class="auth-field">
                    <span>{field.label}</span>
                    <input
                        class="auth-input"
                        type=field.input_type
                        prop:value=move || profile.with(|p| get(p).to_owned())
                        on:input=move |ev| profile.update(|p| set(p, event_target_value(&ev)))
                    />
                </label>
            }
        })
        .collect_view();

    let gender_options = GENDER_OPTIONS
        .iter()
        .map(|gender| {
            let value = gender.to_string();
            view! { <option value=value.clone()>{value.clone()}</option> }
        })
        .collect_view();

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Create your account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    {inputs}
                    <label class="auth-field">
                        <span>"Gender"</span>
                        <select
                            class="auth-input"
                            prop:value=move || profile.with(|p| p.gender.to_string())
                            on:change=move |ev| {
                                if let Ok(gender) = event_target_value(&ev).parse::<Gender>() {
                                    profile.update(|p| p.gender = gender);
                                }
                            }
                        >
                            {gender_options}
                        </select>
                    </label>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? "
                    <A href=routes::LOGIN>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
