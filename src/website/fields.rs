use maud::{html, Markup};

use super::forms::FormState;

fn field_errors(state: &FormState, name: &str) -> Markup {
    html! {
        @for error in state.errors(name) {
            span.field-error { ( error ) }
        }
    }
}

/// Shown above a rejected form.
pub fn error_summary(state: &FormState) -> Markup {
    html! {
        @if state.has_errors() {
            p.form-errors { "Please correct the highlighted fields." }
        }
    }
}

pub fn text(state: &FormState, name: &'static str, label: &str, required: bool) -> Markup {
    input(state, name, label, "text", required)
}

pub fn input(
    state: &FormState,
    name: &'static str,
    label: &str,
    kind: &str,
    required: bool,
) -> Markup {
    html! {
        div.form-group.invalid[!state.errors(name).is_empty()] {
            label for=(name) { ( label ) }
            input id=(name) name=(name) type=(kind) value=[state.value(name)] required[required];
            ( field_errors(state, name) )
        }
    }
}

pub fn select<'a>(
    state: &FormState,
    name: &'static str,
    label: &str,
    options: impl IntoIterator<Item = (String, &'a str)>,
    multiple: bool,
) -> Markup {
    let chosen = state.values(name);
    html! {
        div.form-group.invalid[!state.errors(name).is_empty()] {
            label for=(name) { ( label ) }
            select id=(name) name=(name) multiple[multiple] required {
                @if !multiple {
                    option value="" { "Choose…" }
                }
                @for (value, text) in options {
                    option value=(value) selected[chosen.contains(&value)] { ( text ) }
                }
            }
            ( field_errors(state, name) )
        }
    }
}

/// Options whose value and label are the same.
pub fn choices<'a>(
    items: &'a [&'static str],
) -> impl Iterator<Item = (String, &'static str)> + 'a {
    items.iter().map(|item| (item.to_string(), *item))
}

pub fn checkbox(state: &FormState, name: &'static str, label: &str) -> Markup {
    html! {
        div.form-group.checkbox {
            label {
                input name=(name) type="checkbox" value="yes" checked[state.is_checked(name)];
                " " ( label )
            }
            ( field_errors(state, name) )
        }
    }
}
