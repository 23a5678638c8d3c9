use leptos::{either::Either, prelude::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

pub fn button_class(variant: ButtonVariant, size: ButtonSize) -> String {
    let variant = match variant {
        ButtonVariant::Primary => "bg-sky-500 hover:bg-sky-600 text-white border-transparent",
        ButtonVariant::Secondary => "bg-transparent hover:bg-neutral-100 text-sky-600 border-sky-500",
        ButtonVariant::Ghost => "bg-transparent hover:bg-neutral-100 text-neutral-800 border-transparent",
    };
    let size = match size {
        ButtonSize::Sm => "px-3 py-1.5 text-sm",
        ButtonSize::Md => "px-5 py-2.5 text-base",
        ButtonSize::Lg => "px-7 py-3.5 text-lg",
    };
    format!(
        "inline-flex items-center justify-center rounded-md border font-medium transition-colors duration-200 disabled:opacity-50 disabled:cursor-not-allowed {variant} {size}"
    )
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional)] disabled: bool,
    #[prop(default = "button")] kind: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <button type=kind class=button_class(variant, size) disabled=disabled>
            {children()}
        </button>
    }
}

/// A link styled as a button.
#[component]
pub fn ButtonLink(
    #[prop(into)] href: String,
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    children: Children,
) -> impl IntoView {
    let external = href.starts_with("http");
    view! {
        <a
            href=href
            class=button_class(variant, size)
            target=external.then_some("_blank")
            rel=external.then_some("noopener noreferrer")
        >
            {children()}
        </a>
    }
}

#[component]
pub fn Card(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    view! {
        <article class=format!(
            "card flex flex-col overflow-hidden rounded-lg border border-neutral-200 bg-white shadow-sm transition-shadow hover:shadow-md {class}",
        )>{children()}</article>
    }
}

/// Ids for the helper and error text an input points at with `aria-describedby`.
pub fn described_by(id: &str, has_helper: bool, has_error: bool) -> Option<String> {
    let ids = [
        has_helper.then(|| format!("{id}-help")),
        has_error.then(|| format!("{id}-error")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();
    if ids.is_empty() {
        None
    } else {
        Some(ids.join(" "))
    }
}

#[component]
pub fn TextInput(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional, into)] helper: Option<String>,
    #[prop(optional, into)] error: Option<String>,
    #[prop(optional)] multiline: bool,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let describedby = described_by(&id, helper.is_some(), error.is_some());
    let invalid = error.is_some().then_some("true");
    let class = if error.is_some() {
        "w-full rounded-md border border-red-500 px-3 py-2 focus:outline-none focus:ring-2 focus:ring-red-400"
    } else {
        "w-full rounded-md border border-neutral-300 px-3 py-2 focus:outline-none focus:ring-2 focus:ring-sky-400"
    };
    let helper_id = format!("{id}-help");
    let error_id = format!("{id}-error");

    let field = if multiline {
        Either::Left(view! {
            <textarea
                id=id.clone()
                name=id.clone()
                rows="5"
                class=class
                required=required
                aria-invalid=invalid
                aria-describedby=describedby
            ></textarea>
        })
    } else {
        Either::Right(view! {
            <input
                id=id.clone()
                name=id.clone()
                type=kind
                class=class
                required=required
                aria-invalid=invalid
                aria-describedby=describedby
            />
        })
    };

    view! {
        <div class="flex flex-col gap-1">
            <label for=id class="text-sm font-medium">
                {label}
            </label>
            {field}
            {helper
                .map(|text| {
                    view! {
                        <p id=helper_id class="text-sm text-neutral-500">
                            {text}
                        </p>
                    }
                })}
            {error
                .map(|text| {
                    view! {
                        <p id=error_id class="text-sm text-red-600" role="alert">
                            {text}
                        </p>
                    }
                })}
        </div>
    }
}
