mod components;
mod footer;
mod header;
mod homepage;

use footer::Footer;
use header::Header;
use homepage::HomePage;
use leptos::{either::Either, prelude::*};
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::content::{site_content, ContentError, Lang};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html>
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="flex flex-col min-h-screen">
                <App />
            </body>
        </html>
    }
}

/// Page routes plus static files, with unmatched paths rendered as the 404 page.
#[cfg(feature = "ssr")]
pub fn router(leptos_options: LeptosOptions) -> axum::Router {
    use leptos_axum::{generate_route_list, LeptosRoutes};

    let routes = generate_route_list(App);
    axum::Router::new()
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options)
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        <Title formatter=|title| format!("Simon Salazar - {title}") />
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=|| view! { <LocalizedPage lang=Lang::En /> } />
                <Route path=path!("/en") view=|| view! { <LocalizedPage lang=Lang::En /> } />
                <Route path=path!("/en/") view=|| view! { <LocalizedPage lang=Lang::En /> } />
                <Route path=path!("/es") view=|| view! { <LocalizedPage lang=Lang::Es /> } />
                <Route path=path!("/es/") view=|| view! { <LocalizedPage lang=Lang::Es /> } />
            </Routes>
        </Router>
    }
}

/// One full page in `lang`. The root element's `lang` is what the locale
/// behavior reads on load.
#[component]
fn LocalizedPage(lang: Lang) -> impl IntoView {
    match site_content(lang) {
        Ok(content) => Either::Left(view! {
            <Html {..} lang=lang.code() />
            <Link rel="alternate" hreflang="en" href="/en/" />
            <Link rel="alternate" hreflang="es" href="/es/" />
            <Header lang content=content.clone() />
            <main id="main" class="flex flex-col flex-grow items-center mx-auto w-full max-w-6xl px-4">
                <HomePage content=content.clone() />
            </main>
            <Footer lang content />
        }),
        Err(error) => Either::Right(view! { <ContentUnavailable error /> }),
    }
}

#[component]
fn ContentUnavailable(error: ContentError) -> impl IntoView {
    view! {
        <Title text="Unavailable" />
        <main class="flex flex-col flex-grow justify-center items-center">
            <h1 class="text-2xl font-bold">"Something went wrong"</h1>
            <p class="text-muted">{error.to_string()}</p>
        </main>
    }
}

#[cfg(feature = "ssr")]
fn set_not_found_status() {
    if let Some(resp) = use_context::<leptos_axum::ResponseOptions>() {
        resp.set_status(http::StatusCode::NOT_FOUND);
    }
}

#[component]
fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    set_not_found_status();

    view! {
        <Title text="Page not found" />
        <main class="flex flex-col flex-grow justify-center items-center gap-4">
            <h1 class="text-4xl font-bold">"404"</h1>
            <p>"Page not found."</p>
            <a href="/" rel="external" class="underline">
                "Back to the homepage"
            </a>
        </main>
    }
}
