use leptos::prelude::*;

use crate::content::{Lang, SiteContent};

const MENU_ID: &str = "site-nav-menu";

/// Site title plus the mobile navigation the page behaviors attach to:
/// `.site-nav__toggle` flips `.site-nav__menu` open and closed.
#[component]
pub fn Header(lang: Lang, content: SiteContent) -> impl IntoView {
    let links = content
        .nav
        .into_iter()
        .map(|link| {
            view! {
                <li>
                    <a href=link.href class="block px-3 py-2 rounded-md hover:bg-muted/20">
                        {link.label}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <header class="site-header shadow-lg">
            <div class="mx-auto max-w-6xl px-4 sm:px-6 lg:px-8 py-4 flex flex-wrap items-center justify-between">
                <a href=lang.home_path() rel="external" class="text-2xl font-bold">
                    {content.site_title}
                </a>
                <nav class="site-nav" aria-label="Main">
                    <button
                        type="button"
                        class="site-nav__toggle md:hidden px-3 py-2 rounded-md border"
                        aria-expanded="false"
                        aria-controls=MENU_ID
                    >
                        {content.nav_toggle_label}
                    </button>
                    <ul id=MENU_ID class="site-nav__menu md:flex md:items-center gap-2">
                        {links}
                        <li>
                            <LanguageSwitcher current=lang />
                        </li>
                    </ul>
                </nav>
            </div>
        </header>
    }
}

/// Links to every language's homepage. They're full page loads so the page
/// behaviors run again against the new document, and the locale behavior
/// stores the new page's language as the preference.
#[component]
pub fn LanguageSwitcher(current: Lang) -> impl IntoView {
    view! {
        <span class="language-switcher flex gap-2">
            {Lang::ALL
                .into_iter()
                .map(|lang| {
                    let is_current = lang == current;
                    view! {
                        <a
                            href=lang.home_path()
                            rel="external"
                            hreflang=lang.code()
                            lang=lang.code()
                            aria-current=if is_current { Some("page") } else { None }
                            class=if is_current {
                                "px-3 py-2 rounded-md font-bold underline"
                            } else {
                                "px-3 py-2 rounded-md hover:bg-muted/20"
                            }
                        >
                            {lang.native_name()}
                        </a>
                    }
                })
                .collect_view()}
        </span>
    }
}
