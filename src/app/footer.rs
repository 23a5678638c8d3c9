use chrono::{DateTime, Datelike};
use leptos::prelude::*;

use super::header::LanguageSwitcher;
use crate::content::{Lang, SiteContent};

/// Year the site was built, from the `BUILD_TIME` stamped by `build.rs`.
fn build_year() -> Option<i32> {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .ok()
        .map(|t| t.year())
}

#[component]
pub fn Footer(lang: Lang, content: SiteContent) -> impl IntoView {
    let copyright = match build_year() {
        Some(year) => format!("© {year} {}", content.footer.copyright_name),
        None => format!("© {}", content.footer.copyright_name),
    };
    view! {
        <footer class="site-footer mt-12 border-t">
            <div class="mx-auto max-w-6xl px-4 py-6 flex flex-col sm:flex-row items-center justify-between gap-4">
                <p class="text-sm">{copyright}</p>
                <div class="flex items-center gap-2 text-sm">
                    <span>{content.footer.language_label}</span>
                    <LanguageSwitcher current=lang />
                </div>
            </div>
        </footer>
    }
}
