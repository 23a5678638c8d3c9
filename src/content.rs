use dashmap::DashMap;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};
use thiserror::Error;

pub static GLOBAL_CONTENT_CACHE: LazyLock<DashMap<Lang, SiteContent>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Es,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Es];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
        }
    }

    /// Accepts full tags (`es-MX`) and ignores case.
    pub fn from_code(code: &str) -> Option<Self> {
        let base = code.split('-').next().unwrap_or(code);
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(base))
    }

    /// Root path of this language's pages, e.g. `/es/`.
    pub fn home_path(self) -> String {
        format!("/{}/", self.code())
    }

    /// The language's name, written in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Es => "Español",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    pub cta_label: String,
    pub cta_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link_url: String,
    pub link_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projects {
    pub title: String,
    pub items: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub title: String,
    pub name_label: String,
    pub email_label: String,
    pub email_helper: String,
    pub message_label: String,
    pub submit_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub copyright_name: String,
    pub language_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub site_title: String,
    pub nav_toggle_label: String,
    pub nav: Vec<NavLink>,
    pub hero: Hero,
    pub skills: Skills,
    pub projects: Projects,
    pub contact: Contact,
    pub footer: Footer,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("No content for locale {0}")]
    NotFound(Lang),
    #[error("Couldn't parse {lang} content: {message}")]
    Parse { lang: Lang, message: String },
}

pub fn site_content(lang: Lang) -> Result<SiteContent, ContentError> {
    let cache = &*GLOBAL_CONTENT_CACHE;
    if let Some(c) = cache.get(&lang) {
        return Ok(c.clone());
    }
    let file = ContentAssets::get(&format!("{}.json", lang.code()))
        .ok_or(ContentError::NotFound(lang))?;
    let content = serde_json::from_slice::<SiteContent>(&file.data).map_err(|e| {
        ContentError::Parse {
            lang,
            message: e.to_string(),
        }
    })?;
    cache.insert(lang, content.clone());
    Ok(content)
}
