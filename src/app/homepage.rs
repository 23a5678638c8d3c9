use leptos::prelude::*;
use leptos_meta::Title;

use super::components::{Button, ButtonLink, ButtonSize, ButtonVariant, Card, TextInput};
use crate::content::{Contact, Hero, Projects, SiteContent, Skills};

const CONTACT_ADDRESS: &str = "mailto:hello@simonsalazar.dev";

#[component]
pub fn HomePage(content: SiteContent) -> impl IntoView {
    view! {
        <Title text=content.hero.title.clone() />
        <HeroSection hero=content.hero />
        <CoreSkills skills=content.skills />
        <FeaturedProjects projects=content.projects />
        <ContactForm contact=content.contact />
    }
}

// Sections carry tabindex="-1" so in-page anchors can move focus onto them.

#[component]
fn HeroSection(hero: Hero) -> impl IntoView {
    let image = hero.image_url.map(|src| {
        view! {
            <img
                src=src
                alt=hero.image_alt.unwrap_or_default()
                width="800"
                height="450"
                class="w-full lg:w-1/2 rounded-lg object-cover aspect-video"
            />
        }
    });
    view! {
        <section
            id="hero"
            tabindex="-1"
            class="flex flex-col lg:flex-row items-center gap-8 py-12 w-full"
        >
            <div class="flex flex-col gap-4 lg:w-1/2">
                <h1 class="text-4xl font-bold">{hero.title}</h1>
                <p class="text-lg leading-relaxed">{hero.subtitle}</p>
                <div>
                    <ButtonLink href=hero.cta_href size=ButtonSize::Lg>
                        {hero.cta_label}
                    </ButtonLink>
                </div>
            </div>
            {image}
        </section>
    }
}

#[component]
fn CoreSkills(skills: Skills) -> impl IntoView {
    view! {
        <section id="skills" tabindex="-1" class="py-12 w-full text-center">
            <h2 class="text-2xl font-bold mb-6">{skills.title}</h2>
            <ul class="flex flex-wrap justify-center gap-3">
                {skills
                    .items
                    .into_iter()
                    .map(|skill| {
                        view! {
                            <li class="px-4 py-2 rounded-full border border-sky-500 text-sky-700 hover:bg-sky-50">
                                {skill}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

/// Project images are marked lazy and carry their real source in `data-src`
/// for browsers that need the scripted fallback.
#[component]
fn FeaturedProjects(projects: Projects) -> impl IntoView {
    view! {
        <section id="projects" tabindex="-1" class="py-12 w-full">
            <h2 class="text-2xl font-bold mb-6 text-center">{projects.title}</h2>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                {projects
                    .items
                    .into_iter()
                    .map(|project| {
                        view! {
                            <Card>
                                <img
                                    src=project.image_url.clone()
                                    data-src=project.image_url
                                    loading="lazy"
                                    alt=project.title.clone()
                                    width="800"
                                    height="450"
                                    class="lazy-image w-full object-cover aspect-video"
                                />
                                <div class="flex flex-col flex-grow gap-3 p-6">
                                    <h3 class="text-xl font-bold">{project.title}</h3>
                                    <p class="flex-grow leading-relaxed">{project.description}</p>
                                    <div>
                                        <ButtonLink
                                            href=project.link_url
                                            variant=ButtonVariant::Secondary
                                            size=ButtonSize::Sm
                                        >
                                            {project.link_text}
                                        </ButtonLink>
                                    </div>
                                </div>
                            </Card>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn ContactForm(contact: Contact) -> impl IntoView {
    view! {
        <section id="contact" tabindex="-1" class="py-12 w-full max-w-xl">
            <h2 class="text-2xl font-bold mb-6 text-center">{contact.title}</h2>
            <form
                action=CONTACT_ADDRESS
                method="post"
                enctype="text/plain"
                class="flex flex-col gap-4"
            >
                <TextInput id="name" label=contact.name_label required=true />
                <TextInput
                    id="email"
                    label=contact.email_label
                    kind="email"
                    helper=contact.email_helper
                    required=true
                />
                <TextInput id="message" label=contact.message_label multiline=true required=true />
                <div>
                    <Button kind="submit" variant=ButtonVariant::Primary>
                        {contact.submit_label}
                    </Button>
                </div>
            </form>
        </section>
    }
}
