//! Page payloads and their Maud templates.
//!
//! The dispatcher only builds a [`View`]; turning it into markup happens here.

use std::time::SystemTime;

use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;

use crate::{breadcrumb::Breadcrumb, format, listing::ListingEntry};

#[derive(Serialize, Debug)]
pub struct DirectoryPage {
    pub files: Vec<ListingEntry>,
    pub paths: Vec<Breadcrumb>,
}

#[derive(Serialize, Debug)]
pub struct MarkdownPage {
    pub html: String,
    pub title: String,
    pub paths: Vec<Breadcrumb>,
}

#[derive(Serialize, Debug)]
pub struct ImagePage {
    /// URL path of the image; the bytes are fetched with `?raw`.
    pub path: String,
    pub paths: Vec<Breadcrumb>,
}

#[derive(Serialize, Debug)]
pub struct FilePage {
    pub body: String,
    pub title: String,
    pub paths: Vec<Breadcrumb>,
}

#[derive(Serialize, Debug)]
pub struct LargeFilePage {
    pub size: u64,
    pub title: String,
    pub paths: Vec<Breadcrumb>,
}

#[derive(Serialize, Debug)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum View {
    Directory(DirectoryPage),
    Markdown(MarkdownPage),
    Image(ImagePage),
    File(FilePage),
    LargeFile(LargeFilePage),
}

/// Percent-encodes each segment of a slash separated path.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn render(view: &View) -> Markup {
    match view {
        View::Directory(page) => directory(page),
        View::Markdown(page) => markdown(page),
        View::Image(page) => image(page),
        View::File(page) => file(page),
        View::LargeFile(page) => large_file(page),
    }
}

fn layout(title: &str, paths: &[Breadcrumb], content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { @if title.is_empty() { "mdbrowse" } @else { (title) } }
                link rel="stylesheet" href="/static/style.css";
            }
            body {
                nav class="breadcrumb" {
                    a href="/" { "~" }
                    @for crumb in paths {
                        " / "
                        @if crumb.has_next {
                            a href={ "/" (encode_path(&crumb.path)) } { (crumb.label) }
                        } @else {
                            span class="current" { (crumb.label) }
                        }
                    }
                }
                main { (content) }
            }
        }
    }
}

fn directory(page: &DirectoryPage) -> Markup {
    let now = SystemTime::now();
    let title = page.paths.last().map(|c| c.label.as_str()).unwrap_or("/");
    layout(
        title,
        &page.paths,
        html! {
            table #listing {
                @for item in &page.files {
                    tr class=(if item.is_dir { "dir" } else { "file" }) {
                        td class="icon" { @if item.is_dir { "📁" } @else { "📄" } }
                        td class="name" {
                            a href=(encode_path(&item.path)) {
                                (item.name) @if item.is_dir { "/" }
                            }
                        }
                        td class="size" {
                            @if !item.is_dir { (format::human_size(item.size)) }
                        }
                        @if let Some(modified) = item.modified {
                            td class="modified" title=(format::relative_age(modified, now)) {
                                (format::timestamp(modified))
                            }
                        } @else {
                            td class="modified" {}
                        }
                    }
                }
            }
        },
    )
}

fn markdown(page: &MarkdownPage) -> Markup {
    layout(
        &page.title,
        &page.paths,
        html! {
            article class="markdown-body" { (PreEscaped(&page.html)) }
        },
    )
}

fn image(page: &ImagePage) -> Markup {
    let label = page.paths.last().map(|c| c.label.as_str()).unwrap_or("");
    layout(
        label,
        &page.paths,
        html! {
            figure {
                img src={ (page.path) "?raw" } alt=(label);
            }
        },
    )
}

fn file(page: &FilePage) -> Markup {
    layout(
        &page.title,
        &page.paths,
        html! {
            pre class="file-body" { (page.body) }
        },
    )
}

fn large_file(page: &LargeFilePage) -> Markup {
    layout(
        &page.title,
        &page.paths,
        html! {
            div class="large-file" {
                p {
                    "This file is " (format::human_size(page.size))
                    " (" (page.size) " bytes) and is too large to display."
                }
                a href={ (encode_path(&page.title)) "?raw" } { "Download raw file" }
            }
        },
    )
}
