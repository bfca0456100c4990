use anyhow::Result;
use handlebars::{handlebars_helper, Handlebars};
use serde_derive::Serialize;

use crate::model::{Issue, Repository};
use crate::template;
use crate::view::{Region, RepositoryView};

/// Loading indicator, drawn with fixed parameters wherever a region has no data.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Loader {
    pub kind: &'static str,
    pub color: &'static str,
    pub height: u32,
    pub width: u32,
}

pub const LOADER: Loader = Loader {
    kind: "Puff",
    color: "#00BFFF",
    height: 120,
    width: 120,
};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

pub const BACK: Link = Link {
    label: "Back",
    href: "/",
};

#[derive(Serialize)]
struct IssueList<'a> {
    items: &'a [Issue],
}

#[derive(Serialize)]
struct Page<'a> {
    back: Link,
    loader: Loader,
    repository: Option<&'a Repository>,
    issues: Option<IssueList<'a>>,
}

impl<'a> Page<'a> {
    fn new(view: &'a RepositoryView) -> Self {
        let repository = match view.repository_region() {
            Region::Ready(repository) => Some(repository),
            Region::Loading => None,
        };
        let issues = match view.issues_region() {
            Region::Ready(items) => Some(IssueList { items }),
            Region::Loading => None,
        };
        Self {
            back: BACK,
            loader: LOADER,
            repository,
            issues,
        }
    }
}

/// Makes `text` safe inside the brackets of a markdown link.
fn link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '[' | ']' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\r' => (),
            '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

handlebars_helper!(link_text_helper: |text: str| link_text(text));

pub struct Renderer {
    hb: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);
        hb.register_helper("link_text", Box::new(link_text_helper));
        hb.register_partial("loader", template::LOADER)?;
        hb.register_template_string("page", template::TEMPLATE)?;
        Ok(Self { hb })
    }

    pub fn render(&self, view: &RepositoryView) -> Result<String> {
        Ok(self.hb.render("page", &Page::new(view))?)
    }
}
