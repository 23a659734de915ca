//! Page rendering.
//!
//! The [`Renderer`] trait is the seam between routing and content: the emitter
//! hands it a page model and gets back the file contents. [`SiteRenderer`] is
//! the stock implementation.
//!
//! Every page is first built as CommonMark. For HTML output the markdown is
//! converted with pulldown-cmark and wrapped in a [maud](https://maud.lambda.xyz/)
//! document that links the shared stylesheet. Links between pages are routes
//! composed with the base URL, so they match the names the planner gives files.

use crate::config::OutputFormat;
use crate::index::{Entry, HOME, Page, Section};
use crate::route::BaseUrl;
use crate::types::{Symbol, SymbolKind};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fmt::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render page '{route}': {reason}")]
    Page { route: String, reason: String },
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Run-wide settings every page is rendered with.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub module: String,
    pub format: OutputFormat,
    pub base_url: BaseUrl,
    /// The run has one page, so there is nothing to link to.
    pub single_page: bool,
}

impl RenderContext {
    fn link(&self, route: &str) -> String {
        self.base_url.link(route)
    }
}

/// Turns page models into file contents.
pub trait Renderer: Sync {
    fn render(&self, route: &str, page: &Page, ctx: &RenderContext) -> Result<String, RenderError>;

    /// Contents of the stylesheet written alongside HTML output.
    fn stylesheet(&self) -> String {
        CSS_STATIC.to_string()
    }
}

/// Stock renderer: CommonMark pages, optionally wrapped as HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteRenderer;

impl Renderer for SiteRenderer {
    fn render(
        &self,
        _route: &str,
        page: &Page,
        ctx: &RenderContext,
    ) -> Result<String, RenderError> {
        let markdown = render_markdown(page, ctx);
        Ok(match ctx.format {
            OutputFormat::Commonmark => markdown,
            OutputFormat::Html => render_html(page, &markdown, ctx).into_string(),
        })
    }
}

// ============================================================================
// Markdown
// ============================================================================

/// Build the CommonMark body of a page.
pub fn render_markdown(page: &Page, ctx: &RenderContext) -> String {
    let mut out = String::new();
    match page {
        Page::Type { symbol, members } => {
            let _ = writeln!(out, "# {}\n", symbol.qualified_name());
            push_declaration(&mut out, symbol);
            push_members(&mut out, "Members", members);
        }
        Page::Typealias { symbol } => {
            let _ = writeln!(out, "# {}\n", symbol.name);
            push_declaration(&mut out, symbol);
        }
        Page::Operator {
            operators,
            implementations,
        } => {
            let title = page.title();
            let _ = writeln!(out, "# {title} Operator\n");
            for operator in operators {
                push_declaration(&mut out, operator);
            }
            push_members(&mut out, "Implementations", implementations);
        }
        Page::Global { name, symbols } => {
            let _ = writeln!(out, "# {name}\n");
            for symbol in symbols {
                push_declaration(&mut out, symbol);
            }
        }
        Page::ExternalType { type_name, members } => {
            let _ = writeln!(out, "# Extensions on {type_name}\n");
            push_members(&mut out, "Members", members);
        }
        Page::Home { module, entries } => {
            let _ = writeln!(out, "# {module}\n");
            push_sections(&mut out, entries, "##", ctx);
        }
        Page::Sidebar { module, entries } => {
            let _ = writeln!(out, "<details open>\n<summary><strong>{module}</strong></summary>\n");
            let _ = writeln!(out, "- [Home]({})\n", ctx.link(HOME));
            push_sections(&mut out, entries, "####", ctx);
            out.push_str("</details>\n");
        }
        Page::Footer { module } => {
            let _ = writeln!(
                out,
                "Generated for {module} by swiftdoc {}.",
                env!("CARGO_PKG_VERSION")
            );
        }
    }
    out
}

fn keyword(kind: SymbolKind) -> &'static str {
    match kind {
        SymbolKind::Class => "class",
        SymbolKind::Enumeration => "enum",
        SymbolKind::Structure => "struct",
        SymbolKind::Protocol => "protocol",
        SymbolKind::Typealias => "typealias",
        SymbolKind::Operator => "operator",
        SymbolKind::Function => "func",
        SymbolKind::Variable => "var",
        SymbolKind::Other => "",
    }
}

fn push_declaration(out: &mut String, symbol: &Symbol) {
    let keyword = keyword(symbol.kind);
    let _ = writeln!(out, "```swift\n{} {} {}\n```\n", symbol.access, keyword, symbol.name);
    if let Some(file) = symbol.source_path().file_name() {
        let _ = writeln!(out, "Declared in `{}`.\n", file.to_string_lossy());
    }
}

fn push_members(out: &mut String, heading: &str, members: &[Symbol]) {
    if members.is_empty() {
        return;
    }
    let _ = writeln!(out, "## {heading}\n");
    for member in members {
        let _ = writeln!(out, "- `{}` ({})", member.qualified_name(), member.kind.as_str());
    }
    out.push('\n');
}

fn push_sections(out: &mut String, entries: &[Entry], level: &str, ctx: &RenderContext) {
    let mut current: Option<Section> = None;
    for entry in entries {
        if current != Some(entry.section) {
            if current.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{level} {}\n", entry.section.title());
            current = Some(entry.section);
        }
        let _ = writeln!(out, "- [`{}`]({})", entry.title, ctx.link(&entry.route));
    }
    if current.is_some() {
        out.push('\n');
    }
}

// ============================================================================
// HTML
// ============================================================================

fn render_html(page: &Page, markdown: &str, ctx: &RenderContext) -> Markup {
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, Parser::new(markdown));

    let title = match page {
        Page::Home { module, .. } => module.clone(),
        _ => format!("{} - {}", page.title(), ctx.module),
    };

    let content = html! {
        header.site-header {
            @if ctx.single_page {
                span.module-name { (ctx.module) }
            } @else {
                a.module-name href=(ctx.link(HOME)) { (ctx.module) }
            }
        }
        main {
            article {
                (PreEscaped(body_html))
            }
        }
        footer.site-footer {
            "Generated by swiftdoc " (env!("CARGO_PKG_VERSION"))
        }
    };

    base_document(&title, &ctx.base_url.asset(crate::plan::STYLESHEET), content)
}

/// Renders the base HTML document structure
fn base_document(title: &str, stylesheet: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(stylesheet);
            }
            body {
                (content)
            }
        }
    }
}
