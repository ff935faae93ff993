use crate::error::{ExtractError, Result};
use crate::models::{AssembledPage, PageRecord, Redirect};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

/// End tags with nothing to extract.
const IGNORE_TAGS: &[&str] = &[
    "sha1",
    "comment",
    "username",
    "timestamp",
    "sitename",
    "dbname",
    "base",
    "generator",
    "case",
    "ns",
    "restrictions",
    "contributor",
    "minor",
    "parentid",
    "namespaces",
    "revision",
    "siteinfo",
    "mediawiki",
    "ip",
    "origin",
    "discussionthreadinginfo",
];

/// Nothing nested inside these elements is interpreted.
const STACK_IGNORE: &[&str] = &["contributor"];

const KNOWN_MODELS: &[&str] = &["wikitext", "Scribunto", "css", "javascript", "sanitized-css"];

const KNOWN_FORMATS: &[&str] = &["text/x-wiki", "text/plain", "text/css", "text/javascript"];

/// Content models that are code or style sheets, not dictionary text.
const NON_TEXT_MODELS: &[&str] = &["css", "sanitized-css", "javascript", "Scribunto"];

/// Lowercases a tag or attribute name and drops any `prefix:` or `{uri}`
/// namespace qualifier.
pub fn local_name(name: &str) -> String {
    let name = match name.rfind('}') {
        Some(idx) => &name[idx + 1..],
        None => name,
    };
    let name = match name.rfind(':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    };
    name.to_ascii_lowercase()
}

#[derive(Debug)]
struct OpenTag {
    name: String,
    attrs: Vec<(String, String)>,
}

impl OpenTag {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Non-fatal schema surprises seen so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    pub unsupported_tags: u64,
    pub unrecognized_values: u64,
}

/// Tag-stack state machine that turns start/end/text events into one
/// [`AssembledPage`] per `<page>` element. Only the current page's fields and
/// the text of the innermost open element are buffered.
#[derive(Debug, Default)]
pub struct PageAssembler {
    stack: Vec<OpenTag>,
    text: String,
    page: PageRecord,
    in_page: bool,
    namespaces: FxHashMap<String, String>,
    diagnostics: Diagnostics,
    reported: FxHashSet<String>,
    peak_buffered: usize,
}

impl PageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(&mut self, name: &str, attrs: Vec<(String, String)>) {
        let name = local_name(name);
        let attrs = attrs
            .into_iter()
            .map(|(k, v)| (local_name(&k), v))
            .collect();
        if name == "page" {
            self.page = PageRecord::default();
            self.in_page = true;
        }
        self.stack.push(OpenTag { name, attrs });
        self.text.clear();
    }

    pub fn on_text(&mut self, text: &str) {
        self.text.push_str(text);
        self.peak_buffered = self.peak_buffered.max(self.text.len());
    }

    /// Closes the innermost element. Returns a page when `</page>` completes
    /// one that is worth dispatching.
    pub fn on_end(&mut self, name: &str) -> Result<Option<AssembledPage>> {
        let name = local_name(name);
        let open = match self.stack.pop() {
            Some(open) => open,
            None => {
                return Err(ExtractError::structural(format!(
                    "unexpected </{}> with no open element",
                    name
                )))
            }
        };
        if open.name != name {
            return Err(ExtractError::structural(format!(
                "expected </{}>, found </{}>",
                open.name, name
            )));
        }

        let data = self.text.trim().to_string();
        self.text.clear();

        if self.inside(STACK_IGNORE) || IGNORE_TAGS.contains(&name.as_str()) {
            return Ok(None);
        }

        match name.as_str() {
            "namespace" => {
                let key = open.attr("key").unwrap_or_default().to_string();
                self.namespaces.insert(key, data);
            }
            "page" => return Ok(self.finish_page()),
            _ if !self.in_page => self.unsupported(&name, data.len()),
            "id" => {
                if !self.inside(&["revision"]) {
                    self.page.page_id = Some(data);
                }
            }
            "title" => self.page.title = data,
            "text" => self.page.body_text = Some(data),
            "redirect" => {
                let target = open
                    .attr("title")
                    .map(|t| t.trim().to_string())
                    .unwrap_or(data);
                if !target.is_empty() {
                    self.page.redirect_target = Some(target);
                }
            }
            "model" => {
                if !KNOWN_MODELS.contains(&data.as_str()) {
                    self.unrecognized("model", &data);
                }
                self.page.content_model = Some(data);
            }
            "format" => {
                if !KNOWN_FORMATS.contains(&data.as_str()) {
                    self.unrecognized("format", &data);
                }
                self.page.content_format = Some(data);
            }
            _ => self.unsupported(&name, data.len()),
        }
        Ok(None)
    }

    /// Checks that the document closed every element it opened.
    pub fn finish(&self) -> Result<()> {
        match self.stack.last() {
            Some(open) => Err(ExtractError::structural(format!(
                "document ended with <{}> still open",
                open.name
            ))),
            None => Ok(()),
        }
    }

    fn finish_page(&mut self) -> Option<AssembledPage> {
        self.in_page = false;
        let page = std::mem::take(&mut self.page);

        if let Some(model) = page.content_model.as_deref() {
            if NON_TEXT_MODELS.contains(&model) {
                debug!(title = %page.title, model, "Dropping non-text page");
                return Some(AssembledPage::NonText {
                    title: page.title,
                    model: model.to_string(),
                });
            }
        }

        match page.redirect_target {
            Some(to) => Some(AssembledPage::Redirect(Redirect {
                from: page.title,
                to,
            })),
            None => Some(AssembledPage::Article(page)),
        }
    }

    fn inside(&self, names: &[&str]) -> bool {
        self.stack
            .iter()
            .any(|open| names.contains(&open.name.as_str()))
    }

    fn unsupported(&mut self, tag: &str, len: usize) {
        self.diagnostics.unsupported_tags += 1;
        if self.reported.insert(format!("tag:{}", tag)) {
            warn!(tag, len, "Unsupported tag");
        } else {
            debug!(tag, len, "Unsupported tag");
        }
    }

    fn unrecognized(&mut self, field: &str, value: &str) {
        self.diagnostics.unrecognized_values += 1;
        if self.reported.insert(format!("{}:{}", field, value)) {
            warn!(field, value, "Unrecognized content {}", field);
        }
    }

    /// Title of the page being assembled, for error context.
    pub fn current_title(&self) -> Option<&str> {
        if self.in_page && !self.page.title.is_empty() {
            Some(&self.page.title)
        } else {
            None
        }
    }

    /// Namespace names declared in `<siteinfo>`, keyed by namespace number.
    pub fn namespaces(&self) -> &FxHashMap<String, String> {
        &self.namespaces
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Largest amount of element text held at once.
    pub fn peak_buffered(&self) -> usize {
        self.peak_buffered
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
