use crate::templates::{action_for, TemplateAction};
use memchr::memmem;
use rustc_hash::FxHashMap;

/// One parsed `{{name|...}}` span.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemplateOccurrence {
    pub name: String,
    pub positional: Vec<String>,
    pub named: FxHashMap<String, String>,
}

impl TemplateOccurrence {
    /// 1-based positional argument, raw.
    pub fn arg(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.positional.get(i))
            .map(String::as_str)
    }

    pub fn named_arg(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }

    pub fn action(&self) -> Option<TemplateAction> {
        action_for(&self.name)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Span {
    Template,
    Link,
    Bracket,
}

/// A template found in text: the parsed occurrence and its byte range.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMatch {
    pub start: usize,
    pub end: usize,
    pub template: TemplateOccurrence,
}

/// Parses the template whose `{{` starts at `start`.
///
/// Returns `None` when the span never closes. `|` separators and the closing
/// `}}` only count outside nested `{{ }}`, `[[ ]]` and `[ ]` spans.
pub fn parse_template_at(text: &str, start: usize) -> Option<TemplateMatch> {
    let bytes = text.as_bytes();
    if !bytes.get(start..)?.starts_with(b"{{") {
        return None;
    }

    let mut stack: Vec<Span> = Vec::new();
    // (segment start, segment end, first depth-zero '=')
    let mut segments: Vec<(usize, usize, Option<usize>)> = Vec::new();
    let mut seg_start = start + 2;
    let mut seg_eq: Option<usize> = None;
    let mut i = start + 2;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match (b, next) {
            (b'{', Some(b'{')) => {
                stack.push(Span::Template);
                i += 2;
            }
            (b'[', Some(b'[')) => {
                stack.push(Span::Link);
                i += 2;
            }
            (b'[', _) if stack.last() != Some(&Span::Link) => {
                stack.push(Span::Bracket);
                i += 1;
            }
            (b'}', Some(b'}')) => match stack.last() {
                None => {
                    segments.push((seg_start, i, seg_eq));
                    let template = build_occurrence(text, &segments)?;
                    return Some(TemplateMatch {
                        start,
                        end: i + 2,
                        template,
                    });
                }
                Some(Span::Template) => {
                    stack.pop();
                    i += 2;
                }
                // an unclosed single bracket cannot swallow the template end
                Some(Span::Bracket) => {
                    stack.pop();
                }
                Some(Span::Link) => i += 2,
            },
            (b']', Some(b']')) if stack.last() == Some(&Span::Link) => {
                stack.pop();
                i += 2;
            }
            (b']', _) if stack.last() == Some(&Span::Bracket) => {
                stack.pop();
                i += 1;
            }
            (b'|', _) if stack.is_empty() => {
                segments.push((seg_start, i, seg_eq));
                seg_start = i + 1;
                seg_eq = None;
                i += 1;
            }
            (b'=', _) if stack.is_empty() && seg_eq.is_none() => {
                seg_eq = Some(i);
                i += 1;
            }
            _ => i += 1,
        }
    }

    None
}

fn build_occurrence(
    text: &str,
    segments: &[(usize, usize, Option<usize>)],
) -> Option<TemplateOccurrence> {
    let (&(name_start, name_end, _), args) = segments.split_first()?;
    let name = text[name_start..name_end].trim();
    if name.is_empty() {
        return None;
    }

    let mut occurrence = TemplateOccurrence {
        name: name.to_string(),
        ..Default::default()
    };
    for &(s, e, eq) in args {
        match eq {
            Some(eq) if is_arg_key(text[s..eq].trim()) => {
                occurrence
                    .named
                    .insert(text[s..eq].trim().to_string(), text[eq + 1..e].trim().to_string());
            }
            _ => occurrence.positional.push(text[s..e].to_string()),
        }
    }
    Some(occurrence)
}

fn is_arg_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b' ')
}

/// Start offsets of every `{{...}}` span that closes, in ascending order.
///
/// One pass over the text with the same nesting rules as
/// [`parse_template_at`]. An opener that never closes stays on the stack and
/// is never rescanned.
fn closed_spans(text: &str) -> Vec<usize> {
    let finder = memmem::Finder::new(b"{{");
    let bytes = text.as_bytes();
    let mut stack: Vec<(Span, usize)> = Vec::new();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        // brackets outside any template cannot affect one that opens later
        if stack.is_empty() {
            match finder.find(&bytes[i..]) {
                Some(pos) => i += pos,
                None => break,
            }
        }
        let top = stack.last().map(|&(span, _)| span);
        let next = bytes.get(i + 1).copied();
        match (bytes[i], next) {
            (b'{', Some(b'{')) => {
                stack.push((Span::Template, i));
                i += 2;
            }
            (b'[', Some(b'[')) => {
                stack.push((Span::Link, i));
                i += 2;
            }
            (b'[', _) if top != Some(Span::Link) => {
                stack.push((Span::Bracket, i));
                i += 1;
            }
            (b'}', Some(b'}')) => match top {
                Some(Span::Template) => {
                    if let Some((_, start)) = stack.pop() {
                        spans.push(start);
                    }
                    i += 2;
                }
                Some(Span::Bracket) => {
                    stack.pop();
                }
                _ => i += 2,
            },
            (b']', Some(b']')) if top == Some(Span::Link) => {
                stack.pop();
                i += 2;
            }
            (b']', _) if top == Some(Span::Bracket) => {
                stack.pop();
                i += 1;
            }
            _ => i += 1,
        }
    }

    spans.sort_unstable();
    spans
}

/// Finds the first complete template in `text`, skipping unterminated ones.
pub fn first_template(text: &str) -> Option<TemplateMatch> {
    closed_spans(text)
        .into_iter()
        .find_map(|start| parse_template_at(text, start))
}

/// Rewrites a template per its action, or `None` to leave it verbatim.
fn rewrite(template: &TemplateOccurrence) -> Option<String> {
    match template.action()? {
        TemplateAction::Replace(replacement) => {
            Some(replacement.replace("\\1", template.arg(1).unwrap_or("")))
        }
        TemplateAction::Arg(n) => template.arg(n).map(str::to_string),
        TemplateAction::Drop => Some(String::new()),
    }
}

/// Replaces every recognized top-level template in `text`.
///
/// Unrecognized templates, templates missing the argument their action needs,
/// and unterminated spans are copied through untouched. Substituted values are
/// not normalized again.
pub fn normalize(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run_start = 0;
    let mut from = 0;

    for start in closed_spans(text) {
        if start < from {
            continue;
        }
        let Some(found) = parse_template_at(text, start) else {
            continue;
        };
        if let Some(replacement) = rewrite(&found.template) {
            result.push_str(&text[run_start..start]);
            result.push_str(&replacement);
            run_start = found.end;
        }
        from = found.end;
    }

    result.push_str(&text[run_start..]);
    result
}
