//! Class-selector lookup over raw HTML.
//!
//! Only `.class-name` selectors are understood. Matching is string based,
//! tolerant of malformed markup, and never fails: anything it cannot make
//! sense of is simply not matched.

const VOID_ELEMENTS: [&str; 8] = ["br", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// A region of an HTML document: the whole page or the content of one element.
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    html: &'a str,
}

impl<'a> Fragment<'a> {
    pub fn new(html: &'a str) -> Self {
        Self { html }
    }

    /// Every element below this fragment carrying the selector's class, in
    /// document order. Nested matches are included.
    pub fn select(&self, selector: &str) -> Vec<Fragment<'a>> {
        match class_of(selector) {
            Some(class) => find_elements(self.html, class).into_iter().map(Fragment::new).collect(),
            None => Vec::new(),
        }
    }

    /// First element carrying the selector's class.
    pub fn select_one(&self, selector: &str) -> Option<Fragment<'a>> {
        self.select(selector).into_iter().next()
    }

    /// Visible text with tags removed, entities decoded, whitespace collapsed.
    pub fn text(&self) -> String {
        normalize_ws(&decode_entities(&strip_tags(self.html)))
    }
}

fn class_of(selector: &str) -> Option<&str> {
    let class = selector.trim().strip_prefix('.')?;
    if class.is_empty() || class.contains(|c: char| c.is_whitespace() || c == '.') {
        return None;
    }
    Some(class)
}

struct OpenTag<'a> {
    name: &'a str,
    attrs: &'a str,
    end: usize,
    self_closing: bool,
}

fn find_elements<'a>(html: &'a str, class: &str) -> Vec<&'a str> {
    // ASCII lowercasing keeps byte offsets identical between both strings.
    let lower = html.to_ascii_lowercase();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(rel) = lower[pos..].find('<') {
        let start = pos + rel;
        let Some(tag) = parse_open_tag(html, &lower, start) else {
            pos = start + 1;
            continue;
        };

        if has_class(tag.attrs, class) {
            if tag.self_closing {
                found.push(&html[tag.end..tag.end]);
            } else if let Some(close) = matching_close(&lower, tag.name, tag.end) {
                found.push(&html[tag.end..close]);
            }
        }
        pos = tag.end;
    }

    found
}

fn parse_open_tag<'l>(html: &'l str, lower: &'l str, start: usize) -> Option<OpenTag<'l>> {
    let rest = &lower[start + 1..];
    let name_len = rest.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(rest.len());
    if name_len == 0 {
        // closing tags, comments, doctype
        return None;
    }
    let end = start + lower[start..].find('>')? + 1;
    let name_end = start + 1 + name_len;
    let name = &lower[start + 1..name_end];
    let attrs = &html[name_end..end - 1];
    let self_closing = attrs.trim_end().ends_with('/') || VOID_ELEMENTS.contains(&name);

    Some(OpenTag { name, attrs, end, self_closing })
}

fn has_class(attrs: &str, class: &str) -> bool {
    class_attr(attrs).is_some_and(|list| list.split_whitespace().any(|c| c == class))
}

fn class_attr(attrs: &str) -> Option<&str> {
    let lower = attrs.to_ascii_lowercase();
    let bytes = attrs.as_bytes();
    let mut search = 0;

    while let Some(rel) = lower[search..].find("class") {
        let at = search + rel;
        search = at + "class".len();

        let starts_attr = at == 0 || bytes[at - 1].is_ascii_whitespace();
        let mut i = search;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if !starts_attr || i >= bytes.len() || bytes[i] != b'=' {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }

        if bytes[i] == b'"' || bytes[i] == b'\'' {
            let quote = bytes[i] as char;
            let value_start = i + 1;
            let value_end =
                attrs[value_start..].find(quote).map_or(attrs.len(), |e| value_start + e);
            return Some(&attrs[value_start..value_end]);
        }

        let value_end = attrs[i..]
            .find(|c: char| c.is_whitespace() || c == '/')
            .map_or(attrs.len(), |e| i + e);
        return Some(&attrs[i..value_end]);
    }

    None
}

/// Byte offset of the close tag matching an element opened just before `from`.
fn matching_close(lower: &str, name: &str, from: usize) -> Option<usize> {
    let open_pat = format!("<{}", name);
    let close_pat = format!("</{}", name);
    let bytes = lower.as_bytes();
    let is_boundary =
        |at: usize| bytes.get(at).is_none_or(|b| !b.is_ascii_alphanumeric() && *b != b'-');

    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let close = pos + lower[pos..].find(&close_pat)?;

        let mut scan = pos;
        while let Some(rel) = lower[scan..close].find(&open_pat) {
            let at = scan + rel;
            if is_boundary(at + open_pat.len()) {
                depth += 1;
            }
            scan = at + open_pat.len();
        }

        let after = close + close_pat.len();
        if is_boundary(after) {
            depth -= 1;
            if depth == 0 {
                return Some(close);
            }
        }
        pos = after;
    }
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <div class="character-info">
    <span class="server-name">Siel</span>
    <span class='character-level'>Lv. 45</span>
    <div class="combat-power"><strong>12,450</strong></div>
    <div class="box"><div class="box inner">nested</div></div>
  </div>
  <ul>
    <li class="stigma-skill active"><span class="skill-name">Cleave</span></li>
    <li class="stigma-skill"><span class="skill-name">Rage &amp; Fury</span></li>
  </ul>
  <img class="portrait" src="a.png">
  <span data-class="server-name">decoy</span>
</body></html>"#;

    #[test]
    fn selects_by_class_with_either_quote_style() {
        let page = Fragment::new(PAGE);
        assert_eq!(page.select_one(".server-name").unwrap().text(), "Siel");
        assert_eq!(page.select_one(".character-level").unwrap().text(), "Lv. 45");
        assert_eq!(page.select(".server-name").len(), 1);
    }

    #[test]
    fn text_strips_nested_tags_and_entities() {
        let page = Fragment::new(PAGE);
        assert_eq!(page.select_one(".combat-power").unwrap().text(), "12,450");

        let skills: Vec<String> = page
            .select(".stigma-skill")
            .iter()
            .filter_map(|item| item.select_one(".skill-name"))
            .map(|name| name.text())
            .collect();
        assert_eq!(skills, vec!["Cleave", "Rage & Fury"]);
    }

    #[test]
    fn nested_same_tag_finds_matching_close() {
        let page = Fragment::new(PAGE);
        let boxes = page.select(".box");
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].text(), "nested");
        assert_eq!(boxes[1].text(), "nested");
    }

    #[test]
    fn void_elements_match_with_empty_content() {
        let page = Fragment::new(PAGE);
        assert_eq!(page.select_one(".portrait").map(|f| f.text()), Some(String::new()));
    }

    #[test]
    fn missing_or_unsupported_selectors_match_nothing() {
        let page = Fragment::new(PAGE);
        assert!(page.select_one(".weapon-name").is_none());
        assert!(page.select("div > span").is_empty());
        assert!(page.select(".").is_empty());
    }

    #[test]
    fn unclosed_element_is_skipped() {
        let page = Fragment::new(r#"<div class="stat-hp">45,600"#);
        assert!(page.select_one(".stat-hp").is_none());
    }
}
