//! Permissive string-based HTML pass for guide content.
//!
//! Strips the obvious active-content vectors (`<script>`/`<iframe>` blocks,
//! inline event handlers, `javascript:` URLs) and tags code blocks with a
//! naively detected language. This is not a parser-based sanitizer and is
//! only suitable for first-party CMS content; if content provenance ever
//! becomes untrusted, replace `clean` with a real allow-list sanitizer.

/// Runs all sanitization passes over a guide's HTML content.
pub fn clean(content: &str) -> String {
    let mut output = strip_element_blocks(content, "script");
    output = strip_element_blocks(&output, "iframe");
    output = strip_event_handlers(&output);
    output = strip_scheme(&output, "javascript:");
    tag_code_languages(&output)
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Removes every `<tag ...>...</tag>` block, case-insensitively. The tag
/// name must end at a word boundary so `<scripted>` is not mistaken for
/// `<script>`. An opening tag without a matching close swallows the rest of
/// the input.
fn strip_element_blocks(content: &str, tag: &str) -> String {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let mut output = String::with_capacity(content.len());
    let mut pos = 0;
    while let Some(found) = find_ignore_case(&content[pos..], &open) {
        let start = pos + found;
        let name_end = start + open.len();
        let at_boundary = match content.as_bytes().get(name_end) {
            Some(b'>') | Some(b'/') | None => true,
            Some(b) => b.is_ascii_whitespace(),
        };
        if !at_boundary {
            // A longer element name that merely starts with the tag
            output.push_str(&content[pos..name_end]);
            pos = name_end;
            continue;
        }
        output.push_str(&content[pos..start]);
        match find_ignore_case(&content[start..], &close) {
            Some(end) => pos = start + end + close.len(),
            None => return output,
        }
    }
    output.push_str(&content[pos..]);
    output
}

/// Removes inline `on*="..."` event handler attributes.
fn strip_event_handlers(content: &str) -> String {
    let bytes = content.as_bytes();
    let mut output = String::with_capacity(content.len());
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(len) = event_handler_len(&content[pos..]) {
            // Also drop the whitespace that separated the attribute
            while output.ends_with(' ') {
                output.pop();
            }
            pos += len;
        } else {
            let ch = content[pos..].chars().next().unwrap_or('\0');
            output.push(ch);
            pos += ch.len_utf8();
        }
    }
    output
}

/// Length of an `on*="..."` attribute at the start of `input`, if present.
fn event_handler_len(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.len() < 5 || !bytes[..2].eq_ignore_ascii_case(b"on") {
        return None;
    }
    let mut i = 2;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i == 2 || !bytes[i..].starts_with(b"=\"") {
        return None;
    }
    let value_start = i + 2;
    let value_len = bytes[value_start..].iter().position(|&b| b == b'"')?;
    Some(value_start + value_len + 1)
}

/// Removes every occurrence of a URL scheme, case-insensitively.
fn strip_scheme(content: &str, scheme: &str) -> String {
    let mut output = String::with_capacity(content.len());
    let mut pos = 0;
    while let Some(start) = find_ignore_case(&content[pos..], scheme) {
        let start = pos + start;
        output.push_str(&content[pos..start]);
        pos = start + scheme.len();
    }
    output.push_str(&content[pos..]);
    output
}

/// Annotates `<pre><code>` blocks with a `data-language` attribute so the
/// stylesheet can label them.
fn tag_code_languages(content: &str) -> String {
    const OPEN: &str = "<pre><code>";
    const CLOSE: &str = "</code></pre>";

    let mut output = String::with_capacity(content.len());
    let mut pos = 0;
    while let Some(start) = content[pos..].find(OPEN) {
        let start = pos + start;
        let body_start = start + OPEN.len();
        let Some(body_len) = content[body_start..].find(CLOSE) else {
            break;
        };
        let code = &content[body_start..body_start + body_len];

        output.push_str(&content[pos..start]);
        output.push_str(&format!(
            "<pre data-language=\"{}\"><code>{}</code></pre>",
            detect_language(code),
            code
        ));
        pos = body_start + body_len + CLOSE.len();
    }
    output.push_str(&content[pos..]);
    output
}

/// Best-effort language detection for a code block, keyed off common
/// keywords. Checked in the same precedence order the site has always used.
fn detect_language(code: &str) -> &'static str {
    if code.contains("function")
        || code.contains("const")
        || code.contains("let ")
        || code.contains("var ")
    {
        "javascript"
    } else if code.contains("import") && (code.contains("from") || code.contains("export")) {
        "javascript"
    } else if code.contains("def ") || code.contains("import ") || code.contains("class ") {
        "python"
    } else if code.contains("public class")
        || code.contains("private ")
        || code.contains("System.out")
    {
        "java"
    } else if code.contains("<?php") || code.contains("echo ") || code.contains('$') {
        "php"
    } else if code.contains("SELECT") || code.contains("FROM") || code.contains("WHERE") {
        "sql"
    } else if code.contains("<html") || code.contains("<div") || code.contains("<span") {
        "html"
    } else if code.contains('{') && code.contains('}') && code.contains(':') {
        "css"
    } else {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_blocks_case_insensitively() {
        let input = "<p>before</p><SCRIPT>alert(1)</SCRIPT><p>after</p>";
        assert_eq!(clean(input), "<p>before</p><p>after</p>");
    }

    #[test]
    fn strips_unclosed_script_to_end() {
        let input = "<p>keep</p><script>evil(";
        assert_eq!(clean(input), "<p>keep</p>");
    }

    #[test]
    fn strips_iframe_blocks() {
        let input = r#"<iframe src="http://evil"></iframe><p>ok</p>"#;
        assert_eq!(clean(input), "<p>ok</p>");
    }

    #[test]
    fn strips_inline_event_handlers() {
        let input = r#"<img src="x.png" onerror="alert(1)" alt="x">"#;
        assert_eq!(clean(input), r#"<img src="x.png" alt="x">"#);
    }

    #[test]
    fn strips_javascript_urls() {
        let input = r#"<a href="javascript:alert(1)">x</a>"#;
        assert_eq!(clean(input), r#"<a href="alert(1)">x</a>"#);
    }

    #[test]
    fn leaves_longer_tag_names_with_matching_prefix_alone() {
        let input = "<scripted-widget>keep</scripted-widget><script>drop()</script>";
        assert_eq!(clean(input), "<scripted-widget>keep</scripted-widget>");
    }

    #[test]
    fn strips_script_with_attributes() {
        let input = r#"<p>ok</p><script type="module">evil()</script>"#;
        assert_eq!(clean(input), "<p>ok</p>");
    }

    #[test]
    fn leaves_plain_markup_alone() {
        let input = "<h1>Title</h1><p>Body with <em>emphasis</em>.</p>";
        assert_eq!(clean(input), input);
    }

    #[test]
    fn tags_code_blocks_with_detected_language() {
        let input = "<pre><code>const x = 1;</code></pre>";
        assert_eq!(
            clean(input),
            "<pre data-language=\"javascript\"><code>const x = 1;</code></pre>"
        );
    }

    #[test]
    fn detects_common_languages() {
        assert_eq!(detect_language("def main():\n    pass"), "python");
        assert_eq!(detect_language("SELECT * FROM users"), "sql");
        assert_eq!(detect_language("<div>hello</div>"), "html");
        assert_eq!(detect_language("body { color: red; }"), "css");
        assert_eq!(detect_language("plain words"), "text");
    }
}
