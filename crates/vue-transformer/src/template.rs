//! Template markup handling.
//!
//! Markup is not translated. Mustache interpolation is reduced to JSX
//! expression containers and the result is returned from `render`.

/// Replaces `{{` with `{` and `}}` with `}`.
pub fn escape_template(markup: &str) -> String {
    markup.replace("{{", "{").replace("}}", "}")
}

/// A render body returning `markup`.
pub(crate) fn render_body(markup: &str) -> String {
    let lines = dedent(markup);
    let mut body = String::from("{\n  return (\n");
    for line in &lines {
        if !line.is_empty() {
            body.push_str("    ");
            body.push_str(line);
        }
        body.push('\n');
    }
    body.push_str("  );\n}");
    body
}

/// Drops leading and trailing blank lines and the common indentation.
fn dedent(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };

    let lines = &lines[first..=last];
    let common = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .copied()
        .map(|line| line.get(common..).unwrap_or(""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_interpolation() {
        assert_eq!(escape_template("<p>{{ x }}</p>"), "<p>{ x }</p>");
        assert_eq!(
            escape_template("<p :a=\"b\">{{a}} and {{ b.c }}</p>"),
            "<p :a=\"b\">{a} and { b.c }</p>"
        );
    }

    #[test]
    fn test_escape_passthrough() {
        let markup = "<div class=\"x\">{ single } text</div>";
        assert_eq!(escape_template(markup), markup);
    }

    #[test]
    fn test_render_body() {
        let markup = "\n  <div>\n    <p>{ msg }</p>\n  </div>\n";
        assert_eq!(
            render_body(markup),
            "{\n  return (\n    <div>\n      <p>{ msg }</p>\n    </div>\n  );\n}"
        );
    }

    #[test]
    fn test_render_body_keeps_inner_blank_lines() {
        assert_eq!(
            render_body("<a/>\n\n<b/>"),
            "{\n  return (\n    <a/>\n\n    <b/>\n  );\n}"
        );
    }
}
