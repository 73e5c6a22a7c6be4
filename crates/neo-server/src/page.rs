/// Form page, optionally showing an error message and a rendered plot.
#[derive(Debug, Default, Clone)]
pub struct IndexPage<'a> {
    pub start_date: &'a str,
    pub end_date: &'a str,
    pub plot_url: Option<&'a str>,
    pub error: Option<&'a str>,
}

const TEMPLATE: &str = include_str!("../templates/index.html");

impl IndexPage<'_> {
    pub fn render(&self) -> String {
        let error = self
            .error
            .map(|msg| format!(r#"<p class="error">{}</p>"#, escape_html(msg)))
            .unwrap_or_default();
        let plot = self
            .plot_url
            .map(|url| {
                format!(
                    r#"<figure class="plot"><img src="{0}" alt="Asteroid statistics"><figcaption><a href="{0}">{0}</a></figcaption></figure>"#,
                    escape_html(url)
                )
            })
            .unwrap_or_default();

        let start_date = escape_html(self.start_date);
        let end_date = escape_html(self.end_date);
        fill(TEMPLATE, |name| match name {
            "start_date" => Some(start_date.as_str()),
            "end_date" => Some(end_date.as_str()),
            "error" => Some(error.as_str()),
            "plot" => Some(plot.as_str()),
            _ => None,
        })
    }
}

/// Substitute `{{name}}` placeholders in one pass over `template`.
///
/// Substituted text is never rescanned; unknown placeholders are kept.
fn fill<'v>(template: &str, value: impl Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}") {
            Some(close) => {
                let name = &after[..close];
                match value(name) {
                    Some(v) => out.push_str(v),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[close + 2..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
