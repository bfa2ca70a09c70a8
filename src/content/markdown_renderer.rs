use markdown::Options;

pub fn render_markdown(md_text: &str) -> Result<String, String> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(e.reason.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_gfm() {
        let html = render_markdown("## Intro\n\nSome **bold** and ~~old~~ text\n").unwrap();
        assert_eq!(html, "<h2>Intro</h2>\n<p>Some <strong>bold</strong> and <del>old</del> text</p>\n");
    }
}
