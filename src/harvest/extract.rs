// Copyright 2026 Quill Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTML extraction for the two source sites.
//!
//! Neither site offers semantic markup for what we want, so extraction is
//! positional: "the third table", "the first `poemListBox` div". A page that
//! no longer matches these assumptions is a hard error — there is nothing
//! sensible to fall back to, and silently scraping the wrong element would
//! poison the corpus.

use anyhow::{bail, Result};
use scraper::{Html, Selector};

/// All hrefs inside the third `<table>` of the essay index page,
/// in document order.
pub fn essay_links(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();

    let Some(table) = document.select(&table_sel).nth(2) else {
        bail!("essay index: expected at least 3 <table> elements");
    };

    Ok(table
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| href.to_string())
        .collect())
}

/// The essay text: first `<font>` element of the first `<table>`.
pub fn essay_body(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let font_sel = Selector::parse("font").unwrap();

    let Some(table) = document.select(&table_sel).next() else {
        bail!("essay page: no <table> element");
    };
    let Some(font) = table.select(&font_sel).next() else {
        bail!("essay page: no <font> element in first <table>");
    };

    Ok(font.text().collect::<String>())
}

/// All hrefs inside the first `poemListBox` div of a poem index page,
/// query strings stripped.
pub fn poem_links(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let box_sel = Selector::parse("div.poemListBox").unwrap();
    let link_sel = Selector::parse("a[href]").unwrap();

    let Some(list) = document.select(&box_sel).next() else {
        bail!("poem index: no poemListBox div");
    };

    Ok(list
        .select(&link_sel)
        .filter_map(|a| a.value().attr("href"))
        .map(|href| strip_query(href).to_string())
        .collect())
}

/// One line per `<p>` descendant of the first `pd-text` div.
pub fn poem_paragraphs(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let box_sel = Selector::parse("div.pd-text").unwrap();
    let p_sel = Selector::parse("p").unwrap();

    let Some(text_box) = document.select(&box_sel).next() else {
        bail!("poem page: no pd-text div");
    };

    Ok(text_box
        .select(&p_sel)
        .map(|p| p.text().collect::<String>())
        .collect())
}

/// Drop a `?query` suffix, if any.
fn strip_query(href: &str) -> &str {
    href.split('?').next().unwrap_or(href)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_essay_links_third_table() {
        let html = r#"
            <table><tr><td><a href="ignored1.html">x</a></td></tr></table>
            <table><tr><td><a href="ignored2.html">y</a></td></tr></table>
            <table>
              <tr><td><a href="essay1.html">Essay One</a></td></tr>
              <tr><td><a href="essay2.html">Essay Two</a></td></tr>
            </table>
        "#;
        let links = essay_links(html).unwrap();
        assert_eq!(links, vec!["essay1.html", "essay2.html"]);
    }

    #[test]
    fn test_essay_links_too_few_tables() {
        let html = "<table><a href='a.html'>a</a></table>";
        let err = essay_links(html).unwrap_err();
        assert!(err.to_string().contains("at least 3"));
    }

    #[test]
    fn test_essay_body_first_font() {
        // The parser foster-parents table content that isn't inside a cell,
        // so fixtures must nest <font> in <tr><td> like the real pages do.
        let html = r#"
            <table><tr><td>
              <font>The essay text.</font><font>footer</font>
            </td></tr></table>
            <table><tr><td><font>other table</font></td></tr></table>
        "#;
        assert_eq!(essay_body(html).unwrap(), "The essay text.");
    }

    #[test]
    fn test_essay_body_nested_markup() {
        let html = "<table><tr><td><font>One <b>bold</b> word.</font></td></tr></table>";
        assert_eq!(essay_body(html).unwrap(), "One bold word.");
    }

    #[test]
    fn test_essay_body_missing_font() {
        let html = "<table><tr><td>no font here</td></tr></table>";
        assert!(essay_body(html).is_err());
    }

    #[test]
    fn test_poem_links_strip_query() {
        let html = r#"
            <div class="poemListBox">
              <a href="/poem/one?ref=list">One</a>
              <a href="/poem/two">Two</a>
            </div>
        "#;
        let links = poem_links(html).unwrap();
        assert_eq!(links, vec!["/poem/one", "/poem/two"]);
    }

    #[test]
    fn test_poem_links_first_box_only() {
        let html = r#"
            <div class="poemListBox"><a href="/poem/a">a</a></div>
            <div class="poemListBox"><a href="/poem/b">b</a></div>
        "#;
        assert_eq!(poem_links(html).unwrap(), vec!["/poem/a"]);
    }

    #[test]
    fn test_poem_links_missing_box() {
        assert!(poem_links("<div class='other'></div>").is_err());
    }

    #[test]
    fn test_poem_paragraphs() {
        let html = r#"
            <div class="pd-text">
              <p>First line</p>
              <p>Second line</p>
            </div>
        "#;
        assert_eq!(
            poem_paragraphs(html).unwrap(),
            vec!["First line", "Second line"]
        );
    }

    #[test]
    fn test_poem_paragraphs_missing_box() {
        assert!(poem_paragraphs("<p>stray</p>").is_err());
    }
}
