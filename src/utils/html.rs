// src/utils/html.rs

//! Markup helpers shared by the channel and message extractors.

use scraper::{ElementRef, Node, Selector};

/// First descendant matching a CSS selector, or `None`.
pub fn find<'a>(root: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let parsed = Selector::parse(selector).ok()?;
    root.select(&parsed).next()
}

/// All descendants matching a CSS selector, in document order.
pub fn find_all<'a>(root: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(parsed) => root.select(&parsed).collect(),
        Err(_) => Vec::new(),
    }
}

/// Collect the text of an element, rendering `<br>` tags as newlines.
pub fn text_with_newlines(element: ElementRef) -> String {
    let mut out = String::new();
    append_text(element, &mut out);
    out
}

fn append_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    append_text(child_ref, out);
                }
            }
            _ => {}
        }
    }
}

/// Pull a pixel width out of an inline `style` attribute.
pub fn style_width(style: &str) -> Option<u32> {
    let pattern = regex::Regex::new(r"width:([0-9]+)").ok()?;
    pattern.captures(style)?.get(1)?.as_str().parse().ok()
}

/// Pull the `padding-top` percentage out of an inline `style` attribute.
///
/// The feed encodes a media aspect ratio as a percentage padding hack; the
/// caller recovers the height as `width * ratio / 100`.
pub fn style_padding_ratio(style: &str) -> Option<f64> {
    let pattern = regex::Regex::new(r"padding-top:([.0-9]+)").ok()?;
    pattern.captures(style)?.get(1)?.as_str().parse().ok()
}

/// Pull the URL out of a `background-image: url('...')` style value.
pub fn style_background_url(style: &str) -> Option<String> {
    let pattern = regex::Regex::new(r"background-image:\s*url\('(.+?)'\)").ok()?;
    Some(pattern.captures(style)?.get(1)?.as_str().to_string())
}

/// Derive a media height from its width and padding-top ratio, rounded down.
pub fn scaled_height(width: u32, ratio: f64) -> u32 {
    (f64::from(width) * ratio / 100.0).floor() as u32
}
