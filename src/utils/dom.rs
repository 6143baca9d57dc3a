use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// First element matching `selector` in the document. Invalid selectors count as absent.
pub fn query(selector: &str) -> Option<Element> {
    document().and_then(|d| d.query_selector(selector).ok().flatten())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document() {
        Some(d) => collect(d.query_selector_all(selector).ok()),
        None => Vec::new(),
    }
}

pub fn query_all_in(ctx: &Element, selector: &str) -> Vec<Element> {
    collect(ctx.query_selector_all(selector).ok())
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Same as [`query`], narrowed to an HTML element.
pub fn query_html(selector: &str) -> Option<HtmlElement> {
    query(selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Inline style of an HTML or SVG element.
pub fn style_of(el: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        Some(html.style())
    } else {
        el.dyn_ref::<SvgElement>().map(|svg| svg.style())
    }
}

fn collect(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
