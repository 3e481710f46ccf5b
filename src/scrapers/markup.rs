//! Queryable view over one fetched page.
//!
//! Lookups use the class dialect of the listing site: a single-word class
//! signature matches any element carrying that class, while a multi-word
//! signature must equal the element's whole (whitespace-normalised) class
//! list. `button.btn.video` and `"multimedia-shortcuts-button btn video"` are
//! therefore not the same thing, which is why this module does not go through
//! CSS selectors.

use scraper::{ElementRef, Html};

/// Attribute predicate of a [`Locator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMatch {
    Any,
    Class(&'static str),
    Id(&'static str),
}

/// Tag name plus attribute predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub tag: &'static str,
    pub attr: AttrMatch,
}

impl Locator {
    pub const fn tag(tag: &'static str) -> Self {
        Self {
            tag,
            attr: AttrMatch::Any,
        }
    }

    pub const fn class(tag: &'static str, signature: &'static str) -> Self {
        Self {
            tag,
            attr: AttrMatch::Class(signature),
        }
    }

    pub const fn id(tag: &'static str, id: &'static str) -> Self {
        Self {
            tag,
            attr: AttrMatch::Id(id),
        }
    }

    fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if !value.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }

        match self.attr {
            AttrMatch::Any => true,
            AttrMatch::Id(id) => value.attr("id") == Some(id),
            AttrMatch::Class(signature) => value
                .attr("class")
                .is_some_and(|classes| class_matches(classes, signature)),
        }
    }
}

fn class_matches(classes: &str, signature: &str) -> bool {
    if classes.split_whitespace().any(|class| class == signature) {
        return true;
    }
    classes.split_whitespace().collect::<Vec<_>>().join(" ") == signature
}

/// One parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Serialized markup of the whole page
    pub fn html(&self) -> String {
        self.html.html()
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }

    /// First element in document order matching `locator`
    pub fn find(&self, locator: &Locator) -> Option<Node<'_>> {
        self.elements()
            .find(|element| locator.matches(element))
            .map(Node)
    }
}

/// An element of a [`Document`]; scoped lookups only see its descendants.
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    fn descendants(&self) -> impl Iterator<Item = ElementRef<'a>> {
        self.0.descendants().skip(1).filter_map(ElementRef::wrap)
    }

    pub fn find(&self, locator: &Locator) -> Option<Node<'a>> {
        self.descendants()
            .find(|element| locator.matches(element))
            .map(Node)
    }

    pub fn find_all(&self, locator: &Locator) -> Vec<Node<'a>> {
        self.descendants()
            .filter(|element| locator.matches(element))
            .map(Node)
            .collect()
    }

    /// All descendant text, concatenated verbatim
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// True when the node holds visible text or any child element.
    pub fn has_content(&self) -> bool {
        self.0.text().any(|chunk| !chunk.trim().is_empty())
            || self.0.children().any(|child| child.value().is_element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <div class="outer">
            <button class="multimedia-shortcuts-button btn video">Vídeo</button>
            <button class="btn   video multimedia-shortcuts-button">Otro</button>
            <span class="txt-bold extra">1</span>
            <div id="homestaging"></div>
            <ul><li>uno</li><li>dos</li></ul>
        </div>
    </body></html>"#;

    #[test]
    fn test_multi_word_class_requires_exact_list() {
        let doc = Document::parse(PAGE);
        let outer = doc.find(&Locator::class("div", "outer")).unwrap();
        let found =
            outer.find_all(&Locator::class("button", "multimedia-shortcuts-button btn video"));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), "Vídeo");
    }

    #[test]
    fn test_single_word_class_matches_any_member() {
        let doc = Document::parse(PAGE);

        let outer = doc.find(&Locator::class("div", "outer")).unwrap();

        assert!(doc.find(&Locator::class("span", "txt-bold")).is_some());
        assert_eq!(outer.find_all(&Locator::class("button", "video")).len(), 2);
        assert!(doc.find(&Locator::class("div", "txt-bold")).is_none());
    }

    #[test]
    fn test_scoped_find_skips_the_node_itself() {
        let doc = Document::parse(PAGE);
        let outer = doc.find(&Locator::class("div", "outer")).unwrap();

        assert!(outer.find(&Locator::class("div", "outer")).is_none());
        assert_eq!(outer.find_all(&Locator::tag("li")).len(), 2);
    }

    #[test]
    fn test_id_lookup_and_empty_node() {
        let doc = Document::parse(PAGE);
        let node = doc.find(&Locator::id("div", "homestaging")).unwrap();

        assert_eq!(node.attr("id"), Some("homestaging"));
        assert!(!node.has_content());
        assert!(doc.html().contains("homestaging"));
    }
}
