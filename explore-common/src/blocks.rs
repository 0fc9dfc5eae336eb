//! Content blocks for editorial pages
//!
//! Contributor-authored content (article bodies, item page notes) is an
//! ordered sequence of typed blocks. The set of block kinds is closed: a
//! tagged union serialized as internally tagged JSON, with rendering handled
//! by dispatch over the variant rather than by runtime lookup.

use serde::{Deserialize, Serialize};

/// One block of contributor-authored content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Full-width title text
    Heading { text: String },
    /// Rich text paragraph (sanitized HTML fragment)
    Paragraph { html: String },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Quote {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },
    /// Link to another page on the site
    PageLink { slug: String },
    Document { url: String, title: String },
    /// External embed resolved client-side from its URL
    Embed { url: String },
    /// Embedded Wikidata SPARQL query, executed when the page is rendered
    WikidataQuery {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        intro: Option<String>,
        sparql: String,
    },
}

/// Discriminant for a content block variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    Image,
    Quote,
    PageLink,
    Document,
    Embed,
    WikidataQuery,
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Heading { .. } => BlockKind::Heading,
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::Image { .. } => BlockKind::Image,
            ContentBlock::Quote { .. } => BlockKind::Quote,
            ContentBlock::PageLink { .. } => BlockKind::PageLink,
            ContentBlock::Document { .. } => BlockKind::Document,
            ContentBlock::Embed { .. } => BlockKind::Embed,
            ContentBlock::WikidataQuery { .. } => BlockKind::WikidataQuery,
        }
    }

    /// Plain-text projection of the block, used for feed summaries
    pub fn plain_text(&self) -> &str {
        match self {
            ContentBlock::Heading { text } => text,
            ContentBlock::Paragraph { html } => html,
            ContentBlock::Quote { text, .. } => text,
            ContentBlock::Document { title, .. } => title,
            ContentBlock::WikidataQuery { intro, .. } => intro.as_deref().unwrap_or(""),
            ContentBlock::Image { .. } | ContentBlock::PageLink { .. } | ContentBlock::Embed { .. } => "",
        }
    }
}

/// Registry of block kinds accepted by the editorial surface.
///
/// Built once at startup from a static list. Keeping the registry explicit
/// (instead of registering kinds from module side effects) means the accepted
/// set is visible in one place and identical in every binary.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    kinds: &'static [BlockKind],
}

impl BlockRegistry {
    pub const ALL: &'static [BlockKind] = &[
        BlockKind::Heading,
        BlockKind::Paragraph,
        BlockKind::Image,
        BlockKind::Quote,
        BlockKind::PageLink,
        BlockKind::Document,
        BlockKind::Embed,
        BlockKind::WikidataQuery,
    ];

    pub fn new() -> Self {
        Self { kinds: Self::ALL }
    }

    pub fn kinds(&self) -> &[BlockKind] {
        self.kinds
    }

    pub fn accepts(&self, kind: BlockKind) -> bool {
        self.kinds.contains(&kind)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_serialize_with_type_tag() {
        let block = ContentBlock::WikidataQuery {
            intro: Some("Recent papers".to_string()),
            sparql: "SELECT ?x WHERE { ?x wdt:P31 wd:Q5 }".to_string(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "wikidata_query");
        assert_eq!(json["intro"], "Recent papers");

        let back: ContentBlock = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn unknown_block_type_is_rejected() {
        let result = serde_json::from_str::<ContentBlock>(r#"{"type": "carousel", "urls": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn registry_covers_every_variant() {
        let registry = BlockRegistry::new();
        let block = ContentBlock::Heading { text: "t".into() };
        assert!(registry.accepts(block.kind()));
        assert_eq!(registry.kinds().len(), 8);
    }

    #[test]
    fn plain_text_dispatch() {
        let block = ContentBlock::Quote {
            text: "So long".into(),
            attribution: Some("the dolphins".into()),
        };
        assert_eq!(block.plain_text(), "So long");
        assert_eq!(ContentBlock::Embed { url: "https://x".into() }.plain_text(), "");
    }
}
