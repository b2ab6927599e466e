//! Title and paragraph extraction for JATS-style article XML
//!
//! PMC EFetch (`rettype=full`) and MDPI's `/xml` article endpoint both serve
//! JATS. Only two things are pulled out of a document: the first
//! `<article-title>` and the `<p>` elements under the first body container.

use quick_xml::events::Event;
use tracing::debug;

use crate::common::reader_utils::{event_text, make_reader, read_text_content};
use crate::error::{ParseError, Result};

const ARTICLE_TITLE: &[u8] = b"article-title";
const PARAGRAPH: &[u8] = b"p";

/// Which element names count as the article body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyContainer {
    /// `<body>` only (PMC EFetch)
    Body,
    /// `<body>` or `<body-text>`, whichever opens first (MDPI XML)
    BodyOrBodyText,
}

impl BodyContainer {
    fn matches(self, name: &[u8]) -> bool {
        match self {
            BodyContainer::Body => name == b"body",
            BodyContainer::BodyOrBodyText => name == b"body" || name == b"body-text",
        }
    }
}

/// Text pulled from one article document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleText {
    /// Text of the first `<article-title>` in the document, untrimmed
    pub title: Option<String>,
    /// `None` when the document has no body container; otherwise the text of
    /// every `<p>` inside it in document order (possibly empty)
    pub paragraphs: Option<Vec<String>>,
}

enum BodyState {
    NotSeen,
    Inside { name: Vec<u8>, depth: u32 },
    Done,
}

impl ArticleText {
    /// Scan `xml` once and collect the title and body paragraphs.
    ///
    /// Paragraph text is the concatenation of every text node below the `<p>`,
    /// so inline markup such as `<italic>` or `<xref>` is flattened. A `<p>`
    /// nested in another `<p>` yields its own entry and also contributes to the
    /// enclosing one.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::XmlError` when the reader hits malformed markup.
    ///
    /// # Example
    ///
    /// ```
    /// use litharvest_parser::{ArticleText, BodyContainer};
    ///
    /// let xml = "<article><article-title>T</article-title>\
    ///            <body><p>one</p><sec><p>two</p></sec></body></article>";
    /// let article = ArticleText::parse(xml, BodyContainer::Body).unwrap();
    /// assert_eq!(article.title.as_deref(), Some("T"));
    /// assert_eq!(article.text().as_deref(), Some("one\ntwo"));
    /// ```
    pub fn parse(xml: &str, container: BodyContainer) -> Result<Self> {
        let mut reader = make_reader(xml);
        let mut buf = Vec::new();
        let mut title_buf = Vec::new();

        let mut title: Option<String> = None;
        let mut body = BodyState::NotSeen;
        let mut paragraphs: Vec<String> = Vec::new();
        // Indices into `paragraphs` of the <p> elements currently open
        let mut open: Vec<usize> = Vec::new();

        loop {
            match reader
                .read_event_into(&mut buf)
                .map_err(|e| ParseError::XmlError(e.to_string()))?
            {
                Event::Start(e) => {
                    let name = e.local_name().as_ref().to_vec();

                    if title.is_none() && name == ARTICLE_TITLE {
                        let text = read_text_content(&mut reader, ARTICLE_TITLE, &mut title_buf)?;
                        title_buf.clear();
                        for &idx in &open {
                            paragraphs[idx].push_str(&text);
                        }
                        title = Some(text);
                    } else if matches!(body, BodyState::NotSeen) && container.matches(&name) {
                        body = BodyState::Inside { name, depth: 1 };
                    } else if let BodyState::Inside {
                        name: body_name,
                        depth,
                    } = &mut body
                    {
                        if name == *body_name {
                            *depth += 1;
                        } else if name == PARAGRAPH {
                            open.push(paragraphs.len());
                            paragraphs.push(String::new());
                        }
                    }
                }
                Event::End(e) => {
                    if let BodyState::Inside {
                        name: body_name,
                        depth,
                    } = &mut body
                    {
                        let name = e.local_name();
                        if name.as_ref() == body_name.as_slice() {
                            *depth -= 1;
                            if *depth == 0 {
                                body = BodyState::Done;
                                open.clear();
                            }
                        } else if name.as_ref() == PARAGRAPH {
                            open.pop();
                        }
                    }
                }
                Event::Eof => break,
                other => {
                    if !open.is_empty() {
                        if let Some(chunk) = event_text(&other) {
                            for &idx in &open {
                                paragraphs[idx].push_str(&chunk);
                            }
                        }
                    }
                }
            }
            buf.clear();

            if title.is_some() && matches!(body, BodyState::Done) {
                break;
            }
        }

        let paragraphs = match body {
            BodyState::NotSeen => None,
            BodyState::Inside { .. } => {
                debug!("Body container was not closed before end of document");
                Some(paragraphs)
            }
            BodyState::Done => Some(paragraphs),
        };

        Ok(Self { title, paragraphs })
    }

    /// Whether a body container was found at all.
    pub fn has_body(&self) -> bool {
        self.paragraphs.is_some()
    }

    /// Paragraph texts joined with `"\n"`, or `None` without a body container.
    pub fn text(&self) -> Option<String> {
        self.paragraphs.as_ref().map(|paragraphs| paragraphs.join("\n"))
    }
}
