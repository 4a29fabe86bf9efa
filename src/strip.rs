// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markup stripping for post bodies.
//!
//! The builder never parses HTML itself. It calls whatever [`MarkupStripper`]
//! it was handed, which lets tests pass a plain closure and lets a site
//! generator plug in its own renderer's text extraction. [`HtmlStripper`] is
//! the stock implementation for rendered HTML bodies.
//!
//! # How HtmlStripper works
//!
//! Two streaming passes with `lol_html`:
//!
//! 1. Drop `script`, `style`, `noscript` and `template` along with their
//!    content, and pad block-level elements with spaces so `<p>a</p><p>b</p>`
//!    reads "a b" and not "ab".
//! 2. Collect every text chunk of what is left.
//!
//! Text chunks come back with entities still encoded. Markdown engines emit
//! typographic references (`&rsquo;`, `&mdash;`, `&hellip;`) all the time, so
//! they are decoded against the full HTML5 table before whitespace is collapsed.

#[cfg(feature = "html")]
use std::cell::RefCell;
#[cfg(feature = "html")]
use std::rc::Rc;

#[cfg(feature = "html")]
use lol_html::html_content::ContentType;
#[cfg(feature = "html")]
use lol_html::{doc_text, element, rewrite_str, RewriteStrSettings};

use crate::utils::collapse_whitespace;

/// Turns a rendered post body into plain text.
///
/// Implementations must be pure: same input, same output. Corpus builds are
/// expected to be byte-reproducible.
pub trait MarkupStripper {
    fn strip(&self, markup: &str) -> String;
}

impl<F> MarkupStripper for F
where
    F: Fn(&str) -> String,
{
    fn strip(&self, markup: &str) -> String {
        self(markup)
    }
}

/// Stripper for bodies that are already plain text (or markdown the reader
/// should see verbatim). Only collapses whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl MarkupStripper for PlainText {
    fn strip(&self, markup: &str) -> String {
        collapse_whitespace(markup)
    }
}

/// HTML to plain text, backed by `lol_html`.
#[cfg(feature = "html")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlStripper;

#[cfg(feature = "html")]
const DROPPED_ELEMENTS: &str = "script, style, noscript, template";

#[cfg(feature = "html")]
const BLOCK_ELEMENTS: &str = "address, article, aside, blockquote, br, dd, div, dl, dt, \
    figcaption, figure, footer, h1, h2, h3, h4, h5, h6, header, hr, li, main, nav, ol, p, \
    pre, section, table, td, th, tr, ul";

#[cfg(feature = "html")]
impl HtmlStripper {
    fn try_strip(&self, markup: &str) -> Result<String, lol_html::errors::RewritingError> {
        let cleaned = rewrite_str(
            markup,
            RewriteStrSettings {
                element_content_handlers: vec![
                    element!(DROPPED_ELEMENTS, |el| {
                        el.remove();
                        Ok(())
                    }),
                    element!(BLOCK_ELEMENTS, |el| {
                        el.before(" ", ContentType::Text);
                        el.after(" ", ContentType::Text);
                        Ok(())
                    }),
                ],
                ..RewriteStrSettings::default()
            },
        )?;

        let text = Rc::new(RefCell::new(String::with_capacity(cleaned.len())));
        rewrite_str(
            &cleaned,
            RewriteStrSettings {
                document_content_handlers: vec![doc_text!({
                    let text = Rc::clone(&text);
                    move |chunk| {
                        text.borrow_mut().push_str(chunk.as_str());
                        Ok(())
                    }
                })],
                ..RewriteStrSettings::default()
            },
        )?;

        let raw = text.borrow();
        Ok(collapse_whitespace(&decode_entities(&raw)))
    }
}

#[cfg(feature = "html")]
impl MarkupStripper for HtmlStripper {
    fn strip(&self, markup: &str) -> String {
        match self.try_strip(markup) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "failed to strip markup; indexing empty body");
                String::new()
            }
        }
    }
}

/// Decode every HTML5 character reference: named (`&rsquo;`, `&eacute;`),
/// decimal and hex.
///
/// Text that only looks like a reference (`AT&T`, a lone `&`) is kept as written.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
