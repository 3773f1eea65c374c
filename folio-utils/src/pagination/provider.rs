//! Page content providers.

use std::sync::Arc;

use twilight_model::channel::message::embed::Embed;

use crate::embed::build_page_embed;

use super::{
    page::{bulleted_description, page_window, total_pages},
    surface::BoxFuture,
};

/// Supplies the page count and per-page content of a session.
///
/// `page` must return the same content for the same index within one
/// session; the engine may ask for an index more than once.
pub trait PageProvider: Send + Sync {
    /// Called once when the session starts.
    fn total_pages(&self) -> BoxFuture<'_, anyhow::Result<usize>>;

    /// Content of the page at `index`, or `None` when there is nothing to show.
    fn page<'a>(
        &'a self,
        index: usize,
        total_pages: usize,
        locate: Option<&'a str>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Vec<Embed>>>>;
}

impl<P: PageProvider + ?Sized> PageProvider for Arc<P> {
    fn total_pages(&self) -> BoxFuture<'_, anyhow::Result<usize>> {
        (**self).total_pages()
    }

    fn page<'a>(
        &'a self,
        index: usize,
        total_pages: usize,
        locate: Option<&'a str>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Vec<Embed>>>> {
        (**self).page(index, total_pages, locate)
    }
}

/// Pre-rendered pages, one embed per page.
pub struct StaticPages {
    pages: Vec<Embed>,
}

impl StaticPages {
    pub fn new(pages: Vec<Embed>) -> Self {
        Self { pages }
    }
}

impl PageProvider for StaticPages {
    fn total_pages(&self) -> BoxFuture<'_, anyhow::Result<usize>> {
        Box::pin(async move { Ok(self.pages.len()) })
    }

    fn page<'a>(
        &'a self,
        index: usize,
        _total_pages: usize,
        _locate: Option<&'a str>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Vec<Embed>>>> {
        Box::pin(async move { Ok(self.pages.get(index).map(|page| vec![page.clone()])) })
    }
}

/// A list of lines split into bulleted embed pages.
///
/// A locate hint bolds the matching lines on the shown page.
pub struct ListPages {
    title: String,
    items: Vec<String>,
    per_page: usize,
    footer_note: Option<String>,
}

impl ListPages {
    pub fn new(title: impl Into<String>, items: Vec<String>, per_page: usize) -> Self {
        Self {
            title: title.into(),
            items,
            per_page: per_page.max(1),
            footer_note: None,
        }
    }

    pub fn footer_note(mut self, note: impl Into<String>) -> Self {
        self.footer_note = Some(note.into());
        self
    }

    fn render(
        &self,
        index: usize,
        total_pages: usize,
        locate: Option<&str>,
    ) -> anyhow::Result<Option<Vec<Embed>>> {
        let (start, end) = page_window(self.items.len(), self.per_page, index);
        if start == end {
            return Ok(None);
        }

        let description = bulleted_description(&self.items[start..end], locate);
        let embed = build_page_embed(
            &self.title,
            description,
            index,
            total_pages,
            self.footer_note.as_deref(),
        )?;

        Ok(Some(vec![embed]))
    }
}

impl PageProvider for ListPages {
    fn total_pages(&self) -> BoxFuture<'_, anyhow::Result<usize>> {
        Box::pin(async move { Ok(total_pages(self.items.len(), self.per_page)) })
    }

    fn page<'a>(
        &'a self,
        index: usize,
        total_pages: usize,
        locate: Option<&'a str>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Vec<Embed>>>> {
        Box::pin(async move { self.render(index, total_pages, locate) })
    }
}
