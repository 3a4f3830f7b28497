//! Request body builder

use crate::error::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// A request element with attributes and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Add an attribute only when a value is present
    #[must_use]
    pub fn attr_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.attr(key, v.to_string()),
            None => self,
        }
    }

    /// Append a child element
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    fn write_to(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            writer
                .write_event(Event::Empty(start))
                .map_err(|e| Error::xml_write(e.to_string()))?;
            return Ok(());
        }
        writer
            .write_event(Event::Start(start))
            .map_err(|e| Error::xml_write(e.to_string()))?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| Error::xml_write(e.to_string()))?;
        Ok(())
    }

    /// Serialize this element as a standalone document
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| Error::xml_write(e.to_string()))
    }
}

/// Wrap elements in the `<tsRequest>` envelope and serialize
pub fn ts_request(children: impl IntoIterator<Item = Element>) -> Result<String> {
    Element::new("tsRequest").children(children).to_xml()
}
