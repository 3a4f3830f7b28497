//! Resource models
//!
//! Each model is read from a `tsResponse` document with `from_xml` and, where
//! the server accepts it in a request, rendered back into an `xml::Element`.
//! Models derive `Serialize` so the CLI can print them as JSON.

mod data_alert;
mod group;
mod groupset;
mod server_info;
mod site;
mod tag;
mod user;
mod workbook;

pub use data_alert::{AlertFrequency, DataAlertItem};
pub use group::GroupItem;
pub use groupset::{GroupSetItem, ResultLevel};
pub use server_info::ServerInfoItem;
pub use site::{SiteItem, SiteState};
pub use tag::{tags_from_xml, TagContent, TagSet};
pub(crate) use tag::{tag_batch_element, tags_element};
pub use user::UserItem;
pub use workbook::WorkbookItem;

use crate::error::{Error, Result};
use crate::xml;
use roxmltree::Node;

/// Parse every `<name>` element of a response body
pub(crate) fn parse_all<T>(
    body: &str,
    name: &str,
    parse: impl Fn(Node<'_, '_>) -> T,
) -> Result<Vec<T>> {
    let doc = xml::parse(body)?;
    let items = xml::find_all(doc.root_element(), name).map(parse).collect();
    Ok(items)
}

/// Parse the first `<name>` element of a response body
pub(crate) fn parse_one<T>(body: &str, name: &str, parse: impl Fn(Node<'_, '_>) -> T) -> Result<T> {
    parse_all(body, name, parse)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::xml_parse(format!("response has no <{name}> element")))
}
