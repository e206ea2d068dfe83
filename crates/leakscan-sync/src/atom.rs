//! Parser for Atom contact feeds carrying `gd:` contact extensions.

use crate::source::{FeedEntry, FeedPage};
use crate::{Result, SyncError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    FullName,
    Title,
    Phone,
}

#[derive(Debug, Default)]
struct RawEntry {
    full_name: Option<String>,
    title: Option<String>,
    phone_numbers: Vec<String>,
}

impl RawEntry {
    fn into_entry(self) -> FeedEntry {
        FeedEntry {
            full_name: self.full_name.or(self.title),
            phone_numbers: self.phone_numbers,
        }
    }
}

pub fn parse_feed(body: &str) -> Result<FeedPage> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut page = FeedPage::default();
    let mut current: Option<RawEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();
    let mut in_name = false;
    let mut in_author = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref event)) => {
                let name = event.local_name();
                match name.as_ref() {
                    b"entry" => current = Some(RawEntry::default()),
                    b"author" => in_author = true,
                    b"name" if current.is_some() && !in_author => in_name = true,
                    b"fullName" if in_name => start_field(&mut field, &mut text, Field::FullName),
                    b"title" if current.is_some() && !in_author => {
                        start_field(&mut field, &mut text, Field::Title)
                    }
                    b"phoneNumber" if current.is_some() => {
                        start_field(&mut field, &mut text, Field::Phone)
                    }
                    b"link" if current.is_none() => read_next_link(event, &mut page)?,
                    _ => {}
                }
            }
            Ok(Event::Empty(ref event)) => {
                if current.is_none() && event.local_name().as_ref() == b"link" {
                    read_next_link(event, &mut page)?;
                }
            }
            Ok(Event::Text(event)) if field.is_some() => {
                let value = event
                    .unescape()
                    .map_err(|err| SyncError::Parse(err.to_string()))?;
                text.push_str(&value);
            }
            Ok(Event::CData(event)) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(event.as_ref()));
            }
            Ok(Event::End(ref event)) => {
                let name = event.local_name();
                match name.as_ref() {
                    b"entry" => {
                        if let Some(entry) = current.take() {
                            page.entries.push(entry.into_entry());
                        }
                        field = None;
                        in_name = false;
                    }
                    b"author" => in_author = false,
                    b"name" if in_name => in_name = false,
                    b"fullName" | b"title" | b"phoneNumber" => {
                        if let (Some(done), Some(entry)) = (field.take(), current.as_mut()) {
                            commit_field(entry, done, &text);
                        }
                        text.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(SyncError::Parse(err.to_string())),
        }
        buf.clear();
    }

    Ok(page)
}

fn start_field(field: &mut Option<Field>, text: &mut String, next: Field) {
    *field = Some(next);
    text.clear();
}

fn commit_field(entry: &mut RawEntry, field: Field, text: &str) {
    let value = text.trim();
    if value.is_empty() {
        return;
    }
    match field {
        Field::FullName => entry.full_name = Some(value.to_string()),
        Field::Title => entry.title = Some(value.to_string()),
        Field::Phone => entry.phone_numbers.push(value.to_string()),
    }
}

fn read_next_link(event: &BytesStart<'_>, page: &mut FeedPage) -> Result<()> {
    let rel = attribute(event, b"rel")?;
    if rel.as_deref() != Some("next") {
        return Ok(());
    }
    if let Some(href) = attribute(event, b"href")? {
        if !href.trim().is_empty() {
            page.next = Some(href.trim().to_string());
        }
    }
    Ok(())
}

fn attribute(event: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    let attr = event
        .try_get_attribute(key)
        .map_err(|err| SyncError::Parse(err.to_string()))?;
    attr.map(|attr| {
        attr.unescape_value()
            .map(|value| value.into_owned())
            .map_err(|err| SyncError::Parse(err.to_string()))
    })
    .transpose()
}
