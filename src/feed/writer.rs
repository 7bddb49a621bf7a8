//! RSS 2.0 serialization.
//!
//! Emits the document through quick-xml's event writer. Podcast-specific
//! elements use the `itunes` and `podcast` namespaces declared on `<rss>`.

use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::FeedError;
use super::model::{Channel, FeedDocument, FeedItem};

const ITUNES_NS: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
const PODCAST_NS: &str = "https://podcastindex.org/namespace/1.0";

/// Serialize a feed document to UTF-8 XML.
pub fn to_xml(doc: &FeedDocument) -> Result<Vec<u8>, FeedError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:itunes", ITUNES_NS));
    rss.push_attribute(("xmlns:podcast", PODCAST_NS));
    writer.write_event(Event::Start(rss))?;

    write_channel(&mut writer, &doc.channel)?;

    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    Ok(writer.into_inner())
}

/// Serialize `doc` and write it to `path`, replacing any previous feed.
///
/// The bytes go to a sibling temp file that is then renamed over `path`,
/// so a failed write leaves the previous feed in place.
pub fn write_feed(doc: &FeedDocument, path: &Path) -> Result<usize, FeedError> {
    let bytes = to_xml(doc)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| FeedError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("xml.tmp");
    std::fs::write(&temp_path, &bytes).map_err(|source| FeedError::Write {
        path: temp_path.clone(),
        source,
    })?;
    std::fs::rename(&temp_path, path).map_err(|source| FeedError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(target: "confpod::feed", path = %path.display(), bytes = bytes.len(), "Feed written");
    Ok(bytes.len())
}

fn write_channel<W: Write>(w: &mut Writer<W>, channel: &Channel) -> Result<(), FeedError> {
    w.write_event(Event::Start(BytesStart::new("channel")))?;

    text_element(w, "title", &channel.title)?;
    text_element(w, "link", &channel.link)?;
    text_element(w, "description", &channel.description)?;
    text_element(w, "language", &channel.language)?;
    text_element(w, "generator", &channel.generator)?;
    text_element(w, "docs", &channel.docs)?;
    text_element(w, "pubDate", &channel.pub_date)?;
    text_element(w, "lastBuildDate", &channel.last_build_date)?;

    empty_element(w, "itunes:image", &[("href", channel.image_url.as_str())])?;

    let mut category = BytesStart::new("itunes:category");
    category.push_attribute(("text", channel.category.text.as_str()));
    match &channel.category.subcategory {
        Some(sub) => {
            w.write_event(Event::Start(category))?;
            empty_element(w, "itunes:category", &[("text", sub.as_str())])?;
            w.write_event(Event::End(BytesEnd::new("itunes:category")))?;
        }
        None => w.write_event(Event::Empty(category))?,
    }

    text_element(w, "itunes:author", &channel.author)?;
    text_element(w, "itunes:explicit", bool_text(channel.explicit))?;
    text_element(w, "itunes:type", &channel.show_type)?;

    attr_text_element(
        w,
        "podcast:location",
        &[
            ("geo", channel.location.geo.as_str()),
            ("osm", channel.location.osm.as_str()),
        ],
        &channel.location.name,
    )?;

    for item in &channel.items {
        write_item(w, item)?;
    }

    w.write_event(Event::End(BytesEnd::new("channel")))?;
    Ok(())
}

fn write_item<W: Write>(w: &mut Writer<W>, item: &FeedItem) -> Result<(), FeedError> {
    w.write_event(Event::Start(BytesStart::new("item")))?;

    text_element(w, "title", &item.title)?;
    text_element(w, "link", &item.link)?;
    text_element(w, "description", &item.description)?;

    let length = item.enclosure.length.to_string();
    empty_element(
        w,
        "enclosure",
        &[
            ("url", item.enclosure.url.as_str()),
            ("length", length.as_str()),
            ("type", item.enclosure.mime_type.as_str()),
        ],
    )?;

    attr_text_element(
        w,
        "guid",
        &[("isPermaLink", bool_text(item.guid.is_permalink))],
        &item.guid.value,
    )?;
    text_element(w, "pubDate", &item.pub_date)?;

    text_element(w, "itunes:duration", &item.duration)?;
    text_element(w, "itunes:explicit", bool_text(item.explicit))?;
    text_element(w, "itunes:episode", &item.itunes_episode.to_string())?;
    text_element(w, "itunes:season", &item.itunes_season.to_string())?;

    if let Some(transcript) = &item.transcript {
        empty_element(
            w,
            "podcast:transcript",
            &[
                ("url", transcript.url.as_str()),
                ("type", transcript.mime_type.as_str()),
            ],
        )?;
    }

    // href/img are always present, even when empty
    for person in &item.persons {
        attr_text_element(
            w,
            "podcast:person",
            &[
                ("role", person.role.as_str()),
                ("href", person.href.as_str()),
                ("img", person.img.as_str()),
            ],
            &person.name,
        )?;
    }

    attr_text_element(
        w,
        "podcast:season",
        &[("name", item.season.name.as_str())],
        &item.season.number.to_string(),
    )?;
    text_element(w, "podcast:episode", &item.episode.to_string())?;

    w.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

fn text_element<W: Write>(w: &mut Writer<W>, name: &str, text: &str) -> Result<(), FeedError> {
    attr_text_element(w, name, &[], text)
}

fn attr_text_element<W: Write>(
    w: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<(), FeedError> {
    let mut start = BytesStart::new(name);
    for &attr in attrs {
        start.push_attribute(attr);
    }
    w.write_event(Event::Start(start))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn empty_element<W: Write>(
    w: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<(), FeedError> {
    let mut start = BytesStart::new(name);
    for &attr in attrs {
        start.push_attribute(attr);
    }
    w.write_event(Event::Empty(start))?;
    Ok(())
}

fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
