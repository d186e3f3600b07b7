//! Rendering of decoded reports for the command line.
//!
//! Text output lists each projection as a titled section of aligned
//! `label  value` rows. JSON output keeps declaration order and is keyed by
//! wire field names, so it stays stable across translations.

use mediameta_common::DisplayContext;
use mediameta_probe::{FieldKey, MediaMetadata, Projectable, StreamMetadata};
use serde_json::{Map, Value};

/// One titled block of `(label, value)` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub entries: Vec<(String, String)>,
}

/// Build the display sections for a report.
///
/// Tag sections are only produced when `include_tags` is set and the entity
/// carries tags with at least one displayable value.
pub fn sections(
    metadata: &MediaMetadata,
    ctx: &DisplayContext,
    include_tags: bool,
) -> Vec<Section> {
    let mut out = vec![Section {
        title: ctx.text("Format"),
        entries: metadata.format.labeled(ctx),
    }];

    if include_tags {
        if let Some(tags) = &metadata.format.tags {
            let title = format!("{} {}", ctx.text("Format"), ctx.text("Tags"));
            push_non_empty(&mut out, title, tags.labeled(ctx));
        }
    }

    for (position, stream) in metadata.streams.iter().enumerate() {
        let title = stream_title(position, stream, ctx);
        out.push(Section {
            title: title.clone(),
            entries: stream.labeled(ctx),
        });

        if include_tags {
            if let Some(tags) = &stream.tags {
                let title = format!("{} {}", title, ctx.text("Tags"));
                push_non_empty(&mut out, title, tags.labeled(ctx));
            }
        }
    }

    out
}

fn push_non_empty(out: &mut Vec<Section>, title: String, entries: Vec<(String, String)>) {
    if !entries.is_empty() {
        out.push(Section { title, entries });
    }
}

fn stream_title(position: usize, stream: &StreamMetadata, ctx: &DisplayContext) -> String {
    let index = stream.index.unwrap_or(position as i64);
    match stream.kind {
        Some(kind) => format!("{} #{} ({})", ctx.text("Stream"), index, kind.localized_label(ctx)),
        None => format!("{} #{}", ctx.text("Stream"), index),
    }
}

/// Render sections as aligned plain text.
pub fn render_text(sections: &[Section]) -> String {
    let mut out = String::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&section.title);
        out.push('\n');

        let width = section
            .entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        for (label, value) in &section.entries {
            out.push_str(&format!("  {:<width$}  {}\n", label, value, width = width));
        }
    }

    out
}

/// Render a report as a JSON object of ordered projections.
///
/// ```json
/// { "format": {...}, "format_tags": {...}, "streams": [{..., "tags": {...}}] }
/// ```
pub fn render_json(metadata: &MediaMetadata, ctx: &DisplayContext, include_tags: bool) -> Value {
    let mut root = Map::new();
    root.insert("format".to_string(), projection(&metadata.format, ctx));

    if include_tags {
        if let Some(tags) = &metadata.format.tags {
            root.insert("format_tags".to_string(), projection(tags, ctx));
        }
    }

    let streams = metadata
        .streams
        .iter()
        .map(|stream| {
            let mut value = projection(stream, ctx);
            if include_tags {
                if let (Some(tags), Value::Object(map)) = (&stream.tags, &mut value) {
                    map.insert("tags".to_string(), projection(tags, ctx));
                }
            }
            value
        })
        .collect();
    root.insert("streams".to_string(), Value::Array(streams));

    Value::Object(root)
}

fn projection<P: Projectable>(entity: &P, ctx: &DisplayContext) -> Value {
    Value::Object(
        entity
            .as_dictionary(ctx)
            .into_iter()
            .map(|(key, value)| (key.id().to_string(), Value::String(value)))
            .collect(),
    )
}
