//! Terminal drawing of a [`MapSnapshot`]: the doubly linked list on top, the
//! bucket array below it.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, ContentArrangement, Table};

use crate::{
    highlight::{Highlight, Tone},
    model::{Entry, MapSnapshot},
};

pub const LIST_CAPTION: &str = "Doubly Linked List (insertion order)";

/// Output styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    /// Marks highlighted text, with ANSI colour or a leading `*`.
    pub fn paint(&self, text: &str, tone: Option<Tone>) -> String {
        match tone {
            None => text.to_owned(),
            Some(tone) if self.color => format!("\x1b[{}m{}\x1b[0m", ansi_code(tone), text),
            Some(_) => format!("*{}", text),
        }
    }

    fn cell(&self, text: String, tone: Option<Tone>) -> Cell {
        match tone {
            Some(tone) if self.color => Cell::new(text)
                .fg(table_color(tone))
                .add_attribute(Attribute::Bold),
            Some(_) => Cell::new(format!("{} *", text)),
            None => Cell::new(text),
        }
    }
}

fn ansi_code(tone: Tone) -> &'static str {
    match tone {
        Tone::Touched => "1;33",
        Tone::Found => "1;32",
        Tone::Removing => "1;31",
    }
}

fn table_color(tone: Tone) -> Color {
    match tone {
        Tone::Touched => Color::Yellow,
        Tone::Found => Color::Green,
        Tone::Removing => Color::Red,
    }
}

fn pair(entry: &Entry) -> String {
    format!("{} → \"{}\"", entry.key(), entry.value())
}

/// One box per node, `⇄` between them, `null` where there is no neighbour.
pub fn render_linked_list(
    snapshot: &MapSnapshot,
    highlight: Option<Highlight>,
    style: Style,
) -> String {
    if snapshot.order.is_empty() {
        return format!("[null |   | null]\n{}", LIST_CAPTION);
    }

    let nodes = snapshot
        .order
        .iter()
        .map(|node| {
            let body = format!(
                "[{} | {} | {}]",
                if node.is_first { "null" } else { "Prev" },
                pair(&node.entry),
                if node.is_last { "null" } else { "Next" },
            );
            let tone = highlight
                .filter(|h| h.is_entry(node.entry.id()))
                .map(|h| h.tone);

            style.paint(&body, tone)
        })
        .collect::<Vec<_>>()
        .join(" ⇄ ");

    format!("{}\n{}", nodes, LIST_CAPTION)
}

/// A table with one row per bucket.
pub fn render_buckets(
    snapshot: &MapSnapshot,
    highlight: Option<Highlight>,
    style: Style,
) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Bucket", "Entries"]);

    for bucket in &snapshot.buckets {
        let tone = highlight
            .filter(|h| h.bucket == bucket.index)
            .map(|h| h.tone);

        let entries = if bucket.entries.is_empty() {
            "(empty)".to_owned()
        } else {
            bucket
                .entries
                .iter()
                .map(pair)
                .collect::<Vec<_>>()
                .join("\n")
        };

        table.add_row(vec![
            style.cell(format!("Bucket {}", bucket.index), tone),
            style.cell(entries, tone),
        ]);
    }

    table.to_string()
}

/// The full picture: list, then buckets.
pub fn render_map(snapshot: &MapSnapshot, highlight: Option<Highlight>, style: Style) -> String {
    format!(
        "{}\n\n{}",
        render_linked_list(snapshot, highlight, style),
        render_buckets(snapshot, highlight, style)
    )
}

#[cfg(test)]
mod tests {
    use super::{render_buckets, render_linked_list, render_map, Style, LIST_CAPTION};
    use crate::{
        highlight::{Highlight, Tone},
        model::{EntryId, VisualMap},
    };

    const PLAIN: Style = Style { color: false };

    #[test]
    fn empty_list_shows_placeholder() {
        let map = VisualMap::new();
        assert_eq!(
            format!("[null |   | null]\n{}", LIST_CAPTION),
            render_linked_list(&map.snapshot(), None, PLAIN)
        );
    }

    #[test]
    fn list_links_nodes() {
        let mut map = VisualMap::new();
        map.put(19, "Apple").unwrap();
        map.put(14, "Dog").unwrap();

        let drawn = render_linked_list(&map.snapshot(), None, PLAIN);
        assert!(drawn.starts_with(
            "[null | 19 → \"Apple\" | Next] ⇄ [Prev | 14 → \"Dog\" | null]"
        ));
    }

    #[test]
    fn highlighted_node_is_marked() {
        let mut map = VisualMap::new();
        map.put(19, "Apple").unwrap();
        map.put(14, "Dog").unwrap();

        let cue = Highlight {
            entry: Some(EntryId::from(14)),
            bucket: 5,
            tone: Tone::Found,
        };

        let plain = render_linked_list(&map.snapshot(), Some(cue), PLAIN);
        assert!(plain.contains("⇄ *[Prev | 14 → \"Dog\" | null]"));
        assert!(!plain.contains("*[null"));

        let coloured = render_linked_list(&map.snapshot(), Some(cue), Style { color: true });
        assert!(coloured.contains("\x1b[1;32m[Prev | 14 → \"Dog\" | null]\x1b[0m"));
    }

    #[test]
    fn buckets_table_lists_every_bucket() {
        let mut map = VisualMap::new();
        map.put(18, "Horse").unwrap();
        map.put(27, "Iguana").unwrap();

        let drawn = render_buckets(&map.snapshot(), None, PLAIN);
        for i in 0..10 {
            assert!(drawn.contains(&format!("Bucket {}", i)));
        }
        assert!(drawn.contains("(empty)"));
        assert!(drawn.contains("18 → \"Horse\""));
        assert!(drawn.contains("27 → \"Iguana\""));
    }

    #[test]
    fn whole_map_has_both_views() {
        let map = VisualMap::new();
        let drawn = render_map(&map.snapshot(), None, PLAIN);

        assert!(drawn.contains(LIST_CAPTION));
        assert!(drawn.contains("Bucket 9"));
    }
}
