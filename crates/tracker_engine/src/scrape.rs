use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

const UPCOMING_PANEL_TITLE: &str = "Upcoming Conferences";

static PANEL_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.panel-title").expect("valid panel title selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("valid heading selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid anchor selector"));
static EVENT_ROW: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr.clickable-row.text-success").expect("valid event row selector")
});
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid cell selector"));
static STRONG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong").expect("valid strong selector"));

/// A conference entry from the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceLink {
    pub name: String,
    pub link: String,
}

/// One important-dates row of a conference schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub date: String,
    pub track: String,
    pub content: String,
    pub link: String,
}

/// Conferences listed under the "Upcoming Conferences" panel, in page order.
///
/// Each `h3` inside the panel contributes its first anchor. Relative links
/// are resolved against `page_url`.
pub fn parse_listing(html: &str, page_url: &str) -> Vec<ConferenceLink> {
    let doc = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    doc.select(&PANEL_TITLE)
        .filter(|title| normalized_text(*title) == UPCOMING_PANEL_TITLE)
        .filter_map(|title| {
            title
                .parent()
                .and_then(|header| header.parent())
                .and_then(ElementRef::wrap)
        })
        .flat_map(|panel| panel.select(&HEADING))
        .filter_map(|heading| {
            let anchor = heading.select(&ANCHOR).next()?;
            let href = anchor.value().attr("href")?;
            Some(ConferenceLink {
                name: normalized_text(anchor),
                link: resolve_href(href, base.as_ref()),
            })
        })
        .collect()
}

/// The important-dates page of a conference, when it is hosted under `base_url`.
pub fn schedule_url(conference_link: &str, base_url: &str) -> Option<String> {
    let url = conference_link.replace("home", "dates");
    url.starts_with(base_url).then_some(url)
}

/// Event rows of a schedule page. Rows with fewer than three cells are skipped.
pub fn parse_schedule(html: &str, page_url: &str) -> Vec<ScheduleRow> {
    let doc = Html::parse_document(html);
    let base = Url::parse(page_url).ok();

    doc.select(&EVENT_ROW)
        .filter_map(|row| {
            let cells: Vec<ElementRef> = row.select(&CELL).take(3).collect();
            let [date, track, content] = cells.as_slice() else {
                return None;
            };
            Some(ScheduleRow {
                date: cell_text(*date),
                track: cell_text(*track),
                content: cell_text(*content),
                link: row
                    .value()
                    .attr("href")
                    .map(|href| resolve_href(href, base.as_ref()))
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// The cell's own text, or the text of its first `strong` when it has none.
fn cell_text(cell: ElementRef) -> String {
    let own: Vec<&str> = cell
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect();
    if !own.is_empty() {
        return collapse_whitespace(&own.join(" "));
    }
    cell.select(&STRONG)
        .next()
        .map(normalized_text)
        .unwrap_or_default()
}

fn normalized_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn resolve_href(href: &str, base: Option<&Url>) -> String {
    let trimmed = href.trim();
    if let Ok(url) = Url::parse(trimmed) {
        return url.into();
    }
    base.and_then(|base| base.join(trimmed).ok())
        .map(String::from)
        .unwrap_or_else(|| trimmed.to_string())
}
