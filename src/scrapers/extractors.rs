//! Field extractors for listing detail pages.
//!
//! Every extractor is a read-only function of the page. A missing node or an
//! unexpected token shape yields `None` (or `false` for the flag fields); it is
//! never an error, so one odd field cannot sink the whole record.

use crate::models::{EnergyRating, PropertyType};
use crate::scrapers::markup::{Document, Locator};
use crate::scrapers::schema;
use tracing::debug;

/// Collapse every whitespace run into a single space. Leading and trailing
/// runs are kept as one space, not trimmed.
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed
}

/// Drop embedded newlines first, then collapse the remaining whitespace.
fn flatten(text: &str) -> String {
    collapse_whitespace(&text.replace('\n', ""))
}

/// Raw texts of the primary feature list
fn feature_items(doc: &Document) -> Vec<String> {
    doc.find(&schema::FEATURES_PRIMARY)
        .map(|container| {
            container
                .find_all(&schema::FEATURE_ITEM)
                .iter()
                .map(|item| item.text())
                .collect()
        })
        .unwrap_or_default()
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

/// First feature item mentioning any of `keywords`
fn find_item<'a>(items: &'a [String], keywords: &[&str]) -> Option<&'a String> {
    items.iter().find(|item| mentions_any(item, keywords))
}

/// First item that settles one of the `(keyword, verdict)` pairs
fn find_verdict(items: &[String], verdicts: &[(&str, bool)]) -> Option<bool> {
    items.iter().find_map(|item| {
        let lowered = item.to_lowercase();
        verdicts
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, verdict)| *verdict)
    })
}

/// Count printed as the very first character of the item, e.g. "3 habitaciones".
fn leading_digit(item: &str) -> Option<u32> {
    let digit = item.chars().next().and_then(|c| c.to_digit(10));
    if digit.is_none() {
        debug!("No leading digit in feature item '{}'", item);
    }
    digit
}

fn parse_grouped_number(token: &str) -> Option<i32> {
    token.replace('.', "").trim().parse().ok()
}

/// True if any candidate node exists and carries content.
fn is_present(doc: &Document, candidates: &[Locator]) -> bool {
    candidates
        .iter()
        .any(|locator| doc.find(locator).is_some_and(|node| node.has_content()))
}

pub fn title(doc: &Document) -> Option<String> {
    doc.find(&schema::TITLE).map(|node| flatten(&node.text()))
}

pub fn property_type(doc: &Document) -> Option<PropertyType> {
    title(doc).map(|title| PropertyType::from_title(&title))
}

pub fn location(doc: &Document) -> Option<String> {
    doc.find(&schema::LOCATION)
        .map(|node| collapse_whitespace(&node.text()))
}

/// Price with "." thousands separators, e.g. "304.900"
pub fn price(doc: &Document) -> Option<i64> {
    let node = doc.find(&schema::PRICE)?;
    node.text().replace('.', "").trim().parse().ok()
}

/// Built area in square metres.
///
/// "120 m² construidos" reads the first token. When the usable area is quoted
/// too ("120 m² construidos, 110 m² útiles") the built-area number is the
/// third token counting back from the "construidos" keyword.
pub fn m2(doc: &Document) -> Option<i32> {
    let items = feature_items(doc);
    let item = find_item(&items, &[schema::BUILT_AREA_KEYWORD])?;
    let words: Vec<&str> = item.split_whitespace().collect();

    let token = if item.contains(schema::USABLE_AREA_KEYWORD) {
        let keyword_at = words
            .iter()
            .position(|word| word.to_lowercase().contains(schema::BUILT_AREA_KEYWORD))?;
        words.get(keyword_at.checked_sub(2)?)?
    } else {
        words.first()?
    };

    let area = parse_grouped_number(token);
    if area.is_none() {
        debug!("Unreadable built area in '{}'", item);
    }
    area
}

pub fn status(doc: &Document) -> Option<String> {
    find_item(&feature_items(doc), schema::STATUS_KEYWORDS).cloned()
}

/// First single digit of the first floor item that has one. "10ª planta" reads
/// as 1.
pub fn floor(doc: &Document) -> Option<i32> {
    feature_items(doc)
        .iter()
        .filter(|item| mentions_any(item, schema::FLOOR_KEYWORDS))
        .find_map(|item| {
            item.to_lowercase()
                .chars()
                .find_map(|c| c.to_digit(10))
                .map(|digit| digit as i32)
        })
}

pub fn description(doc: &Document) -> Option<String> {
    schema::DESCRIPTION
        .iter()
        .find_map(|locator| doc.find(locator)?.find(&schema::PARAGRAPH))
        .map(|paragraph| flatten(&paragraph.text()))
}

/// Leading number of the gallery label, e.g. "41 fotos"
pub fn n_photos(doc: &Document) -> Option<u32> {
    let label = doc.find(&schema::PHOTOS_LABEL)?.text();
    label.split_whitespace().next()?.parse().ok()
}

pub fn n_rooms(doc: &Document) -> Option<u32> {
    find_item(&feature_items(doc), schema::ROOM_KEYWORDS).and_then(|item| leading_digit(item))
}

pub fn n_bathrooms(doc: &Document) -> Option<u32> {
    find_item(&feature_items(doc), schema::BATHROOM_KEYWORDS).and_then(|item| leading_digit(item))
}

/// Whether the advertiser is a private seller rather than an agency
pub fn particular(doc: &Document) -> bool {
    doc.find(&schema::ADVERTISER_NAME)
        .is_some_and(|node| mentions_any(&node.text(), &[schema::PARTICULAR_KEYWORD]))
}

pub fn luxury(doc: &Document) -> bool {
    doc.find(&schema::LUXURY_TAGS)
        .and_then(|tags| tags.find(&schema::LUXURY_TAG))
        .is_some_and(|tag| tag.has_content())
}

pub fn video(doc: &Document) -> bool {
    is_present(doc, &schema::VIDEO)
}

pub fn virtual_tour(doc: &Document) -> bool {
    is_present(doc, &schema::VIRTUAL_TOUR)
}

pub fn tour_3d(doc: &Document) -> bool {
    is_present(doc, &schema::TOUR_3D)
}

pub fn homestaging(doc: &Document) -> bool {
    is_present(doc, &schema::HOMESTAGING)
}

pub fn plane(doc: &Document) -> bool {
    is_present(doc, &schema::PLANE)
}

/// Looks only at the first group of the secondary feature list.
pub fn air_conditioning(doc: &Document) -> bool {
    let Some(group) = doc
        .find(&schema::FEATURES_SECONDARY)
        .and_then(|container| container.find_all(&schema::FEATURE_GROUP).into_iter().next())
    else {
        return false;
    };

    let hits = group
        .find_all(&schema::FEATURE_ITEM)
        .iter()
        .filter(|item| mentions_any(&item.text(), schema::AIR_CONDITIONING_KEYWORDS))
        .count();
    hits.min(1) == 1
}

pub fn heating(doc: &Document) -> Option<String> {
    find_item(&feature_items(doc), schema::HEATING_KEYWORDS).cloned()
}

pub fn elevator(doc: &Document) -> Option<bool> {
    find_verdict(&feature_items(doc), schema::ELEVATOR_VERDICTS)
}

pub fn furnished(doc: &Document) -> Option<bool> {
    find_verdict(&feature_items(doc), schema::FURNISHED_VERDICTS)
}

pub fn terrace(doc: &Document) -> Option<String> {
    find_item(&feature_items(doc), schema::TERRACE_KEYWORDS).cloned()
}

pub fn consume(doc: &Document) -> Option<EnergyRating> {
    ticket_rating(doc, &schema::CONSUME_TICKETS)
        .or_else(|| certificate_rating(doc, schema::CONSUME_ITEM))
}

pub fn emisions(doc: &Document) -> Option<EnergyRating> {
    ticket_rating(doc, &schema::EMISSION_TICKETS)
        .or_else(|| certificate_rating(doc, schema::EMISSION_ITEM))
}

/// Best letter whose ticket graphic is on the page
fn ticket_rating(doc: &Document, tickets: &[(EnergyRating, Locator)]) -> Option<EnergyRating> {
    tickets
        .iter()
        .find(|(_, locator)| doc.find(locator).is_some())
        .map(|(rating, _)| *rating)
}

/// Newer layout: the rating sits in the `title` of the item's last span.
fn certificate_rating(doc: &Document, item: usize) -> Option<EnergyRating> {
    let group = doc
        .find(&schema::FEATURES_SECONDARY)?
        .find_all(&schema::FEATURE_GROUP)
        .into_iter()
        .nth(schema::CERTIFICATE_GROUP)?;
    let entry = group.find_all(&schema::FEATURE_ITEM).into_iter().nth(item)?;
    let span = entry.find_all(&schema::SPAN).into_iter().last()?;
    span.attr("title")?
        .chars()
        .next()
        .and_then(EnergyRating::from_letter)
}
