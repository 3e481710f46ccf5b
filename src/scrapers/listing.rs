use crate::models::{ListingRecord, PropertyType};
use crate::scrapers::error::ScrapeError;
use crate::scrapers::extractors;
use crate::scrapers::markup::Document;
use tracing::{debug, warn};

/// Assemble the full record of one detail page.
///
/// Only the title and the price are mandatory; without them the page is not a
/// listing at all. Every other field degrades to its absent/default value.
pub fn build_record(doc: &Document) -> Result<ListingRecord, ScrapeError> {
    let title = extractors::title(doc)
        .ok_or(ScrapeError::MandatoryFieldMissing { field: "title" })?;
    let price = extractors::price(doc)
        .ok_or(ScrapeError::MandatoryFieldMissing { field: "price" })?;

    let location = extractors::location(doc).unwrap_or_else(|| {
        warn!("No location on listing '{}'", title);
        String::new()
    });

    let record = ListingRecord {
        property_type: extractors::property_type(doc).unwrap_or(PropertyType::House),
        location,
        price,
        m2: extractors::m2(doc),
        status: extractors::status(doc),
        floor: extractors::floor(doc),
        description: extractors::description(doc),
        n_photos: extractors::n_photos(doc),
        n_rooms: extractors::n_rooms(doc),
        n_bathrooms: extractors::n_bathrooms(doc),
        particular: extractors::particular(doc),
        luxury: extractors::luxury(doc),
        video: extractors::video(doc),
        virtual_tour: extractors::virtual_tour(doc),
        tour_3d: extractors::tour_3d(doc),
        homestaging: extractors::homestaging(doc),
        plane: extractors::plane(doc),
        air_conditioning: extractors::air_conditioning(doc),
        heating: extractors::heating(doc),
        elevator: extractors::elevator(doc),
        furnished: extractors::furnished(doc),
        terrace: extractors::terrace(doc),
        consume: extractors::consume(doc),
        emisions: extractors::emisions(doc),
        title,
    };

    debug!("Built record for '{}' ({} €)", record.title, record.price);
    Ok(record)
}
